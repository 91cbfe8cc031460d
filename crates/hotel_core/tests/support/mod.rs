#![allow(dead_code)]

pub mod hotel;
