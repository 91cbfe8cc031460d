pub mod booking_request;
pub mod checkin;
pub mod checkout;
