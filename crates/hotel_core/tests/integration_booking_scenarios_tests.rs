mod support;

use hotel_core::booking::Allocation;
use hotel_core::policy::BookingPolicyKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use support::hotel::{assert_capacity_invariant, HotelBuilder};

#[test]
fn exact_match_rejects_where_upgrade_accepts() {
    for (kind, expected_second) in [
        (BookingPolicyKind::Trivial, None),
        (BookingPolicyKind::Smart, Some("Double")),
    ] {
        let mut hotel = HotelBuilder::new()
            .room("Single", 1, 3000)
            .room("Double", 1, 4000)
            .kind(kind)
            .build();

        let first = hotel.booking(1, "Single", 1, 2);
        assert_eq!(
            hotel.policy.book(&first).unwrap(),
            Allocation::Assigned(hotel.room_type("Single"))
        );

        let second = hotel.booking(2, "Single", 2, 3);
        let expected = match expected_second {
            Some(name) => Allocation::Assigned(hotel.room_type(name)),
            None => Allocation::Rejected,
        };
        assert_eq!(hotel.policy.book(&second).unwrap(), expected, "{kind}");
    }
}

#[test]
fn full_ledger_rejects_third_guest() {
    for kind in BookingPolicyKind::ALL {
        let mut hotel = HotelBuilder::new().room("Single", 2, 100).kind(kind).build();
        let bookings: Vec<_> = (1..=3).map(|g| hotel.booking(g, "Single", 1, 3)).collect();
        assert!(hotel.policy.book(&bookings[0]).unwrap().is_accepted());
        assert!(hotel.policy.book(&bookings[1]).unwrap().is_accepted());
        assert_eq!(hotel.policy.book(&bookings[2]).unwrap(), Allocation::Rejected);
        let single = hotel.room_type("Single");
        for day in 1..=3 {
            assert_eq!(hotel.inventory().occupied(single, day), 2);
        }
    }
}

#[test]
fn inverted_range_never_checks_in() {
    for kind in BookingPolicyKind::ALL {
        let mut hotel = HotelBuilder::new()
            .room("Single", 5, 100)
            .room("Lux", 5, 500)
            .kind(kind)
            .build();
        let inverted = hotel.booking(1, "Single", 6, 2);
        for day in 0..10 {
            hotel.set_day(day);
            assert!(!hotel.policy.check_into(&inverted));
        }
        // Still rejected after unrelated bookings touch the same days.
        let unrelated = hotel.booking(2, "Single", 2, 6);
        hotel.policy.book(&unrelated).unwrap();
        assert!(!hotel.policy.check_into(&inverted));
        assert_eq!(hotel.policy.book(&inverted).unwrap(), Allocation::Rejected);
    }
}

#[test]
fn mid_stay_check_in_needs_the_remaining_days() {
    let mut hotel = HotelBuilder::new().room("Single", 1, 100).build();
    let stay = hotel.booking(1, "Single", 3, 7);
    assert!(hotel.policy.book(&stay).unwrap().is_accepted());

    hotel.set_day(5);
    assert!(hotel.policy.check_into(&stay));

    // Same guest id, but the ledger only holds days 3..=4 for a different stay.
    let mut partial = HotelBuilder::new().room("Single", 1, 100).build();
    let short = partial.booking(1, "Single", 3, 4);
    partial.policy.book(&short).unwrap();
    partial.set_day(5);
    assert!(!partial.policy.check_into(&partial.booking(1, "Single", 3, 7)));
}

#[test]
fn successful_book_holds_every_day_of_the_stay() {
    for kind in BookingPolicyKind::ALL {
        let mut hotel = HotelBuilder::new()
            .room("Single", 1, 100)
            .room("Double", 1, 200)
            .kind(kind)
            .build();
        let booking = hotel.booking(4, "Single", 10, 14);
        let Allocation::Assigned(assigned) = hotel.policy.book(&booking).unwrap() else {
            panic!("empty hotel must accept");
        };
        for day in 10..=14 {
            assert!(hotel
                .inventory()
                .has_active_booking(booking.guest, assigned, day, day));
        }
        assert!(!hotel
            .inventory()
            .has_active_booking(booking.guest, assigned, 15, 15));
    }
}

#[test]
fn random_requests_never_downgrade_or_overbook() {
    let mut rng = StdRng::seed_from_u64(2024);
    for kind in BookingPolicyKind::ALL {
        let mut hotel = HotelBuilder::new()
            .room("Single", 3, 100)
            .room("Double", 2, 150)
            .room("HalfLux", 1, 300)
            .room("Lux", 1, 900)
            .kind(kind)
            .build();
        let names = ["Single", "Double", "HalfLux", "Lux"];
        for guest in 0..400 {
            let from = rng.gen_range(0..40);
            let to = from + rng.gen_range(0..6);
            let booking = hotel.booking(guest, names[rng.gen_range(0..names.len())], from, to);
            let allocation = hotel.policy.book(&booking).unwrap();
            if let Allocation::Assigned(assigned) = allocation {
                assert!(assigned >= booking.room_type, "downgraded {booking:?}");
                if kind == BookingPolicyKind::Trivial {
                    assert_eq!(assigned, booking.room_type);
                }
            }
        }
        assert_capacity_invariant(hotel.inventory(), 0..50);
    }
}

#[test]
fn repeated_queries_do_not_change_state() {
    let mut hotel = HotelBuilder::new().room("Single", 1, 100).build();
    let booking = hotel.booking(1, "Single", 2, 2);
    hotel.policy.book(&booking).unwrap();
    let single = hotel.room_type("Single");
    let inventory = hotel.inventory();
    let before: Vec<_> = (0..5).map(|d| inventory.occupied(single, d)).collect();
    for _ in 0..10 {
        assert!(!inventory.has_capacity(single, 1, 3));
        assert!(inventory.has_capacity(single, 3, 4));
    }
    let after: Vec<_> = (0..5).map(|d| inventory.occupied(single, d)).collect();
    assert_eq!(before, after);
}

#[test]
fn zero_capacity_type_is_skipped_by_upgrades() {
    let mut hotel = HotelBuilder::new()
        .room("Single", 0, 100)
        .room("Double", 0, 200)
        .room("Lux", 1, 900)
        .build();
    let booking = hotel.booking(1, "Single", 1, 1);
    assert_eq!(
        hotel.policy.book(&booking).unwrap(),
        Allocation::Assigned(hotel.room_type("Lux"))
    );
    assert_eq!(hotel.policy.bill(&booking), 100);
}
