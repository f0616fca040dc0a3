use chrono::{Days, NaiveDate};
use walnut_zonecheck::serial::{
    LEGACY_EPOCH, Serial, compute_next_serial, compute_updated_soa_content,
    next_serial_from_str, serial_from_soa_content,
};

mod support;
use support::{SOA_CONTENT, subscribe};

static_assertions::assert_impl_all!(Serial: Send, Sync, Copy);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn date_number(date: NaiveDate) -> u64 {
    date.format("%Y%m%d").to_string().parse().unwrap()
}

#[test]
fn revision_advances_within_a_day() {
    subscribe();
    let mut day = date(2011, 2, 20);
    for _ in 0..20 {
        let base = date_number(day) * 100;
        for revision in 0..99 {
            assert_eq!(
                compute_next_serial(Serial::new(base + revision), day).get(),
                base + revision + 1
            );
        }

        let tomorrow = date_number(day.checked_add_days(Days::new(1)).unwrap()) * 100;
        assert_eq!(compute_next_serial(Serial::new(base + 99), day).get(), tomorrow);

        day = day.checked_add_days(Days::new(1)).unwrap();
    }
}

#[test]
fn calendar_boundaries() {
    subscribe();
    let cases = [
        (2010123199, date(2010, 12, 31), 2011010100),
        (2011022899, date(2011, 2, 28), 2011030100),
        (2012022899, date(2012, 2, 28), 2012022900),
        (2012022999, date(2012, 2, 29), 2012030100),
        (2000022899, date(2000, 2, 28), 2000022900),
        (2100022899, date(2100, 2, 28), 2100030100),
    ];
    for (current, today, expected) in cases {
        assert_eq!(
            compute_next_serial(Serial::new(current), today).get(),
            expected,
            "{current} on {today}"
        );
    }
}

#[test]
fn legacy_and_auto_serials() {
    subscribe();
    let today = date(2024, 6, 1);
    assert_eq!(compute_next_serial(Serial::new(69), today).get(), 70);
    assert_eq!(compute_next_serial(Serial::new(LEGACY_EPOCH), today).get(), 1);
    assert_eq!(compute_next_serial(Serial::ZERO, today), Serial::ZERO);
}

#[test]
fn next_serial_is_always_newer() {
    subscribe();
    let today = date(2024, 6, 1);
    for current in [
        1u64,
        69,
        2024053112,
        2024060100,
        2024060198,
        2024060199,
        2024070450,
        2024070499,
        2030123199,
    ] {
        let next = compute_next_serial(Serial::new(current), today);
        assert!(next > Serial::new(current), "{current} -> {next}");

        let before = Serial::new(current).to_serial_number().unwrap();
        let after = next.to_serial_number().unwrap();
        assert!(before.is_superseded_by(after), "{current} -> {next}");
    }
}

#[test]
fn updated_soa_content() {
    subscribe();
    let today = date(2024, 1, 1);

    assert_eq!(compute_updated_soa_content("", today), "");
    assert_eq!(
        compute_updated_soa_content(SOA_CONTENT, today),
        "ns1.example.com hostmaster.example.com 2024010101 28800 7200 604800 86400"
    );

    let yesterday = "ns1.example.com hostmaster.example.com 2023123199 28800 7200 604800 86400";
    let updated = compute_updated_soa_content(yesterday, today);
    assert_eq!(serial_from_soa_content(&updated), Some("2024010100"));
}

#[test]
fn textual_serials() {
    subscribe();
    let today = date(2024, 1, 1);
    assert_eq!(next_serial_from_str("2024010105", today).get(), 2024010106);
    assert_eq!(next_serial_from_str("0", today).get(), 0);
    assert_eq!(next_serial_from_str("17x", today).get(), 18);
    assert_eq!(next_serial_from_str("", today).get(), 1);
}
