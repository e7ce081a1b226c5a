
use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use slotbook_core::errors::FilterError;
use slotbook_core::models::filter::{SlotKeywords, SlotRange};
use test_utils::{booked, person};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn time(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

#[rstest]
#[case(date(2025, 10, 12), date(2025, 10, 12), None, None, true)]
#[case(date(2025, 10, 13), None, None, None, false)]
#[case(None, date(2025, 10, 11), None, None, false)]
#[case(None, None, time(16, 0), time(18, 0), true)]
#[case(None, None, time(16, 1), None, false)]
#[case(None, None, None, time(17, 59), false)]
#[case(date(2025, 10, 1), date(2025, 10, 31), time(9, 0), time(20, 0), true)]
fn test_slot_range_bounds_are_inclusive(
    #[case] start_date: Option<NaiveDate>,
    #[case] end_date: Option<NaiveDate>,
    #[case] start_time: Option<NaiveTime>,
    #[case] end_time: Option<NaiveTime>,
    #[case] expected: bool,
) {
    let lesson = booked("Alice Tan", "91234567", "2025-10-12 1600-1800");
    let range = SlotRange::new(start_date, end_date, start_time, end_time).unwrap();

    assert_eq!(range.matches(&lesson), expected);
}

#[test]
fn test_slot_range_never_matches_slotless_person() {
    let range = SlotRange::default();
    assert!(!range.matches(&person("No Slot", "90000000")));
}

#[test]
fn test_slot_range_rejects_inverted_bounds() {
    assert_eq!(
        SlotRange::new(date(2025, 10, 13), date(2025, 10, 12), None, None),
        Err(FilterError::InvalidDateRange)
    );
    assert_eq!(
        SlotRange::new(None, None, time(18, 0), time(9, 0)),
        Err(FilterError::InvalidTimeRange)
    );
}

#[test]
fn test_slot_range_description() {
    let range = SlotRange::new(date(2025, 10, 12), None, None, time(18, 0)).unwrap();

    assert_eq!(
        range.describe(),
        "with timeslots starting from 2025-10-12 and ending by 18:00"
    );
    assert_eq!(SlotRange::default().describe(), "with no time filter applied.");
}

#[test]
fn test_keywords_match_date_or_start_time() {
    let morning = booked("Alice Tan", "91234567", "2025-10-12 0900-1000");
    let evening = booked("Ben Lim", "92345678", "2025-10-13 1800-1900");
    let unbooked = person("No Slot", "90000000");

    let by_date = SlotKeywords::parse("2025-10-12").unwrap();
    let by_time = SlotKeywords::parse("1800").unwrap();
    let either = SlotKeywords::new(["2025-10-12", "1800"]).unwrap();

    assert!(by_date.matches(&morning));
    assert!(!by_date.matches(&evening));
    assert!(by_time.matches(&evening));
    assert!(!by_time.matches(&morning));
    assert!(either.matches(&morning) && either.matches(&evening));
    assert!(!either.matches(&unbooked));
}

#[test]
fn test_keywords_do_not_match_end_time() {
    let lesson = booked("Alice Tan", "91234567", "2025-10-12 0900-1000");
    assert!(!SlotKeywords::parse("1000").unwrap().matches(&lesson));
}

#[rstest]
#[case("tomorrow")]
#[case("2025-02-30")]
#[case("2500")]
#[case("900")]
fn test_keywords_reject_invalid_input(#[case] keyword: &str) {
    assert_eq!(
        SlotKeywords::parse(keyword),
        Err(FilterError::InvalidKeyword(keyword.to_string()))
    );
}

#[test]
fn test_keywords_require_at_least_one() {
    assert_eq!(SlotKeywords::parse("   "), Err(FilterError::EmptyKeywords));
}
