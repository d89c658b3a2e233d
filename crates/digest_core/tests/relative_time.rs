use chrono::{DateTime, Duration, Local, TimeZone};
use digest_core::{relative_time, UNKNOWN_TIME};

fn fixed_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .expect("unambiguous local time")
}

fn ago(now: DateTime<Local>, delta: Duration) -> String {
    (now - delta).to_rfc3339()
}

#[test]
fn under_two_minutes_is_just_now() {
    let now = fixed_now();
    assert_eq!(relative_time(&ago(now, Duration::seconds(30)), now), "just now");
    assert_eq!(relative_time(&ago(now, Duration::seconds(90)), now), "just now");
}

#[test]
fn minutes_within_the_hour() {
    let now = fixed_now();
    assert_eq!(
        relative_time(&ago(now, Duration::minutes(5)), now),
        "5 minutes ago"
    );
    assert_eq!(
        relative_time(&ago(now, Duration::minutes(59)), now),
        "59 minutes ago"
    );
}

#[test]
fn hours_within_the_day() {
    let now = fixed_now();
    assert_eq!(
        relative_time(&ago(now, Duration::minutes(90)), now),
        "1 hour ago"
    );
    assert_eq!(
        relative_time(&ago(now, Duration::hours(23)), now),
        "23 hours ago"
    );
}

#[test]
fn one_day_is_yesterday() {
    let now = fixed_now();
    assert_eq!(relative_time(&ago(now, Duration::hours(25)), now), "yesterday");
    assert_eq!(relative_time(&ago(now, Duration::hours(47)), now), "yesterday");
}

#[test]
fn days_within_the_week() {
    let now = fixed_now();
    assert_eq!(relative_time(&ago(now, Duration::days(2)), now), "2 days ago");
    assert_eq!(relative_time(&ago(now, Duration::days(6)), now), "6 days ago");
}

#[test]
fn a_week_or_more_is_a_calendar_date() {
    let now = fixed_now();
    assert_eq!(relative_time(&ago(now, Duration::days(10)), now), "2024/6/5");
    assert_eq!(relative_time(&ago(now, Duration::days(7)), now), "2024/6/8");
}

#[test]
fn naive_timestamps_are_local_time() {
    let now = fixed_now();
    assert_eq!(relative_time("2024-06-15 09:00:00", now), "3 hours ago");
    assert_eq!(relative_time("2024-06-15T11:30", now), "30 minutes ago");
    assert_eq!(relative_time("2024-06-14", now), "yesterday");
}

#[test]
fn unparsable_input_is_returned_unchanged() {
    let now = fixed_now();
    assert_eq!(relative_time("sometime last week", now), "sometime last week");
    assert_eq!(relative_time("", now), UNKNOWN_TIME);
    assert_eq!(relative_time("   ", now), UNKNOWN_TIME);
}

#[test]
fn future_timestamps() {
    let now = fixed_now();
    assert_eq!(relative_time(&ago(now, Duration::seconds(-20)), now), "just now");
    assert_eq!(relative_time(&ago(now, Duration::days(-2)), now), "2024/6/17");
}
