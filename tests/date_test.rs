mod common;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use runeparse::parse::prelude::*;
use runeparse::Stream;

lazy_static! {
    static ref YEAR: BoxedParser = times(to_integer(), 4, zero_to_nine());
    static ref MONTH: BoxedParser = all(to_integer(), vec![rune_in("01"), zero_to_nine()]);
    static ref DAY: BoxedParser = all(to_integer(), vec![rune_in("0123"), zero_to_nine()]);
    static ref DATE: BoxedParser = all(
        as_date(),
        vec![YEAR.clone(), rune('-'), MONTH.clone(), rune('-'), DAY.clone()],
    );
}

// Keeps year, month and day as integers, rejecting impossible dates.
fn as_date() -> Combiner {
    Combiner::new("date", |items| {
        let year = items.first()?.as_integer()?;
        let month = items.get(2)?.as_integer()?;
        let day = items.get(4)?.as_integer()?;
        to_naive_date(year, month, day)?;
        Some(Item::Sequence(vec![
            Item::Integer(year),
            Item::Integer(month),
            Item::Integer(day),
        ]))
    })
}

fn to_naive_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

fn parse_date(text: &str) -> (Option<NaiveDate>, i64) {
    let mut stream = Stream::from_text(text);
    let date = DATE.parse(&mut stream).into_item().and_then(|item| {
        match item.as_sequence()? {
            [year, month, day] => {
                to_naive_date(year.as_integer()?, month.as_integer()?, day.as_integer()?)
            }
            _ => None,
        }
    });
    (date, stream.index())
}

#[test]
fn it_parses_dates() {
    assert_eq!(
        parse_date("2001-02-03"),
        (NaiveDate::from_ymd_opt(2001, 2, 3), 10)
    );
    assert_eq!(
        parse_date("2024-12-31T10:00"),
        (NaiveDate::from_ymd_opt(2024, 12, 31), 10)
    );
}

#[test]
fn it_rejects_non_dates_without_consuming() {
    assert_eq!(parse_date("clearly not a date"), (None, 0));
    assert_eq!(parse_date("201-01-1"), (None, 0));
    assert_eq!(parse_date("2001-02-"), (None, 0));
}

#[test]
fn it_rejects_impossible_dates() {
    assert_eq!(parse_date("2001-02-30"), (None, 0));
    assert_eq!(parse_date("2001-19-01"), (None, 0));
}

#[test]
fn it_reports_the_failing_part() {
    let mut stream = Stream::from_text("2001/02/03");
    let result = DATE.parse(&mut stream);
    assert!(!result.is_success());
    assert_eq!(result.name(), "rune '-'");
    assert_eq!(
        result.to_string(),
        "✗ (rune '-') err: rune '-': expected '-', found '/'"
    );
}
