//! Display formatting for report cells.
//!
//! Reports render currency in rupees with Indian digit grouping, dates in
//! the short `15 Jan 2026` form, clock times as `HH:MM`, and hour totals
//! with one decimal place. All formatting happens at the report boundary;
//! the calculation modules only ever see [`Decimal`] values.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a monetary amount as whole rupees with en-IN digit grouping.
///
/// The amount is rounded to the nearest rupee (midpoint away from zero)
/// and grouped Indian-style: the last three digits form one group, every
/// group before that has two digits.
///
/// # Example
///
/// ```
/// use attend_engine::report::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456, 0)), "₹1,23,456");
/// assert_eq!(format_currency(Decimal::new(27000, 0)), "₹27,000");
/// assert_eq!(format_currency(Decimal::new(-600, 0)), "₹-600");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let grouped = group_indian(&rounded.abs().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("₹-{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Groups a plain digit string Indian-style: `1234567` becomes `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut parts = Vec::new();
    let mut end = head.len();
    while end > 2 {
        parts.push(&head[end - 2..end]);
        end -= 2;
    }
    parts.push(&head[..end]);
    parts.reverse();
    format!("{},{}", parts.join(","), tail)
}

/// Formats a date in the short report form, e.g. `15 Jan 2026`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Formats a timestamp's clock time as `HH:MM`.
pub fn format_clock_time(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// Formats an hour total with exactly one decimal place.
pub fn format_hours(hours: Decimal) -> String {
    let rounded = hours.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}")
}
