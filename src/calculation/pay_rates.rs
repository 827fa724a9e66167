//! Per-day and per-hour rate derivation from the monthly salary.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// The rate basis every salary type derives from.
#[derive(Debug, Clone, PartialEq)]
pub struct RateBasis {
    /// Monthly salary divided by the month's working days.
    pub per_day: Decimal,
    /// The daily rate divided by the nominal hours in a working day.
    pub per_hour: Decimal,
}

/// Derives the rate basis for one employee-month.
///
/// The nominal working day is `weekly_hours / 5` when contracted weekly
/// hours are set and positive, and 8 hours otherwise.
///
/// # Errors
///
/// A month with zero working days has no meaningful daily rate and yields
/// a calculation error.
///
/// # Example
///
/// ```
/// use attend_engine::calculation::derive_rate_basis;
/// use rust_decimal::Decimal;
///
/// let basis = derive_rate_basis(Decimal::new(30000, 0), 20, None).unwrap();
/// assert_eq!(basis.per_day, Decimal::new(1500, 0));
/// assert_eq!(basis.per_hour, Decimal::new(18750, 2)); // 1500 / 8
/// ```
pub fn derive_rate_basis(
    monthly_salary: Decimal,
    working_days: u32,
    weekly_hours: Option<Decimal>,
) -> EngineResult<RateBasis> {
    if working_days == 0 {
        return Err(EngineError::Calculation {
            message: "month has no working days to derive a daily rate from".to_string(),
        });
    }

    let per_day = monthly_salary / Decimal::from(working_days);
    let daily_hours = match weekly_hours {
        Some(weekly) if weekly > Decimal::ZERO => weekly / Decimal::from(5),
        _ => Decimal::from(8),
    };

    Ok(RateBasis {
        per_day,
        per_hour: per_day / daily_hours,
    })
}
