//! Gross salary by salary type.

use rust_decimal::Decimal;

use crate::models::SalaryType;

use super::attendance_tally::MonthlyTally;
use super::pay_rates::RateBasis;

/// Computes gross salary before deductions and overtime pay.
///
/// - `Hourly` pays the recorded hours at the derived hourly rate.
/// - `Daily` pays attended days at the daily rate, half days counting 0.5.
/// - `Fixed` pays the monthly salary as-is; attendance shortfalls are
///   handled as deductions, not here.
///
/// # Example
///
/// ```
/// use attend_engine::calculation::{MonthlyTally, RateBasis, gross_salary};
/// use attend_engine::models::SalaryType;
/// use rust_decimal::Decimal;
///
/// let tally = MonthlyTally {
///     present_days: 20,
///     half_days: 2,
///     late_days: 0,
///     absent_days: 0,
///     total_hours: Decimal::new(180, 0),
///     total_overtime_hours: Decimal::ZERO,
/// };
/// let rates = RateBasis {
///     per_day: Decimal::new(1000, 0),
///     per_hour: Decimal::new(125, 0),
/// };
///
/// let daily = gross_salary(SalaryType::Daily, Decimal::new(26000, 0), &rates, &tally);
/// assert_eq!(daily, Decimal::new(21000, 0)); // (20 + 2 * 0.5) * 1000
/// ```
pub fn gross_salary(
    salary_type: SalaryType,
    monthly_salary: Decimal,
    rates: &RateBasis,
    tally: &MonthlyTally,
) -> Decimal {
    match salary_type {
        SalaryType::Hourly => tally.total_hours * rates.per_hour,
        SalaryType::Daily => {
            let attended =
                Decimal::from(tally.present_days) + Decimal::new(5, 1) * Decimal::from(tally.half_days);
            attended * rates.per_day
        }
        SalaryType::Fixed => monthly_salary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn tally(present: u32, half: u32, hours: &str) -> MonthlyTally {
        MonthlyTally {
            present_days: present,
            half_days: half,
            late_days: 0,
            absent_days: 0,
            total_hours: dec(hours),
            total_overtime_hours: Decimal::ZERO,
        }
    }

    fn rates() -> RateBasis {
        RateBasis {
            per_day: dec("1500"),
            per_hour: dec("187.5"),
        }
    }

    #[test]
    fn test_fixed_gross_is_the_monthly_salary() {
        let gross = gross_salary(SalaryType::Fixed, dec("30000"), &rates(), &tally(10, 0, "80"));
        assert_eq!(gross, dec("30000"));
    }

    #[test]
    fn test_hourly_gross_multiplies_recorded_hours() {
        let gross = gross_salary(SalaryType::Hourly, dec("30000"), &rates(), &tally(0, 0, "160"));
        assert_eq!(gross, dec("30000.0"));
    }

    #[test]
    fn test_daily_gross_counts_half_days_at_half() {
        let gross = gross_salary(SalaryType::Daily, dec("30000"), &rates(), &tally(18, 3, "0"));
        assert_eq!(gross, dec("29250.0")); // (18 + 1.5) * 1500
    }

    #[test]
    fn test_daily_gross_with_no_attendance_is_zero() {
        let gross = gross_salary(SalaryType::Daily, dec("30000"), &rates(), &tally(0, 0, "0"));
        assert_eq!(gross, dec("0"));
    }
}
