//! Attendance and payroll configuration.
//!
//! One [`AttendanceSettings`] document drives the whole engine: the grace
//! window for lateness, the weekly-off days, and the hour thresholds that
//! split full days, half days, and overtime. Settings are persisted as a
//! single JSON document in the storage collaborator and fall back to
//! [`AttendanceSettings::default`] when nothing has been saved yet.
//!
//! # Example
//!
//! ```
//! use attend_engine::config::AttendanceSettings;
//! use chrono::NaiveTime;
//!
//! let settings = AttendanceSettings::default();
//! assert_eq!(settings.grace_period_minutes, 15);
//! assert_eq!(settings.shift_start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
//! assert_eq!(settings.weekly_off, vec![0]); // Sunday
//! ```

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Tunable parameters for attendance interpretation and payroll.
///
/// Weekday indices in `weekly_off` follow the 0 = Sunday .. 6 = Saturday
/// convention used by the scan devices' upstream tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSettings {
    /// Minutes after shift start before a clock-in counts as late.
    pub grace_period_minutes: u32,
    /// Weekday indices (0 = Sunday .. 6 = Saturday) that are not working days.
    pub weekly_off: Vec<u8>,
    /// Default shift start; employees may carry an individual override.
    pub shift_start: NaiveTime,
    /// Default shift end.
    pub shift_end: NaiveTime,
    /// Days shorter than this many hours are recorded as half days.
    pub half_day_hours: Decimal,
    /// Nominal full-day length in hours.
    pub full_day_hours: Decimal,
    /// Hours beyond this threshold in a day count as overtime.
    pub overtime_after_hours: Decimal,
    /// Percent of monthly salary deducted per late day.
    pub late_penalty_percent: Decimal,
}

impl Default for AttendanceSettings {
    fn default() -> Self {
        AttendanceSettings {
            grace_period_minutes: 15,
            weekly_off: vec![0],
            shift_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            shift_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            half_day_hours: Decimal::new(4, 0),
            full_day_hours: Decimal::new(8, 0),
            overtime_after_hours: Decimal::new(9, 0),
            late_penalty_percent: Decimal::new(2, 0),
        }
    }
}

impl AttendanceSettings {
    /// Returns true if the given date falls on a configured weekly-off day.
    ///
    /// # Example
    ///
    /// ```
    /// use attend_engine::config::AttendanceSettings;
    /// use chrono::NaiveDate;
    ///
    /// let settings = AttendanceSettings::default();
    /// // 2026-01-04 is a Sunday
    /// assert!(settings.is_weekly_off(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap()));
    /// assert!(!settings.is_weekly_off(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()));
    /// ```
    pub fn is_weekly_off(&self, date: NaiveDate) -> bool {
        let index = date.weekday().num_days_from_sunday() as u8;
        self.weekly_off.contains(&index)
    }

    /// Checks the settings document for values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns a validation error for weekday indices outside `0..=6`, a
    /// weekly-off set covering every weekday, or negative hour thresholds
    /// and penalty percentages.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(bad) = self.weekly_off.iter().find(|&&d| d > 6) {
            return Err(EngineError::Validation {
                field: "weekly_off".to_string(),
                message: format!("weekday index {bad} is outside 0..=6"),
            });
        }
        let mut distinct = self.weekly_off.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() == 7 {
            return Err(EngineError::Validation {
                field: "weekly_off".to_string(),
                message: "every weekday is marked as off".to_string(),
            });
        }
        let thresholds = [
            ("half_day_hours", self.half_day_hours),
            ("full_day_hours", self.full_day_hours),
            ("overtime_after_hours", self.overtime_after_hours),
            ("late_penalty_percent", self.late_penalty_percent),
        ];
        for (field, value) in thresholds {
            if value < Decimal::ZERO {
                return Err(EngineError::Validation {
                    field: field.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_deployment_baseline() {
        let settings = AttendanceSettings::default();
        assert_eq!(settings.grace_period_minutes, 15);
        assert_eq!(settings.weekly_off, vec![0]);
        assert_eq!(
            settings.shift_start,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            settings.shift_end,
            NaiveTime::from_hms_opt(18, 0, 0).unwrap()
        );
        assert_eq!(settings.half_day_hours, Decimal::new(4, 0));
        assert_eq!(settings.full_day_hours, Decimal::new(8, 0));
        assert_eq!(settings.overtime_after_hours, Decimal::new(9, 0));
        assert_eq!(settings.late_penalty_percent, Decimal::new(2, 0));
    }

    #[test]
    fn test_is_weekly_off_for_default_sunday() {
        let settings = AttendanceSettings::default();
        // 2026-01-04 is a Sunday, 2026-01-05 a Monday
        assert!(settings.is_weekly_off(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap()));
        assert!(!settings.is_weekly_off(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()));
    }

    #[test]
    fn test_is_weekly_off_with_two_day_weekend() {
        let settings = AttendanceSettings {
            weekly_off: vec![0, 6],
            ..AttendanceSettings::default()
        };
        // 2026-01-03 is a Saturday
        assert!(settings.is_weekly_off(NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()));
        assert!(settings.is_weekly_off(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap()));
        assert!(!settings.is_weekly_off(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(AttendanceSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_weekday_index_out_of_range() {
        let settings = AttendanceSettings {
            weekly_off: vec![0, 7],
            ..AttendanceSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_every_day_off() {
        let settings = AttendanceSettings {
            weekly_off: vec![0, 1, 2, 3, 4, 5, 6],
            ..AttendanceSettings::default()
        };
        assert!(settings.validate().is_err());

        // Duplicates of a partial set are still fine.
        let settings = AttendanceSettings {
            weekly_off: vec![0, 0, 6, 6],
            ..AttendanceSettings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        let settings = AttendanceSettings {
            half_day_hours: Decimal::new(-1, 0),
            ..AttendanceSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_serde_round_trips() {
        let settings = AttendanceSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: AttendanceSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }
}
