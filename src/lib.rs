//! Attendance and payroll engine for RFID clock-in/clock-out tracking
//!
//! This crate processes card scans into attendance records, derives
//! late/half-day/overtime outcomes, computes monthly payroll for fixed,
//! hourly, and daily salary types, and renders attendance and payroll
//! reports with CSV export. State lives behind an async key-value
//! storage collaborator and is served over a REST API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod service;
pub mod store;
