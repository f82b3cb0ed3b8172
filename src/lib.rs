//! Nurse Pay Engine
//!
//! This crate calculates pay for hourly nursing staff: it expands work
//! periods into hours, applies night, weekend, on-call and charge nurse
//! differentials, splits each Monday-starting week into regular time and
//! overtime past 40 hours, and estimates federal and state income tax.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
