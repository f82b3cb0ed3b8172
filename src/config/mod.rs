//! Configuration loading for the Nurse Pay Engine.
//!
//! This module loads the federal bracket schedules, state tax rates and
//! default differentials from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use nurse_pay_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/us_2023").unwrap();
//! println!("Loaded tax year: {}", config.metadata().year);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DifferentialDefaults, FederalBracketsConfig, ModeDefaults, StateRatesConfig, TaxTables,
    TaxYearMetadata,
};
