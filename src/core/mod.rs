//! Core services and infrastructure

pub mod error_handling;
pub mod logging;
pub mod styles; // styling palette for help output & the console renderer
pub mod validation;
pub mod version;
