//! Conversion options and CLI configuration

pub mod defaults;
mod settings;

pub use settings::*;
