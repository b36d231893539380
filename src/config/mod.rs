//! Configuration loaded from `passvault.toml` in the data directory.

pub mod settings;

pub use settings::Settings;
