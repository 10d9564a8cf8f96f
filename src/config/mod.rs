/// Database connection and schema creation
pub mod database;

/// Typed seed data sections of config.toml
pub mod seed;

/// Application settings loading from config.toml
pub mod settings;
