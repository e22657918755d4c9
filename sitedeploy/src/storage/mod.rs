//! Persisted configuration

pub mod settings;
