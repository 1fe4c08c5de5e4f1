//! Configuration loaded from `.fieldseal.toml`.

pub mod settings;

pub use settings::{BackendKind, Settings};
