// src/validation/mod.rs

pub mod essay;

pub use essay::{EssayValidationError, essay_from_value, validate_essay};
