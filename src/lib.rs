// src/lib.rs

pub mod config;
pub mod document;
pub mod error;
pub mod generation;
pub mod model;
pub mod pipeline;
pub mod sanitize;
pub mod session;
pub mod ui;
pub mod validation;

pub use error::{Result, TodoError};
