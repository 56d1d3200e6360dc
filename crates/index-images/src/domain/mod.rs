//! Core domain types and validation rules.

pub mod errors;
pub mod model;
