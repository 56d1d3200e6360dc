//! Application layer orchestrating domain logic and infrastructure.

pub mod catalog;
pub mod export;
pub mod extract;
pub mod pipeline;
pub mod selection;
