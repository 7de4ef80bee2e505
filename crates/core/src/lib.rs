//! `stockcast-core`: shared building blocks for the forecasting workspace.
//!
//! This crate contains **pure** primitives (no IO, no threads, no clocks).

pub mod entity;
pub mod error;
pub mod id;
pub mod random;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use random::{ConstantRandom, RandomSource, SeededRandom};
