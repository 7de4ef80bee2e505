//! Product catalog (reference data).
//!
//! The catalog is the input to every forecasting computation. It is plain,
//! immutable data: no IO, no storage. Whatever owns the real catalog (ERP,
//! upload, database) hands us a list of `Product`s.

pub mod catalog;
pub mod product;

pub use catalog::Catalog;
pub use product::Product;
