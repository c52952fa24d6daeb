//! Loading candidate resistor values from disk or the built-in tables.

pub mod catalog;
pub use catalog::{CatalogSource, Error as CatalogError, load_catalog};
