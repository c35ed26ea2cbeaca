//! Dataset loading: CSV tables to latest-snapshot tables

mod error;
mod loader;
mod records;

pub use error::LoadError;
pub use loader::{Dataset, DatasetLoader};
