//! Storage domain - Generic document store abstraction

mod entity;
mod filter;
mod repository;

pub use entity::{Document, DocumentId, StorageEntity};
pub use filter::Filter;
pub use repository::Storage;

#[cfg(test)]
pub use repository::mock;
