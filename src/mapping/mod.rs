// src/mapping/mod.rs
pub mod columns;
pub mod schema;

pub use columns::{ColumnMapper, FormRecord};
pub use schema::OutputSchema;
