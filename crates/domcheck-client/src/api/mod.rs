//! Resolver endpoint modules.

mod records;

pub use records::{QueryBuilder, RecordsApi};
