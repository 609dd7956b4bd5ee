pub mod builder;
pub mod csv;
pub mod records;

pub use builder::build;
pub use records::{DatasetRow, PostRecord};
