pub mod mutations;
pub mod queries;

pub use mutations::*;
pub use queries::*;
