pub mod feed;
pub mod queries;

pub use feed::*;
pub use queries::*;
