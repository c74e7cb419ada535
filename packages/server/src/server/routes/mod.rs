// HTTP routes
pub mod api_v1;
pub mod favorites;
pub mod feeds;
pub mod health;
pub mod resources;

pub use api_v1::*;
pub use favorites::*;
pub use feeds::*;
pub use health::*;
pub use resources::*;
