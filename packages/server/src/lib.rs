// Teaching Resources Hub - API Core
//
// Serves the resource catalog and a single-user favorites store over HTTP.
// The catalog is loaded once from a JSON document; favorites live behind a
// repository trait so storage can be swapped without touching handlers.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
