//! Search backend adapters.

mod searx;

pub use searx::SearxClient;
