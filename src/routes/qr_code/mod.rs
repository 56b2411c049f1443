mod handler;
pub mod model;

pub use handler::{authorize, details, generate, poll};
