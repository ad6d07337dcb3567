pub mod http;

pub use http::{AppState, router};
