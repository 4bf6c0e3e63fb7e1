//! Search engine implementations.

mod google;

pub use google::{GoogleConfig, GoogleCustomSearch, DEFAULT_BASE_URL};
