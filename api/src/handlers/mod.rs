pub mod error;

pub use error::{json_error_handler, verify_error_response};
