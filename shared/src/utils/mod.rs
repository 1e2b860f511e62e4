//! Common utility functions

pub mod email;
pub mod validation;

pub use email::mask_email;
pub use validation::{is_six_digit_code, normalize_code, normalize_email};
