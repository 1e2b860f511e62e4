use serde::{Deserialize, Serialize};

/// Body of `POST /api/verify`
///
/// Both fields are optional on the wire; a missing field is treated as empty
/// and rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub code: Option<String>,
}

impl VerifyRequest {
    pub fn new(email: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            code: Some(code.into()),
        }
    }
}
