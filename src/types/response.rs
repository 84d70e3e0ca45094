//! Small response bodies shared by handlers.

use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User deleted")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
