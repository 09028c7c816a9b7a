use serde::{Deserialize, Serialize};

/// `{ "error": "..." }`, the envelope used by every JSON error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `{ "message": "..." }`, used by the duplicate-vaccination rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}
