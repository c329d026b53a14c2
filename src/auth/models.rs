//! Authentication data models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded JWT payload
///
/// Tokens are issued elsewhere, so only `exp` is typed; every other claim
/// (including `sub`) is kept as-is in `extra`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// The `sub` claim when it is a string
    pub fn subject(&self) -> Option<&str> {
        self.extra.get("sub").and_then(Value::as_str)
    }
}

/// Identity attached to the request once the bearer token has been verified
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub claims: Claims,
}
