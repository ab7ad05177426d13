use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login request body. Missing or non-string fields are treated as wrong
/// credentials.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

impl LoginRequest {
    pub fn username(&self) -> &str {
        self.username.as_ref().and_then(Value::as_str).unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.password.as_ref().and_then(Value::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}
