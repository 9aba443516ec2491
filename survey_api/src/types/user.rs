use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub jwt: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `PUT /api/v1/user`. Unchanged fields are sent as `null`;
/// `new_password` is omitted when the password stays the same.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub old_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

impl UserUpdate {
    pub fn changes_password(&self) -> bool {
        self.new_password.is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PasswordConfirmation {
    pub password: String,
}
