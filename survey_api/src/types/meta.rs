use serde::{Deserialize, Serialize};

/// Body of the `/count` endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Count {
    pub count: u64,
}

/// Error body the backend attaches to rejected requests.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub human_message: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
