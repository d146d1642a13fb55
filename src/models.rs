use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Project object exactly as returned by the Scratch API.
pub type ProjectRecord = Map<String, Value>;

/// Project-detail payload. Kept as raw JSON so that any well-formed body,
/// object or not, reads as "no author" rather than a decode failure.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct ProjectDetail(pub Value);

impl ProjectDetail {
    /// Owning account's handle, if the payload carries a non-empty one.
    pub fn author_username(&self) -> Option<String> {
        self.0
            .get("author")
            .and_then(|author| author.get("username"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EnrichedProject {
    #[serde(flatten)]
    pub project: ProjectRecord,
    pub published_date: String,
    pub modified_date: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserProfile {
    #[serde(rename = "user_info")]
    pub account_profile: Value,
    pub projects: Vec<EnrichedProject>,
    pub resolved_username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
