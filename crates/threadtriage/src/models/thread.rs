use serde::{Deserialize, Serialize};

/// Fixed placeholder written in place of every original author identity.
pub const ANONYMOUS_DISPLAY_NAME: &str = "XXXX";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAuthor {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl MessageAuthor {
    /// The placeholder author is a constant, never derived from input.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            display_name: ANONYMOUS_DISPLAY_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub user: MessageAuthor,
    pub message: String,
}

impl ThreadMessage {
    #[must_use]
    pub fn new(message: String) -> Self {
        Self {
            user: MessageAuthor::anonymous(),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub thread_id: String,
    pub messages: Vec<ThreadMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDocument {
    #[serde(default)]
    pub threads: Vec<Thread>,
}
