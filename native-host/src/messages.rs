use notes_engine::{DEFAULT_PAGE_TITLE, SaveRequest, SavedNote};
use serde::Serialize;
use serde_json::Value;
use utils::native_messaging::Message;

/// A decoded request from the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Save(SaveRequest),
    Ping,
    /// Anything else, carrying the action as it should be echoed back.
    Unknown(String),
}

impl Request {
    pub fn from_message(message: &Message) -> Self {
        match message.get("action") {
            Some(Value::String(action)) if action == "save" => Request::Save(SaveRequest {
                vault_path: string_field(message, "vaultPath").unwrap_or_default(),
                content: string_field(message, "content").unwrap_or_default(),
                page_title: string_field(message, "pageTitle")
                    .unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string()),
            }),
            Some(Value::String(action)) if action == "ping" => Request::Ping,
            Some(Value::String(action)) => Request::Unknown(action.clone()),
            None | Some(Value::Null) => Request::Unknown("None".to_string()),
            Some(Value::Bool(true)) => Request::Unknown("True".to_string()),
            Some(Value::Bool(false)) => Request::Unknown("False".to_string()),
            Some(other) => Request::Unknown(other.to_string()),
        }
    }
}

/// Non-string values count as missing.
fn string_field(message: &Message, key: &str) -> Option<String> {
    message.get(key).and_then(Value::as_str).map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub success: bool,
    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Saved(SavedNote),
    Status {
        status: String,
    },
    Failed {
        error: String,
    },
}

impl Response {
    pub fn saved(note: SavedNote) -> Self {
        Self {
            success: true,
            body: ResponseBody::Saved(note),
        }
    }

    pub fn connected() -> Self {
        Self {
            success: true,
            body: ResponseBody::Status {
                status: "connected".to_string(),
            },
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            body: ResponseBody::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn unknown_action(action: &str) -> Self {
        Self::failed(format!("Unknown action: {}", action))
    }
}
