//! Chat turn and wire types shared by the controller, the backend client and
//! the presentation layers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in a chat session
///
/// On the wire `tool_used` and `rationale` are omitted when absent and
/// `sources` is omitted when empty, matching what the answer service expects
/// for user turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_used: None,
            rationale: None,
            sources: Vec::new(),
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        tool_used: impl Into<String>,
        rationale: impl Into<String>,
        sources: Vec<String>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_used: Some(tool_used.into()),
            rationale: Some(rationale.into()),
            sources,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Body POSTed to the answer service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub chat_history: Vec<ChatTurn>,
}

/// Successful answer service reply
///
/// Every field is optional; `null` is treated the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub tool_used: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

pub const NO_RESPONSE: &str = "(No response)";
pub const NOT_AVAILABLE: &str = "N/A";

impl ChatResponse {
    /// Convert into the assistant turn appended to the session, filling in
    /// the defaults for missing fields
    pub fn into_turn(self) -> ChatTurn {
        ChatTurn::assistant(
            self.answer.unwrap_or_else(|| NO_RESPONSE.to_string()),
            self.tool_used.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            self.rationale.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            self.sources.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_user_turn_wire_shape() {
        let json = serde_json::to_value(ChatTurn::user("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn test_assistant_turn_wire_shape() {
        let turn = ChatTurn::assistant("hi", "rag_query_tool", "found it", vec!["a.pdf".into()]);
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["tool_used"], "rag_query_tool");
        assert_eq!(json["sources"], serde_json::json!(["a.pdf"]));
    }

    #[test]
    fn test_response_defaults() {
        let turn = ChatResponse::default().into_turn();
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.content, NO_RESPONSE);
        assert_eq!(turn.tool_used.as_deref(), Some(NOT_AVAILABLE));
        assert_eq!(turn.rationale.as_deref(), Some(NOT_AVAILABLE));
        assert!(turn.sources.is_empty());
    }

    #[test]
    fn test_response_null_fields_use_defaults() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"answer": null, "tool_used": "rag_query_tool", "sources": null}"#,
        )
        .unwrap();
        let turn = response.into_turn();
        assert_eq!(turn.content, NO_RESPONSE);
        assert_eq!(turn.tool_used.as_deref(), Some("rag_query_tool"));
        assert!(turn.sources.is_empty());
    }

    #[test]
    fn test_response_rejects_non_object() {
        assert!(serde_json::from_str::<ChatResponse>("[1, 2]").is_err());
    }

    fn arb_turn() -> impl Strategy<Value = ChatTurn> {
        (
            any::<bool>(),
            ".{0,40}",
            proptest::option::of("[a-z_]{1,12}"),
            proptest::option::of(".{0,30}"),
            proptest::collection::vec("[a-z./]{1,16}", 0..4),
        )
            .prop_map(|(is_user, content, tool_used, rationale, sources)| ChatTurn {
                role: if is_user { Role::User } else { Role::Assistant },
                content,
                tool_used,
                rationale,
                sources,
            })
    }

    proptest! {
        #[test]
        fn request_survives_json_round_trip(turns in proptest::collection::vec(arb_turn(), 0..8)) {
            let request = ChatRequest { chat_history: turns };
            let text = serde_json::to_string(&request).unwrap();
            let back: ChatRequest = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(back, request);
        }
    }
}
