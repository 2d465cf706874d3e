use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Parses a raw export document and returns its message records.
///
/// A missing `messages` field reads as an empty export. A non-object root or
/// a `messages` field that is not an array is a structural input error.
pub fn parse_export(input: &str) -> Result<Vec<Value>> {
    let parsed =
        serde_json::from_str::<Value>(input).context("export payload must be valid JSON")?;
    let Some(object) = parsed.as_object() else {
        bail!("export payload root must be an object");
    };

    match object.get("messages") {
        None => Ok(Vec::new()),
        Some(Value::Array(messages)) => Ok(messages.clone()),
        Some(_) => bail!("export `messages` field must be an array"),
    }
}

/// Conversation id under `conversationIdentity.conversationId`. Wrong-typed
/// or empty values read as absent, never as errors.
#[must_use]
pub fn conversation_id(message: &Value) -> Option<&str> {
    let id = message
        .get("conversationIdentity")?
        .get("conversationId")?
        .as_str()?;
    if id.is_empty() { None } else { Some(id) }
}

#[must_use]
pub fn created_date_time(message: &Value) -> Option<&str> {
    message.get("createdDateTime")?.as_str()
}

/// Message body under `body.content`; absent, null, or wrong-typed values
/// read as the empty string.
#[must_use]
pub fn body_content(message: &Value) -> &str {
    message
        .get("body")
        .and_then(|body| body.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{body_content, conversation_id, created_date_time, parse_export};

    #[test]
    fn missing_messages_field_reads_as_empty_export() {
        let messages = parse_export("{}").expect("empty export should parse");
        assert!(messages.is_empty());
    }

    #[test]
    fn non_object_root_is_a_structural_error() {
        let err = parse_export("[]").expect_err("array root must fail");
        assert!(err.to_string().contains("root must be an object"));
    }

    #[test]
    fn non_array_messages_field_is_a_structural_error() {
        let err =
            parse_export(r#"{"messages": "nope"}"#).expect_err("string messages must fail");
        assert!(err.to_string().contains("must be an array"));
    }

    #[test]
    fn invalid_json_is_a_structural_error() {
        let err = parse_export("{not json").expect_err("invalid json must fail");
        assert!(err.to_string().contains("must be valid JSON"));
    }

    #[test]
    fn reads_conversation_id_from_nested_identity() {
        let message = json!({"conversationIdentity": {"conversationId": "T1"}});
        assert_eq!(conversation_id(&message), Some("T1"));
    }

    #[test]
    fn wrong_typed_conversation_identity_reads_as_absent() {
        assert_eq!(conversation_id(&json!({"conversationIdentity": "T1"})), None);
        assert_eq!(
            conversation_id(&json!({"conversationIdentity": {"conversationId": 7}})),
            None
        );
        assert_eq!(
            conversation_id(&json!({"conversationIdentity": {"conversationId": ""}})),
            None
        );
        assert_eq!(conversation_id(&json!({})), None);
    }

    #[test]
    fn null_or_missing_body_content_reads_as_empty() {
        assert_eq!(body_content(&json!({"body": {"content": null}})), "");
        assert_eq!(body_content(&json!({"body": {}})), "");
        assert_eq!(body_content(&json!({})), "");
        assert_eq!(body_content(&json!({"body": {"content": "hi"}})), "hi");
    }

    #[test]
    fn reads_created_date_time_when_string() {
        let message = json!({"createdDateTime": "2024-01-01T00:00:00Z"});
        assert_eq!(created_date_time(&message), Some("2024-01-01T00:00:00Z"));
        assert_eq!(created_date_time(&json!({"createdDateTime": 5})), None);
        assert_eq!(created_date_time(&json!({})), None);
    }
}
