use std::fmt::Display;

use serde::Serialize;

use crate::logging::get_log_file_path;
use crate::server::error_mapping::ToStructuredError;

#[derive(Serialize)]
pub struct ErrorMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    pub code: String,
    /// Offending request field, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Serialize)]
pub struct StructuredError {
    pub logs: String,
    pub messages: Vec<ErrorMessage>,
}

impl StructuredError {
    #[must_use]
    pub fn new(code: &str, message: String) -> Self {
        Self {
            logs: get_log_file_path().to_string(),
            messages: vec![ErrorMessage {
                message,
                tip: None,
                code: code.to_string(),
                field: None,
            }],
        }
    }

    #[must_use]
    pub fn with_tip(mut self, tip: &str) -> Self {
        if let Some(msg) = self.messages.first_mut() {
            msg.tip = Some(tip.to_string());
        }
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: &str) -> Self {
        if let Some(msg) = self.messages.first_mut() {
            msg.field = Some(field.to_string());
        }
        self
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"logs":"","messages":[{"message":"serialization error","code":"INTERNAL_ERROR"}]}"#
                .to_string()
        })
    }
}

/// Convert a domain error into a structured JSON error string.
#[must_use]
pub fn to_error_json<E: ToStructuredError + Display>(err: &E) -> String {
    let (code, tip) = err.error_code_and_tip();
    let mut se = StructuredError::new(code, err.to_string());
    if let Some(tip) = tip {
        se = se.with_tip(tip);
    }
    if let Some(field) = err.error_field() {
        se = se.with_field(field);
    }
    se.to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemError;

    #[test]
    fn test_structured_error_json_format() {
        let se = StructuredError::new("ITEM_NOT_FOUND", "Item not found: abc".to_string());
        let parsed: serde_json::Value = serde_json::from_str(&se.to_json()).unwrap();
        assert_eq!(parsed["messages"][0]["code"], "ITEM_NOT_FOUND");
        assert_eq!(parsed["messages"][0]["message"], "Item not found: abc");
        assert!(parsed["messages"][0].get("tip").is_none());
        assert!(parsed["messages"][0].get("field").is_none());
        assert!(parsed.get("logs").is_some());
    }

    #[test]
    fn test_structured_error_with_tip() {
        let se = StructuredError::new("INVALID_TRANSITION", "nope".to_string())
            .with_tip("Only pending items can be moderated");
        let parsed: serde_json::Value = serde_json::from_str(&se.to_json()).unwrap();
        assert_eq!(
            parsed["messages"][0]["tip"],
            "Only pending items can be moderated"
        );
    }

    #[test]
    fn test_to_error_json_carries_field() {
        let err = ItemError::validation("postedByEmail", "is not a valid email address");
        let parsed: serde_json::Value = serde_json::from_str(&to_error_json(&err)).unwrap();
        assert_eq!(parsed["messages"][0]["code"], "VALIDATION_ERROR");
        assert_eq!(parsed["messages"][0]["field"], "postedByEmail");
    }
}
