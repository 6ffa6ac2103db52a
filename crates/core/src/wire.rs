//! JSON envelope shared by every `/api` response.
//!
//! ```json
//! { "success": true, "message": "Order placed successfully", "data": { ... } }
//! { "success": false, "message": "First name is required" }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, message: None, data: Some(data) }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: Some(message.into()), data: Some(data) }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl ApiEnvelope<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), data: None }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ApiEnvelope;

    #[test]
    fn failure_omits_data() {
        let value = serde_json::to_value(ApiEnvelope::failure("Address is required"))
            .expect("serialize");

        assert_eq!(value, json!({ "success": false, "message": "Address is required" }));
    }

    #[test]
    fn success_omits_message_unless_given() {
        let bare = serde_json::to_value(ApiEnvelope::success(vec![1, 2])).expect("serialize");
        let with_message =
            serde_json::to_value(ApiEnvelope::success_with_message("ok", 3)).expect("serialize");

        assert_eq!(bare, json!({ "success": true, "data": [1, 2] }));
        assert_eq!(with_message, json!({ "success": true, "message": "ok", "data": 3 }));
    }

    #[test]
    fn decodes_envelopes_without_optional_fields() {
        let envelope: ApiEnvelope<Vec<u32>> =
            serde_json::from_value(json!({ "success": false })).expect("decode");

        assert!(!envelope.success);
        assert!(envelope.message.is_none());
        assert!(envelope.into_data().is_none());
    }
}
