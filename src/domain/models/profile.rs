use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const UNKNOWN_USER: &str = "unknown";
const DEFAULT_PHONE: &str = "N/A";
const DEFAULT_FULL_NAME: &str = "Chatbot User";
const DEFAULT_ROLE: &str = "client";
const PLACEHOLDER_EMAIL_DOMAIN: &str = "temp.com";

/// Decoded user-profile payload: string keys mapped to scalar values.
///
/// No key is required here and no value is validated; accessors only fall
/// back to defaults for keys that are absent or null. Anything the profile
/// table refuses is rejected by the datastore on insert.
#[derive(Debug, Clone, Default)]
pub struct UserProfileInput {
    fields: Map<String, Value>,
}

impl UserProfileInput {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    fn scalar(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn user_id(&self) -> String {
        self.scalar("whatsappId")
            .unwrap_or_else(|| UNKNOWN_USER.to_string())
    }

    pub fn email(&self) -> String {
        self.scalar("email")
            .unwrap_or_else(|| format!("{}@{}", self.user_id(), PLACEHOLDER_EMAIL_DOMAIN))
    }

    pub fn phone(&self) -> String {
        self.scalar("phone")
            .unwrap_or_else(|| DEFAULT_PHONE.to_string())
    }

    pub fn full_name(&self) -> String {
        self.scalar("name")
            .or_else(|| self.scalar("full_name"))
            .unwrap_or_else(|| DEFAULT_FULL_NAME.to_string())
    }

    pub fn role(&self) -> String {
        self.scalar("role")
            .unwrap_or_else(|| DEFAULT_ROLE.to_string())
    }

    /// Text handed to the embedding providers.
    pub fn embedding_text(&self) -> String {
        format!(
            "WhatsApp user profile ID {}. Data: {}",
            self.user_id(),
            Value::Object(self.fields.clone())
        )
    }
}

/// One row of the profile table: identity fields plus the embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub email: String,
    pub phone: String,
    pub full_name: String,
    pub role: String,
    pub embedding: Vec<f32>,
}

impl ProfileRecord {
    pub fn from_input(input: &UserProfileInput, embedding: Vec<f32>) -> Self {
        Self {
            email: input.email(),
            phone: input.phone(),
            full_name: input.full_name(),
            role: input.role(),
            embedding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> UserProfileInput {
        match value {
            Value::Object(map) => UserProfileInput::new(map),
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let profile = input(json!({ "whatsappId": "123" }));

        assert_eq!(profile.user_id(), "123");
        assert_eq!(profile.email(), "123@temp.com");
        assert_eq!(profile.phone(), "N/A");
        assert_eq!(profile.full_name(), "Chatbot User");
        assert_eq!(profile.role(), "client");
    }

    #[test]
    fn test_unknown_user_when_id_missing() {
        let profile = input(json!({}));
        assert_eq!(profile.user_id(), "unknown");
        assert_eq!(profile.email(), "unknown@temp.com");
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let profile = input(json!({ "whatsappId": 5215512345678u64 }));
        assert_eq!(profile.user_id(), "5215512345678");
    }

    #[test]
    fn test_full_name_falls_back_to_ingress_key() {
        let profile = input(json!({ "full_name": "User 42" }));
        assert_eq!(profile.full_name(), "User 42");

        let profile = input(json!({ "name": "Ana", "full_name": "User 42" }));
        assert_eq!(profile.full_name(), "Ana");
    }

    #[test]
    fn test_role_is_passed_through_verbatim() {
        assert_eq!(input(json!({ "role": "Lawyer" })).role(), "Lawyer");
        assert_eq!(input(json!({ "role": "admin" })).role(), "admin");
        assert_eq!(input(json!({ "role": null })).role(), "client");
    }

    #[test]
    fn test_blank_strings_are_kept() {
        let profile = input(json!({ "whatsappId": "1", "email": "", "phone": " ", "name": "" }));

        assert_eq!(profile.email(), "");
        assert_eq!(profile.phone(), " ");
        assert_eq!(profile.full_name(), "");
    }

    #[test]
    fn test_embedding_text_mentions_id_and_payload() {
        let profile = input(json!({ "whatsappId": "123", "email": "a@b.com" }));
        let text = profile.embedding_text();

        assert!(text.starts_with("WhatsApp user profile ID 123."));
        assert!(text.contains(r#""email":"a@b.com""#));
    }

    #[test]
    fn test_embedding_text_keeps_payload_key_order() {
        let fields: Map<String, Value> =
            serde_json::from_str(r#"{"whatsappId":"7","zeta":1,"alpha":"x"}"#).unwrap();
        let text = UserProfileInput::new(fields).embedding_text();

        assert_eq!(
            text,
            r#"WhatsApp user profile ID 7. Data: {"whatsappId":"7","zeta":1,"alpha":"x"}"#
        );
    }

    #[test]
    fn test_record_serializes_table_columns() {
        let profile = input(json!({ "whatsappId": "123", "email": "a@b.com" }));
        let record = ProfileRecord::from_input(&profile, vec![0.5]);

        let row = serde_json::to_value(&record).unwrap();
        assert_eq!(
            row,
            json!({
                "email": "a@b.com",
                "phone": "N/A",
                "full_name": "Chatbot User",
                "role": "client",
                "embedding": [0.5]
            })
        );
    }
}
