//! Contact forms (`/v1/contact/forms`) and submissions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::{NetworkError, RequestOptions};
use crate::scope::Scope;
use crate::services::normalize::{normalize_items, pick_array, pick_bool, pick_id, pick_str};
use crate::services::ContentApi;
use crate::store::CacheKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOption {
    pub label: String,
    pub value: String,
}

impl FormOption {
    fn from_value(item: &Value) -> Option<Self> {
        match item {
            Value::String(s) => Some(Self {
                label: s.clone(),
                value: s.clone(),
            }),
            other => {
                let value = pick_str(other, &["value", "id", "key"])?;
                Some(Self {
                    label: pick_str(other, &["label", "name", "title"]).unwrap_or_else(|| value.clone()),
                    value,
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Vec<FormOption>,
}

impl FormField {
    pub fn from_value(item: &Value) -> Option<Self> {
        let name = pick_str(item, &["name", "key", "slug"])?;
        let options = pick_array(item, &["options", "choices"])
            .map(|items| items.iter().filter_map(FormOption::from_value).collect())
            .unwrap_or_default();

        Some(Self {
            label: pick_str(item, &["label", "title", "translation.label"]).unwrap_or_else(|| name.clone()),
            kind: pick_str(item, &["type", "field_type", "kind"]).unwrap_or_else(|| "text".to_string()),
            required: pick_bool(item, &["required", "is_required"]).unwrap_or(false),
            placeholder: pick_str(item, &["placeholder", "translation.placeholder"]),
            options,
            name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub id: String,
    pub name: String,
    pub title: Option<String>,
    pub fields: Vec<FormField>,
}

impl ContactForm {
    pub fn from_value(item: &Value) -> Option<Self> {
        let id = pick_id(item)?;
        let fields = pick_array(item, &["fields", "form_fields", "schema.fields"])
            .map(|items| normalize_items(items, "form_fields", FormField::from_value))
            .unwrap_or_default();

        Some(Self {
            name: pick_str(item, &["name", "slug"]).unwrap_or_else(|| id.clone()),
            title: pick_str(item, &["title", "label", "translation.title"]),
            id,
            fields,
        })
    }
}

/// Backend acknowledgement of a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: Option<String>,
    pub message: String,
}

impl SubmissionReceipt {
    fn from_body(body: &Value) -> Self {
        let data = body.get("data").unwrap_or(body);
        Self {
            id: pick_str(data, &["id", "submission_id"]),
            message: pick_str(body, &["message"])
                .or_else(|| pick_str(data, &["message"]))
                .unwrap_or_else(|| "Thank you for your message.".to_string()),
        }
    }
}

impl ContentApi {
    /// All forms: `GET /v1/contact/forms?locale`.
    pub async fn fetch_contact_forms(&self, scope: &Scope) -> Result<Vec<ContactForm>, NetworkError> {
        let opts = self.scoped_get(scope).param("locale", &scope.locale);

        let envelope = self.get_envelope(&["v1", "contact", "forms"], opts).await?;
        Ok(normalize_items(&envelope.into_items(), "contact_forms", ContactForm::from_value))
    }

    /// One form: `GET /v1/contact/forms/{id}?locale`.
    pub async fn fetch_contact_form(&self, scope: &Scope, id: &str) -> Result<ContactForm, NetworkError> {
        let opts = self.scoped_get(scope).param("locale", &scope.locale);

        let envelope = self.get_envelope(&["v1", "contact", "forms", id], opts).await?;
        ContactForm::from_value(&envelope.data)
            .ok_or_else(|| NetworkError::Decode(format!("contact form '{id}' has no id")))
    }

    /// Submit values: `POST /v1/contact/forms/{id}/submit`.
    ///
    /// Never retried. A 422 comes back as `NetworkError::Validation` with
    /// per-field messages for the form to display.
    pub async fn submit_contact_form(
        &self,
        scope: &Scope,
        id: &str,
        values: Map<String, Value>,
    ) -> Result<SubmissionReceipt, NetworkError> {
        let url = self.http().endpoint(&["v1", "contact", "forms", id, "submit"])?;
        let opts = RequestOptions::post(Value::Object(values))
            .tenant(scope.tenant.clone())
            .param("locale", &scope.locale)
            .retries(0);

        let body = self.http().request_url(url, opts).await?;
        tracing::info!(form_id = %id, "Contact form submitted");
        Ok(SubmissionReceipt::from_body(&body))
    }

    pub fn contact_forms_key(&self, scope: &Scope) -> CacheKey {
        CacheKey::new("contact_forms")
            .with_opt("tenant", self.tenant_for(scope))
            .with("locale", &scope.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_with_fields_and_options() {
        let form = ContactForm::from_value(&json!({
            "id": "quote",
            "title": "Request a quote",
            "fields": [
                {"name": "email", "type": "email", "required": true, "placeholder": "you@example.com"},
                {"key": "service", "label": "Service", "field_type": "select",
                 "options": ["Office", {"value": "windows", "label": "Windows"}]},
                {"label": "nameless"}
            ]
        }))
        .unwrap();
        assert_eq!(form.name, "quote");
        assert_eq!(form.fields.len(), 2);
        assert!(form.fields[0].required);
        assert_eq!(form.fields[0].kind, "email");
        assert_eq!(form.fields[1].options[1], FormOption { label: "Windows".into(), value: "windows".into() });
        assert_eq!(form.fields[1].options[0].value, "Office");
    }

    #[test]
    fn test_receipt_message_fallbacks() {
        let receipt = SubmissionReceipt::from_body(&json!({"message": "Thanks!", "data": {"id": 99}}));
        assert_eq!(receipt.id.as_deref(), Some("99"));
        assert_eq!(receipt.message, "Thanks!");

        let receipt = SubmissionReceipt::from_body(&Value::Null);
        assert!(receipt.id.is_none());
        assert_eq!(receipt.message, "Thank you for your message.");
    }
}
