use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::messages::models::{
    ContactMessage, NewContactMessage, PublicContactMessage,
};
use crate::shared::validation::{non_blank, validate_not_blank, PHONE_REGEX};

/// Contact form submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateContactMessageDto {
    #[validate(
        length(min = 1, max = 120, message = "name is required"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(
        length(min = 1, max = 200, message = "subject is required"),
        custom(function = "validate_not_blank")
    )]
    pub subject: String,

    /// Free-text area the message is about
    pub area: Option<String>,

    #[validate(
        length(min = 1, max = 5000, message = "message is required"),
        custom(function = "validate_not_blank")
    )]
    pub message: String,

    /// Accepts booleans as well as the HTML checkbox value "on"
    #[serde(default, deserialize_with = "lenient_bool")]
    pub newsletter: bool,
}

/// Blank phones are dropped later, anything else has to look like a number
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() || PHONE_REGEX.is_match(phone.trim()) {
        return Ok(());
    }
    let mut err = ValidationError::new("phone");
    err.message = Some("phone must be a valid phone number".into());
    Err(err)
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        ),
        _ => false,
    })
}

impl CreateContactMessageDto {
    pub fn into_new(self) -> NewContactMessage {
        NewContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone),
            subject: self.subject.trim().to_string(),
            area: non_blank(self.area),
            message: self.message.trim().to_string(),
            newsletter: self.newsletter,
        }
    }
}

/// Full contact message, for internal use only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactMessageDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub area: Option<String>,
    pub message: String,
    pub newsletter: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for ContactMessageDto {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            subject: m.subject,
            area: m.area,
            message: m.message,
            newsletter: m.newsletter,
            created_at: m.created_at,
        }
    }
}

/// Contact message with the sender's personal details removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicContactMessageDto {
    pub id: i64,
    pub subject: String,
    pub area: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PublicContactMessage> for PublicContactMessageDto {
    fn from(m: PublicContactMessage) -> Self {
        Self {
            id: m.id,
            subject: m.subject,
            area: m.area,
            created_at: m.created_at,
        }
    }
}
