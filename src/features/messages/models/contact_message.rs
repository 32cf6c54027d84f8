use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored contact form submission
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    /// Free-text area label, not a reference to a category
    pub area: Option<String>,
    pub message: String,
    pub newsletter: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub area: Option<String>,
    pub message: String,
    pub newsletter: bool,
}

/// Public view of a contact message with personal fields removed
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PublicContactMessage {
    pub id: i64,
    pub subject: String,
    pub area: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for PublicContactMessage {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            subject: m.subject,
            area: m.area,
            created_at: m.created_at,
        }
    }
}
