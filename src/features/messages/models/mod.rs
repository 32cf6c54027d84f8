mod contact_message;

pub use contact_message::{ContactMessage, NewContactMessage, PublicContactMessage};
