pub mod categories;
pub mod events;
pub mod messages;
pub mod portal;
pub mod search;
