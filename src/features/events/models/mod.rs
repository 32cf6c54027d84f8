mod event;

pub use event::{Event, EventWithCategory, NewEvent};
