mod category;

pub use category::{Category, CategoryEventCount, NewCategory};
