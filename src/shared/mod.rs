pub mod clock;
pub mod constants;
pub mod time_range;
pub mod types;
pub mod validation;
