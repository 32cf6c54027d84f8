mod stats;

pub use stats::{PortalStats, StorageHealth};
