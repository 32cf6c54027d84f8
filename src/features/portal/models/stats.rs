use sqlx::FromRow;

/// Aggregate counts across the portal data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct PortalStats {
    pub total_events: i64,
    pub total_categories: i64,
    pub upcoming_events: i64,
    pub past_events: i64,
    pub total_messages: i64,
}

/// Backend-specific health facts reported alongside the stats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageHealth {
    pub backend: &'static str,
    /// `None` for backends without foreign key enforcement
    pub foreign_keys_enabled: Option<bool>,
}
