/// Upcoming events shown on the home overview
pub const HOME_UPCOMING_LIMIT: i64 = 6;

/// Upcoming events listed under each area on the home overview
pub const HOME_AREA_EVENTS_LIMIT: usize = 2;

/// Upcoming events listed under each area on the areas overview
pub const AREA_OVERVIEW_EVENTS_LIMIT: usize = 3;

/// Default limit for `GET /api/events?upcoming=true&limit=`
pub const DEFAULT_UPCOMING_LIMIT: i64 = 10;

/// Maximum limit accepted by any listing
pub const MAX_LIST_LIMIT: i64 = 100;
