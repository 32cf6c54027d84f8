//! Portal-wide views.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/stats` | Event, area and message counts |
//! | GET | `/api/home` | Featured and upcoming events, areas, stats |
//! | GET | `/health` | Storage health report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PortalService;
