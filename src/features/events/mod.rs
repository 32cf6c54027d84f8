//! Community events, each optionally filed under an area.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/events` | List events, with optional filters |
//! | GET | `/api/events/upcoming` | Every event dated today or later |
//! | GET | `/api/events/{id}` | Get one event |
//! | POST | `/api/events` | Create an event |
//! | PUT | `/api/events/{id}` | Replace an event |
//! | DELETE | `/api/events/{id}` | Delete an event |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::EventService;
