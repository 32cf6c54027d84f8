//! Community areas. Stored as categories; events may be filed under one.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/areas` | List areas |
//! | GET | `/api/areas/overview` | Areas with their nearest upcoming events |
//! | GET | `/api/areas/event-counts` | Event count per area |
//! | GET | `/api/areas/{id}` | Get one area |
//! | GET | `/api/areas/{id}/events` | Events in an area |
//! | POST | `/api/areas` | Create an area |
//! | PUT | `/api/areas/{id}` | Replace an area |
//! | DELETE | `/api/areas/{id}` | Delete an area, detaching its events |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
