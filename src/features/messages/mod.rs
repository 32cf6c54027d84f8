//! Contact form submissions.
//!
//! Full records (name, email, phone, message body) never leave the service
//! layer over HTTP; only the sanitised view is listed.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/contact` | Submit the contact form |
//! | GET | `/api/messages` | Sanitised messages, newest first |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MessageService;
