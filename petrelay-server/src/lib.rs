//! # Pet Relay Server
//!
//! Scanners `POST /api/submit` what they found for a job/place pair;
//! notifiers poll `GET /api/pets` for everything still live. All state lives
//! in one [`petrelay_core::FindingsStore`] shared through [`AppState`].

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
