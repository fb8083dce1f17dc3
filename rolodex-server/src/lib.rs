//! # Rolodex Server
//!
//! HTTP resource layer for the Rolodex user directory:
//!
//! - **Login**: static demo credential check issuing a signed token
//! - **Users**: paginated listing with get/update/delete, backed by MongoDB
//!
//! The server is built on Axum. No route validates the login token; the
//! token only gates the demo client's views. Mutation routes are therefore
//! deliberately unauthenticated.

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;
