//! Core library for the Rolodex user directory.
//!
//! Holds the domain model, the record-store port with its MongoDB adapter,
//! the external seed source, and the [`UserDirectory`] service the HTTP
//! layer drives.

pub mod directory;
pub mod error;
pub mod seed;
pub mod store;
pub mod user;

pub use directory::UserDirectory;
pub use error::{DirectoryError, Result};
pub use user::{UserDocument, UserKey, UserPage, UserPatch, UserProfile};
