//! Anime purchase inventory on top of a local SQLite table.
//!
//! # Intention
//!
//! - Record purchases of anime titles (title, quantity, price), list them,
//!   edit a selected entry and delete it.
//! - Keep the controller free of any widget toolkit so every user gesture
//!   can be exercised without a screen.
//!
//! # Architectural Boundaries
//!
//! - Only SQLite code belongs in [`sqlite`].
//! - [`controller`] holds all UI state explicitly and talks to storage only
//!   through [`sqlite::PurchaseRepository`].
//! - [`ui`] renders state and parses terminal input; it never touches the database.

pub mod config;
pub mod controller;
pub mod error;
pub mod record;
pub mod sqlite;
pub mod ui;

pub use config::InventoryConfig;
pub use controller::{Controller, FormState, Gesture};
pub use error::{StorageError, ValidationError};
pub use record::PurchaseRecord;
pub use sqlite::{PurchaseRepository, PurchaseStore, SqliteConfig};
