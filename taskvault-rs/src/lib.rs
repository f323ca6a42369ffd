//! taskvault - tasks kept as checkbox lines inside daily Markdown notes.
//!
//! # Overview
//!
//! A folder of dated notes is treated as a task store:
//! - Task lines are decoded into [`Task`] records (tags, due and completion
//!   dates) and encoded back
//! - Scanning is limited to the section under a configured heading
//! - A vault index covers a window of daily notes around today
//! - Tasks are grouped into overdue, today, upcoming and logbook views
//! - Toggle, edit, delete and create rewrite a single line and keep every
//!   other byte of the note
//!
//! # Example
//!
//! ```no_run
//! use chrono::Local;
//! use taskvault::{Config, Session, Vault};
//!
//! let vault = Vault::new("/path/to/vault", Config::load().unwrap()).unwrap();
//! let mut session = Session::open(&vault, Local::now().date_naive()).unwrap();
//!
//! for &idx in &session.categories().overdue {
//!     println!("overdue: {}", session.tasks()[idx].description);
//! }
//!
//! session.create("Buy milk #errands", None).unwrap();
//! ```

pub mod categorize;
pub mod cli;
pub mod config;
pub mod edit;
pub mod error;
pub mod note;
pub mod parser;
pub mod session;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use categorize::{categorize, Categories, Cursor, DateGroup, View};
pub use config::Config;
pub use error::{Result, VaultError};
pub use note::Note;
pub use session::Session;
pub use types::*;
pub use vault::{DateRange, Vault};
