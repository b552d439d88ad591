//! Reel Core - Command-driven video player library
//!
//! This crate provides the core functionality of the player:
//! - Video catalog loading and lookup
//! - Playback state machine (stopped / playing / paused)
//! - Flagging videos as unplayable
//! - User playlists with case-insensitive names
//! - Title and tag search with result selection
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   Reel Core                     │
//! ├─────────────────────────────────────────────────┤
//! │                                                 │
//! │  ┌──────────────┐  ┌──────────────┐             │
//! │  │    Video     │  │    Search    │             │
//! │  │   Catalog    │◄─┤              │             │
//! │  └──────┬───────┘  └──────┬───────┘             │
//! │         │                 │                     │
//! │         └────────┬────────┘                     │
//! │                  │                              │
//! │           ┌──────┴──────┐     ┌──────────────┐  │
//! │           │   Player    │────►│   Playlist   │  │
//! │           │   Session   │     │              │  │
//! │           └─────────────┘     └──────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use reel_core::{PlayerConfig, PlayerSession, PlayerState};
//!
//! let mut session = PlayerSession::new(PlayerConfig::default()).unwrap();
//! session.play("funny_dogs_video_id").unwrap();
//! assert_eq!(session.state(), PlayerState::Playing);
//! ```

pub mod catalog;
pub mod error;
pub mod playlist;
pub mod search;
pub mod session;
pub mod types;

pub use catalog::VideoCatalog;
pub use error::{EntityKind, Error, Result};
pub use playlist::Playlist;
pub use search::SearchField;
pub use session::PlayerSession;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the player library
pub fn init() {
    tracing::info!(version = VERSION, "Reel Core initialized");
}
