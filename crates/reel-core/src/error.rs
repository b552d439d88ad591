//! Error types for Reel Core

use serde::Serialize;
use thiserror::Error;

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of entity a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Video,
    Playlist,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Video => write!(f, "Video"),
            EntityKind::Playlist => write!(f, "Playlist"),
        }
    }
}

/// Player error types
///
/// Every session outcome other than success is one of these variants, so
/// callers branch on the variant rather than on message text.
#[derive(Error, Debug)]
pub enum Error {
    // Lookup errors
    #[error("{kind} does not exist: {id}")]
    NotFound { kind: EntityKind, id: String },

    // Playlist errors
    #[error("A playlist with the same name already exists: {name}")]
    AlreadyExists { name: String },

    #[error("Video already added: {video_id}")]
    AlreadyInPlaylist { playlist: String, video_id: String },

    #[error("Video is not in playlist: {video_id}")]
    NotInPlaylist { playlist: String, video_id: String },

    // Flag errors
    #[error("Video is already flagged: {video_id}")]
    AlreadyFlagged { video_id: String },

    #[error("Video is not flagged: {video_id}")]
    NotFlagged { video_id: String },

    #[error("Video is currently flagged (reason: {reason})")]
    Flagged { video_id: String, reason: String },

    // Playback errors
    #[error("No video is currently playing")]
    NothingPlaying,

    #[error("Video is not paused")]
    NotPaused,

    #[error("No videos available")]
    EmptyCatalog,

    #[error("Invalid selection {index}: expected a number between 1 and {count}")]
    InvalidSelectionIndex { index: usize, count: usize },

    // Catalog errors
    #[error("Failed to parse catalog line {line}: {reason}")]
    CatalogParse { line: usize, reason: String },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn video_not_found(id: impl Into<String>) -> Self {
        Error::NotFound {
            kind: EntityKind::Video,
            id: id.into(),
        }
    }

    pub(crate) fn playlist_not_found(name: impl Into<String>) -> Self {
        Error::NotFound {
            kind: EntityKind::Playlist,
            id: name.into(),
        }
    }

    /// Returns true if this error is a normal session outcome the caller can
    /// simply report and move on from
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Error::CatalogParse { .. } | Error::InvalidConfig(_) | Error::Io(_)
        )
    }

    /// Returns the stable error code used in structured output
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "NOT_FOUND",
            Error::AlreadyExists { .. } => "ALREADY_EXISTS",
            Error::AlreadyInPlaylist { .. } => "ALREADY_IN_PLAYLIST",
            Error::NotInPlaylist { .. } => "NOT_IN_PLAYLIST",
            Error::AlreadyFlagged { .. } => "ALREADY_FLAGGED",
            Error::NotFlagged { .. } => "NOT_FLAGGED",
            Error::Flagged { .. } => "FLAGGED",
            Error::NothingPlaying => "NOTHING_PLAYING",
            Error::NotPaused => "NOT_PAUSED",
            Error::EmptyCatalog => "EMPTY_CATALOG",
            Error::InvalidSelectionIndex { .. } => "INVALID_SELECTION",
            Error::CatalogParse { .. } => "CATALOG_PARSE",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Io(_) => "IO",
        }
    }
}
