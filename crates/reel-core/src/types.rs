//! Core types for Reel

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Reason recorded when a video is flagged without one
pub const DEFAULT_FLAG_REASON: &str = "Not supplied";

/// Unique identifier for a player session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A video in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Unique, stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Ordered tags
    pub tags: Vec<String>,
    /// Flag reason; `Some` means the video may not be played
    pub flag: Option<String>,
}

impl Video {
    pub fn new(id: impl Into<String>, title: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags,
            flag: None,
        }
    }

    /// Whether the video is currently flagged
    pub fn is_flagged(&self) -> bool {
        self.flag.is_some()
    }
}

/// Formats as `Title (id) [tag1 tag2]`, with a flag suffix when flagged.
/// Search results and listings are ordered by this string.
impl std::fmt::Display for Video {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) [{}]", self.title, self.id, self.tags.join(" "))?;
        if let Some(reason) = &self.flag {
            write!(f, " - FLAGGED (reason: {})", reason)?;
        }
        Ok(())
    }
}

/// Player state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// No current video
    Stopped,
    /// Current video is playing
    Playing,
    /// Current video is paused
    Paused,
}

impl PlayerState {
    /// Check if transition to target state is valid
    pub fn can_transition_to(&self, target: PlayerState) -> bool {
        use PlayerState::*;
        matches!(
            (self, target),
            // From Stopped
            (Stopped, Playing) |
            // From Playing
            (Playing, Paused) | (Playing, Stopped) |
            // From Paused
            (Paused, Playing) | (Paused, Stopped)
        )
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Stopped => write!(f, "stopped"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Paused => write!(f, "paused"),
        }
    }
}

/// What is currently on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
    pub video: Video,
    pub paused: bool,
}

/// Result of a successful `play`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayOutcome {
    /// Video that was implicitly stopped to make room, if any
    pub stopped: Option<Video>,
    /// Video now playing
    pub playing: Video,
}

/// Result of a successful `pause`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "video", rename_all = "snake_case")]
pub enum PauseOutcome {
    Paused(Video),
    AlreadyPaused(Video),
}

/// Result of a successful `flag`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagOutcome {
    pub video: Video,
    pub reason: String,
    /// Set when the flagged video was current and playback was stopped
    pub stopped: Option<Video>,
}

/// A playlist together with the details of the videos it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistView {
    pub name: String,
    pub videos: Vec<Video>,
}

/// Player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Catalog file to load (bundled catalog when unset)
    pub catalog_path: Option<PathBuf>,
    /// Seed for random playback (entropy when unset)
    pub random_seed: Option<u64>,
    /// Reason recorded when flagging without one
    pub default_flag_reason: String,
}

impl PlayerConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            random_seed: None,
            default_flag_reason: DEFAULT_FLAG_REASON.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_video_display() {
        let mut video = Video::new(
            "amazing_cats_video_id",
            "Amazing Cats",
            tags(&["#cat", "#animal"]),
        );
        assert_eq!(video.to_string(), "Amazing Cats (amazing_cats_video_id) [#cat #animal]");

        video.flag = Some("dont_like_cats".into());
        assert_eq!(
            video.to_string(),
            "Amazing Cats (amazing_cats_video_id) [#cat #animal] - FLAGGED (reason: dont_like_cats)"
        );
    }

    #[test]
    fn test_video_display_without_tags() {
        let video = Video::new("nothing_video_id", "Video about nothing", Vec::new());
        assert_eq!(video.to_string(), "Video about nothing (nothing_video_id) []");
    }

    #[test]
    fn test_player_state_transitions() {
        assert!(PlayerState::Stopped.can_transition_to(PlayerState::Playing));
        assert!(PlayerState::Playing.can_transition_to(PlayerState::Paused));
        assert!(PlayerState::Paused.can_transition_to(PlayerState::Playing));
        assert!(PlayerState::Paused.can_transition_to(PlayerState::Stopped));

        assert!(!PlayerState::Stopped.can_transition_to(PlayerState::Paused));
        assert!(!PlayerState::Stopped.can_transition_to(PlayerState::Stopped));
        assert!(!PlayerState::Paused.can_transition_to(PlayerState::Paused));
        // Switching videos always goes through Stopped
        assert!(!PlayerState::Playing.can_transition_to(PlayerState::Playing));
    }

    #[test]
    fn test_config_from_json() {
        let config = PlayerConfig::from_json(r#"{ "random_seed": 7 }"#).unwrap();
        assert_eq!(config.random_seed, Some(7));
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.default_flag_reason, "Not supplied");

        assert!(matches!(
            PlayerConfig::from_json("{ not json"),
            Err(Error::InvalidConfig(_))
        ));
    }
}
