//! User playlists

use serde::{Deserialize, Serialize};

/// Ordered collection of video ids with a display name.
///
/// An id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Name as given at creation
    name: String,
    /// Video ids in insertion order
    videos: Vec<String>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            videos: Vec::new(),
        }
    }

    /// Display name with the casing used at creation
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lookup key shared by every casing of the name
    pub fn key(&self) -> String {
        playlist_key(&self.name)
    }

    /// Video ids in order
    pub fn videos(&self) -> &[String] {
        &self.videos
    }

    /// Check whether a video is in this playlist
    pub fn contains(&self, video_id: &str) -> bool {
        self.videos.iter().any(|id| id == video_id)
    }

    /// Append a video. Returns false if it was already present.
    pub fn add(&mut self, video_id: impl Into<String>) -> bool {
        let video_id = video_id.into();
        if self.contains(&video_id) {
            return false;
        }
        self.videos.push(video_id);
        true
    }

    /// Remove a video. Returns false if it was not present.
    pub fn remove(&mut self, video_id: &str) -> bool {
        match self.videos.iter().position(|id| id == video_id) {
            Some(index) => {
                self.videos.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every video, keeping the playlist itself
    pub fn clear(&mut self) {
        self.videos.clear();
    }

    /// Number of videos in this playlist
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Case-insensitive lookup key for a playlist name
pub fn playlist_key(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_contains() {
        let mut playlist = Playlist::new("My List");
        assert!(playlist.is_empty());

        assert!(playlist.add("a"));
        assert!(playlist.add("b"));
        assert!(!playlist.add("a"));

        assert!(playlist.contains("a"));
        assert!(!playlist.contains("c"));
        assert_eq!(playlist.videos(), ["a", "b"]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut playlist = Playlist::new("My List");
        playlist.add("a");
        playlist.add("b");
        playlist.add("c");

        assert!(playlist.remove("b"));
        assert!(!playlist.remove("b"));
        assert_eq!(playlist.videos(), ["a", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut playlist = Playlist::new("My List");
        playlist.add("a");
        playlist.clear();
        assert!(playlist.is_empty());
        assert_eq!(playlist.name(), "My List");
    }

    #[test]
    fn test_key_is_case_insensitive() {
        assert_eq!(Playlist::new("My List").key(), playlist_key("MY LIST"));
    }
}
