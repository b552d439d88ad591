//! Player Session - Main orchestrator for playback
//!
//! Coordinates:
//! - The playback state machine (stopped / playing / paused)
//! - Flag-aware playback gating
//! - Playlist management, keyed case-insensitively
//! - Search and selection of search results
//!
//! All state lives in one `PlayerSession` value and every operation runs to
//! completion on the caller's thread.

use crate::{
    catalog::VideoCatalog,
    playlist::{playlist_key, Playlist},
    search::{self, SearchField},
    types::*,
    Error, Result,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Player session owning the catalog, playback state and playlists
pub struct PlayerSession {
    /// Unique session ID
    id: SessionId,
    /// Session configuration
    config: PlayerConfig,
    /// Known videos, including their flag state
    catalog: VideoCatalog,
    /// Current player state
    state: PlayerState,
    /// Id of the current video; `None` exactly when stopped
    current: Option<String>,
    /// Playlists by lowercase name
    playlists: HashMap<String, Playlist>,
    /// Video ids from the latest search, in result order
    search_results: Vec<String>,
    /// Source for random playback
    rng: StdRng,
}

impl PlayerSession {
    /// Create a new player session, loading the catalog named by the config
    pub fn new(config: PlayerConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => VideoCatalog::load(path)?,
            None => VideoCatalog::bundled()?,
        };
        Ok(Self::with_catalog(catalog, config))
    }

    /// Create a new player session over an already loaded catalog
    pub fn with_catalog(catalog: VideoCatalog, config: PlayerConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let id = SessionId::new();
        info!(session_id = %id, videos = catalog.len(), "Player session created");

        Self {
            id,
            config,
            catalog,
            state: PlayerState::Stopped,
            current: None,
            playlists: HashMap::new(),
            search_results: Vec::new(),
            rng,
        }
    }

    /// Get session ID
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get current state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// The catalog backing this session
    pub fn catalog(&self) -> &VideoCatalog {
        &self.catalog
    }

    /// Transition to new state
    fn transition(&mut self, next: PlayerState, current: Option<String>) {
        debug_assert!(self.state.can_transition_to(next));
        debug_assert_eq!(next == PlayerState::Stopped, current.is_none());

        info!(
            from = %self.state,
            to = %next,
            video = current.as_deref().unwrap_or("-"),
            "State transition"
        );

        self.state = next;
        self.current = current;
    }

    fn current_video(&self) -> Option<&Video> {
        self.current.as_deref().and_then(|id| self.catalog.get(id))
    }

    fn video(&self, video_id: &str) -> Result<&Video> {
        self.catalog
            .get(video_id)
            .ok_or_else(|| Error::video_not_found(video_id))
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    /// Number of videos in the catalog
    pub fn number_of_videos(&self) -> usize {
        self.catalog.len()
    }

    /// Every video, flagged ones included, in display order
    pub fn list_videos(&self) -> Vec<Video> {
        self.catalog.sorted_by_display()
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Start playing a video, stopping whatever was current
    #[instrument(skip(self))]
    pub fn play(&mut self, video_id: &str) -> Result<PlayOutcome> {
        let video = self.video(video_id)?.clone();

        if let Some(reason) = &video.flag {
            warn!(reason = %reason, "Refusing to play flagged video");
            return Err(Error::Flagged {
                video_id: video.id.clone(),
                reason: reason.clone(),
            });
        }

        let stopped = self.stop_current();
        self.transition(PlayerState::Playing, Some(video.id.clone()));

        Ok(PlayOutcome {
            stopped,
            playing: video,
        })
    }

    fn stop_current(&mut self) -> Option<Video> {
        let video = self.current_video()?.clone();
        self.transition(PlayerState::Stopped, None);
        Some(video)
    }

    /// Stop playback
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> Result<Video> {
        self.stop_current().ok_or(Error::NothingPlaying)
    }

    /// Play a video chosen uniformly among the unflagged ones
    #[instrument(skip(self))]
    pub fn play_random(&mut self) -> Result<PlayOutcome> {
        let candidates: Vec<String> = self
            .catalog
            .videos()
            .filter(|video| !video.is_flagged())
            .map(|video| video.id.clone())
            .collect();

        let choice = candidates
            .choose(&mut self.rng)
            .ok_or(Error::EmptyCatalog)?
            .clone();

        debug!(candidates = candidates.len(), choice = %choice, "Random video selected");
        self.play(&choice)
    }

    /// Pause playback. Pausing an already paused video is not an error.
    #[instrument(skip(self))]
    pub fn pause(&mut self) -> Result<PauseOutcome> {
        let video = self.current_video().cloned().ok_or(Error::NothingPlaying)?;

        match self.state {
            PlayerState::Paused => Ok(PauseOutcome::AlreadyPaused(video)),
            _ => {
                self.transition(PlayerState::Paused, Some(video.id.clone()));
                Ok(PauseOutcome::Paused(video))
            }
        }
    }

    /// Resume a paused video
    #[instrument(skip(self))]
    pub fn resume(&mut self) -> Result<Video> {
        let video = self.current_video().cloned().ok_or(Error::NothingPlaying)?;

        match self.state {
            PlayerState::Paused => {
                self.transition(PlayerState::Playing, Some(video.id.clone()));
                Ok(video)
            }
            _ => Err(Error::NotPaused),
        }
    }

    /// The current video and whether it is paused, if anything is current
    pub fn now_playing(&self) -> Option<NowPlaying> {
        self.current_video().map(|video| NowPlaying {
            video: video.clone(),
            paused: self.state == PlayerState::Paused,
        })
    }

    // ------------------------------------------------------------------
    // Playlists
    // ------------------------------------------------------------------

    /// Look up a playlist by name, ignoring case
    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(&playlist_key(name))
    }

    /// Create an empty playlist
    #[instrument(skip(self))]
    pub fn create_playlist(&mut self, name: &str) -> Result<&Playlist> {
        let playlist = Playlist::new(name);
        match self.playlists.entry(playlist.key()) {
            Entry::Occupied(_) => Err(Error::AlreadyExists {
                name: name.to_string(),
            }),
            Entry::Vacant(entry) => {
                info!("Playlist created");
                Ok(&*entry.insert(playlist))
            }
        }
    }

    /// Append a video to a playlist.
    ///
    /// A flagged video is still appended, after which the call reports
    /// [`Error::Flagged`]. Callers observe the insert through
    /// [`PlayerSession::playlist`].
    #[instrument(skip(self))]
    pub fn add_to_playlist(&mut self, name: &str, video_id: &str) -> Result<Video> {
        let playlist = self
            .playlists
            .get_mut(&playlist_key(name))
            .ok_or_else(|| Error::playlist_not_found(name))?;
        let video = self
            .catalog
            .get(video_id)
            .ok_or_else(|| Error::video_not_found(video_id))?;

        if !playlist.add(video_id) {
            return Err(Error::AlreadyInPlaylist {
                playlist: name.to_string(),
                video_id: video_id.to_string(),
            });
        }

        if let Some(reason) = &video.flag {
            warn!(reason = %reason, "Flagged video added to playlist");
            return Err(Error::Flagged {
                video_id: video.id.clone(),
                reason: reason.clone(),
            });
        }

        info!(size = playlist.len(), "Video added to playlist");
        Ok(video.clone())
    }

    /// Remove a video from a playlist
    #[instrument(skip(self))]
    pub fn remove_from_playlist(&mut self, name: &str, video_id: &str) -> Result<Video> {
        let playlist = self
            .playlists
            .get_mut(&playlist_key(name))
            .ok_or_else(|| Error::playlist_not_found(name))?;
        let video = self
            .catalog
            .get(video_id)
            .ok_or_else(|| Error::video_not_found(video_id))?;

        if !playlist.remove(video_id) {
            return Err(Error::NotInPlaylist {
                playlist: name.to_string(),
                video_id: video_id.to_string(),
            });
        }

        info!(size = playlist.len(), "Video removed from playlist");
        Ok(video.clone())
    }

    /// Remove every video from a playlist
    #[instrument(skip(self))]
    pub fn clear_playlist(&mut self, name: &str) -> Result<()> {
        let playlist = self
            .playlists
            .get_mut(&playlist_key(name))
            .ok_or_else(|| Error::playlist_not_found(name))?;

        playlist.clear();
        info!("Playlist cleared");
        Ok(())
    }

    /// Delete a playlist, returning it
    #[instrument(skip(self))]
    pub fn delete_playlist(&mut self, name: &str) -> Result<Playlist> {
        let playlist = self
            .playlists
            .remove(&playlist_key(name))
            .ok_or_else(|| Error::playlist_not_found(name))?;

        info!("Playlist deleted");
        Ok(playlist)
    }

    /// Display names of all playlists, sorted
    pub fn list_playlists(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .playlists
            .values()
            .map(|playlist| playlist.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// A playlist's videos in order
    pub fn show_playlist(&self, name: &str) -> Result<PlaylistView> {
        let playlist = self
            .playlist(name)
            .ok_or_else(|| Error::playlist_not_found(name))?;

        let videos = playlist
            .videos()
            .iter()
            .filter_map(|id| self.catalog.get(id).cloned())
            .collect();

        Ok(PlaylistView {
            name: playlist.name().to_string(),
            videos,
        })
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Search titles. The results become the target of
    /// [`PlayerSession::select_search_result`].
    #[instrument(skip(self))]
    pub fn search_by_title(&mut self, term: &str) -> Vec<Video> {
        self.search(term, SearchField::Title)
    }

    /// Search tags. The results become the target of
    /// [`PlayerSession::select_search_result`].
    #[instrument(skip(self))]
    pub fn search_by_tag(&mut self, term: &str) -> Vec<Video> {
        self.search(term, SearchField::Tag)
    }

    fn search(&mut self, term: &str, field: SearchField) -> Vec<Video> {
        let results = search::search(&self.catalog, term, field);
        self.search_results = results.iter().map(|video| video.id.clone()).collect();
        results
    }

    /// Play result `index` (1-based) of the latest search
    #[instrument(skip(self))]
    pub fn select_search_result(&mut self, index: usize) -> Result<PlayOutcome> {
        let count = self.search_results.len();
        if index == 0 || index > count {
            return Err(Error::InvalidSelectionIndex { index, count });
        }

        let video_id = self.search_results[index - 1].clone();
        self.play(&video_id)
    }

    // ------------------------------------------------------------------
    // Flagging
    // ------------------------------------------------------------------

    /// Flag a video. An empty reason records the configured default. If the
    /// video is current, playback stops.
    #[instrument(skip(self))]
    pub fn flag(&mut self, video_id: &str, reason: Option<&str>) -> Result<FlagOutcome> {
        let reason = match reason.map(str::trim) {
            Some(reason) if !reason.is_empty() => reason.to_string(),
            _ => self.config.default_flag_reason.clone(),
        };

        let video = self
            .catalog
            .get_mut(video_id)
            .ok_or_else(|| Error::video_not_found(video_id))?;
        if video.is_flagged() {
            return Err(Error::AlreadyFlagged {
                video_id: video_id.to_string(),
            });
        }
        video.flag = Some(reason.clone());
        let video = video.clone();

        let stopped = if self.current.as_deref() == Some(video_id) {
            self.stop_current()
        } else {
            None
        };

        info!(reason = %reason, "Video flagged");
        Ok(FlagOutcome {
            video,
            reason,
            stopped,
        })
    }

    /// Clear a video's flag
    #[instrument(skip(self))]
    pub fn allow(&mut self, video_id: &str) -> Result<Video> {
        let video = self
            .catalog
            .get_mut(video_id)
            .ok_or_else(|| Error::video_not_found(video_id))?;
        if video.flag.take().is_none() {
            return Err(Error::NotFlagged {
                video_id: video_id.to_string(),
            });
        }

        info!("Flag removed");
        Ok(video.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> PlayerSession {
        let catalog = VideoCatalog::from_videos([
            Video::new("v1", "Amazing Cat Video", vec!["animal".into()]),
            Video::new("v2", "Another Cat Video", vec!["funny".into()]),
            Video::new("v3", "Cat Fails", vec!["funny".into()]),
        ])
        .unwrap();
        let config = PlayerConfig {
            random_seed: Some(42),
            ..Default::default()
        };
        PlayerSession::with_catalog(catalog, config)
    }

    #[test]
    fn test_session_creation() {
        let session = session();

        assert_eq!(session.state(), PlayerState::Stopped);
        assert!(session.now_playing().is_none());
        assert_eq!(session.number_of_videos(), 3);
    }

    #[test]
    fn test_play_switches_video() {
        let mut session = session();

        let outcome = session.play("v1").unwrap();
        assert!(outcome.stopped.is_none());
        assert_eq!(outcome.playing.id, "v1");

        let outcome = session.play("v2").unwrap();
        assert_eq!(outcome.stopped.unwrap().id, "v1");
        assert_eq!(session.now_playing().unwrap().video.id, "v2");
        assert_eq!(session.state(), PlayerState::Playing);
    }

    #[test]
    fn test_play_unknown_video() {
        let mut session = session();
        session.play("v1").unwrap();

        let err = session.play("missing").unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: crate::EntityKind::Video, .. }));
        assert_eq!(session.now_playing().unwrap().video.id, "v1");
    }

    #[test]
    fn test_pause_when_paused_and_stopped() {
        let mut session = session();
        assert!(matches!(session.pause(), Err(Error::NothingPlaying)));

        session.play("v1").unwrap();
        assert!(matches!(session.pause(), Ok(PauseOutcome::Paused(_))));
        assert!(matches!(session.pause(), Ok(PauseOutcome::AlreadyPaused(_))));
        assert_eq!(session.state(), PlayerState::Paused);
    }

    #[test]
    fn test_resume_requires_pause() {
        let mut session = session();
        assert!(matches!(session.resume(), Err(Error::NothingPlaying)));

        session.play("v1").unwrap();
        assert!(matches!(session.resume(), Err(Error::NotPaused)));
    }

    #[test]
    fn test_play_after_pause_clears_pause() {
        let mut session = session();
        session.play("v1").unwrap();
        session.pause().unwrap();

        let outcome = session.play("v2").unwrap();
        assert_eq!(outcome.stopped.unwrap().id, "v1");
        assert!(!session.now_playing().unwrap().paused);
    }

    #[test]
    fn test_flag_stops_paused_video() {
        let mut session = session();
        session.play("v1").unwrap();
        session.pause().unwrap();

        let outcome = session.flag("v1", None).unwrap();
        assert_eq!(outcome.reason, "Not supplied");
        assert_eq!(outcome.stopped.unwrap().id, "v1");
        assert_eq!(session.state(), PlayerState::Stopped);
    }

    #[test]
    fn test_flag_other_video_keeps_playing() {
        let mut session = session();
        session.play("v1").unwrap();

        let outcome = session.flag("v2", Some("  ")).unwrap();
        assert_eq!(outcome.reason, "Not supplied");
        assert!(outcome.stopped.is_none());
        assert_eq!(session.now_playing().unwrap().video.id, "v1");
    }

    #[test]
    fn test_configured_default_flag_reason() {
        let catalog = VideoCatalog::from_videos([Video::new("v1", "A", Vec::new())]).unwrap();
        let config = PlayerConfig {
            default_flag_reason: "unspecified".into(),
            ..Default::default()
        };
        let mut session = PlayerSession::with_catalog(catalog, config);

        assert_eq!(session.flag("v1", None).unwrap().reason, "unspecified");
    }

    #[test]
    fn test_add_flagged_video_still_inserts() {
        let mut session = session();
        session.create_playlist("list").unwrap();
        session.flag("v3", Some("mean")).unwrap();

        let err = session.add_to_playlist("list", "v3").unwrap_err();
        assert!(matches!(err, Error::Flagged { ref reason, .. } if reason == "mean"));
        assert!(session.playlist("list").unwrap().contains("v3"));

        let err = session.add_to_playlist("list", "v3").unwrap_err();
        assert!(matches!(err, Error::AlreadyInPlaylist { .. }));
    }

    #[test]
    fn test_select_search_result_bounds() {
        let mut session = session();
        let results = session.search_by_title("cat");
        assert_eq!(results.len(), 3);

        assert!(matches!(
            session.select_search_result(0),
            Err(Error::InvalidSelectionIndex { index: 0, count: 3 })
        ));
        assert!(matches!(
            session.select_search_result(4),
            Err(Error::InvalidSelectionIndex { index: 4, count: 3 })
        ));
        assert_eq!(session.state(), PlayerState::Stopped);

        let outcome = session.select_search_result(3).unwrap();
        assert_eq!(outcome.playing.id, "v3");
    }

    #[test]
    fn test_select_without_search() {
        let mut session = session();
        assert!(matches!(
            session.select_search_result(1),
            Err(Error::InvalidSelectionIndex { index: 1, count: 0 })
        ));
    }

    #[test]
    fn test_new_search_replaces_results() {
        let mut session = session();
        session.search_by_title("cat");
        assert!(session.search_by_tag("nothing-matches").is_empty());
        assert!(matches!(
            session.select_search_result(1),
            Err(Error::InvalidSelectionIndex { count: 0, .. })
        ));
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut first = session();
        let mut second = session();

        for _ in 0..5 {
            let a = first.play_random().unwrap().playing.id;
            let b = second.play_random().unwrap().playing.id;
            assert_eq!(a, b);
        }
    }
}
