//! Output formatting for CLI

use crate::commands::{Failure, Response};
use reel_core::{Error, PauseOutcome};
use serde_json::json;

pub const PROMPT: &str = "REEL> ";

pub const WELCOME: &str = "Hello and welcome to Reel, what would you like to do?\n\
    Enter HELP for list of available commands or EXIT to terminate.";

pub const GOODBYE: &str = "Reel has now terminated its execution. Thank you and goodbye!";

const HELP: &[&str] = &[
    "Available commands:",
    "    NUMBER_OF_VIDEOS - Shows how many videos are in the library.",
    "    SHOW_ALL_VIDEOS - Lists all videos from the library.",
    "    PLAY <video_id> - Plays specified video.",
    "    PLAY_RANDOM - Plays a random video from the library.",
    "    STOP - Stop the current video.",
    "    PAUSE - Pause the current video.",
    "    CONTINUE - Resume the current paused video.",
    "    SHOW_PLAYING - Displays the title, video_id, video tags and paused status of the video that is currently playing (or paused).",
    "    CREATE_PLAYLIST <playlist_name> - Creates a new (empty) playlist with the provided name.",
    "    ADD_TO_PLAYLIST <playlist_name> <video_id> - Adds the requested video to the playlist.",
    "    REMOVE_FROM_PLAYLIST <playlist_name> <video_id> - Removes the specified video from the specified playlist",
    "    CLEAR_PLAYLIST <playlist_name> - Removes all the videos from the playlist.",
    "    DELETE_PLAYLIST <playlist_name> - Deletes the playlist.",
    "    SHOW_PLAYLIST <playlist_name> - List all the videos in this playlist.",
    "    SHOW_ALL_PLAYLISTS - Display all the available playlists.",
    "    SEARCH_VIDEOS <search_term> - Display all the videos whose titles contain the search_term.",
    "    SEARCH_VIDEOS_WITH_TAG <tag_name> - Display all videos whose tags contains the provided tag.",
    "    SELECT_RESULT <number> - Plays the numbered result of the latest search.",
    "    FLAG_VIDEO <video_id> <flag_reason> - Mark a video as flagged.",
    "    ALLOW_VIDEO <video_id> - Removes a flag from a video.",
    "    HELP - Displays help.",
    "    EXIT - Terminates the program execution.",
];

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Format a command result based on selected format
pub fn render(result: &Result<Response, Failure>, format: OutputFormat) -> Vec<String> {
    match format {
        OutputFormat::Json => vec![render_json(result)],
        OutputFormat::Text => match result {
            Ok(response) => render_text(response),
            Err(failure) => vec![render_failure(failure)],
        },
    }
}

fn render_json(result: &Result<Response, Failure>) -> String {
    let value = match result {
        Ok(response) => json!({ "ok": response }),
        Err(failure) => json!({
            "error": {
                "code": failure.error.error_code(),
                "action": failure.action,
                "message": failure.error.to_string(),
            }
        }),
    };
    serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
}

fn render_text(response: &Response) -> Vec<String> {
    let mut lines = Vec::new();

    match response {
        Response::VideoCount(count) => lines.push(format!("{count} videos in the library")),
        Response::Videos(videos) => {
            lines.push("Here's a list of all available videos:".to_string());
            lines.extend(videos.iter().map(|video| format!("  {video}")));
        }
        Response::Played(outcome) => {
            if let Some(stopped) = &outcome.stopped {
                lines.push(format!("Stopping video: {}", stopped.title));
            }
            lines.push(format!("Playing video: {}", outcome.playing.title));
        }
        Response::Stopped(video) => lines.push(format!("Stopping video: {}", video.title)),
        Response::Paused(PauseOutcome::Paused(video)) => {
            lines.push(format!("Pausing video: {}", video.title))
        }
        Response::Paused(PauseOutcome::AlreadyPaused(video)) => {
            lines.push(format!("Video already paused: {}", video.title))
        }
        Response::Resumed(video) => lines.push(format!("Continuing video: {}", video.title)),
        Response::NowPlaying(None) => lines.push("No video is currently playing".to_string()),
        Response::NowPlaying(Some(now)) => {
            let suffix = if now.paused { " - PAUSED" } else { "" };
            lines.push(format!("Currently playing: {}{suffix}", now.video));
        }
        Response::PlaylistCreated(name) => {
            lines.push(format!("Successfully created new playlist: {name}"))
        }
        Response::AddedToPlaylist { playlist, video } => {
            lines.push(format!("Added video to {playlist}: {}", video.title))
        }
        Response::RemovedFromPlaylist { playlist, video } => {
            lines.push(format!("Removed video from {playlist}: {}", video.title))
        }
        Response::PlaylistCleared(name) => {
            lines.push(format!("Successfully removed all videos from {name}"))
        }
        Response::PlaylistDeleted(name) => lines.push(format!("Deleted playlist: {name}")),
        Response::Playlists(names) if names.is_empty() => {
            lines.push("No playlists exist yet".to_string())
        }
        Response::Playlists(names) => {
            lines.push("Showing all playlists:".to_string());
            lines.extend(names.iter().map(|name| format!("  {name}")));
        }
        Response::Playlist { requested, view } => {
            lines.push(format!("Showing playlist: {requested}"));
            if view.videos.is_empty() {
                lines.push("  No videos here yet".to_string());
            }
            lines.extend(view.videos.iter().map(|video| format!("  {video}")));
        }
        Response::SearchResults { term, results } if results.is_empty() => {
            lines.push(format!("No search results for {term}"))
        }
        Response::SearchResults { term, results } => {
            lines.push(format!("Here are the results for {term}:"));
            lines.extend(
                results
                    .iter()
                    .enumerate()
                    .map(|(i, video)| format!("  {}) {video}", i + 1)),
            );
            lines.push(
                "Would you like to play any of the above? If yes, specify the number of the video."
                    .to_string(),
            );
            lines.push(
                "If your answer is not a valid number, we will assume it's a no.".to_string(),
            );
        }
        Response::Flagged(outcome) => {
            if let Some(stopped) = &outcome.stopped {
                lines.push(format!("Stopping video: {}", stopped.title));
            }
            lines.push(format!(
                "Successfully flagged video: {} (reason: {})",
                outcome.video.title, outcome.reason
            ));
        }
        Response::Allowed(video) => {
            lines.push(format!("Successfully removed flag from video: {}", video.title))
        }
        Response::Help => lines.extend(HELP.iter().map(|line| line.to_string())),
        Response::Closing => lines.push(GOODBYE.to_string()),
    }

    lines
}

fn render_failure(failure: &Failure) -> String {
    let reason = match &failure.error {
        Error::EmptyCatalog => return "No videos available".to_string(),
        Error::NotFound { kind, .. } => format!("{kind} does not exist"),
        Error::AlreadyExists { .. } => "A playlist with the same name already exists".to_string(),
        Error::AlreadyInPlaylist { .. } => "Video already added".to_string(),
        Error::NotInPlaylist { .. } => "Video is not in playlist".to_string(),
        Error::AlreadyFlagged { .. } => "Video is already flagged".to_string(),
        Error::NotFlagged { .. } => "Video is not flagged".to_string(),
        other => other.to_string(),
    };
    format!("{}: {reason}", failure.action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::{EntityKind, Video};

    fn failure(action: &str, error: Error) -> Failure {
        Failure {
            action: action.to_string(),
            error,
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from("anything"), OutputFormat::Text);
    }

    #[test]
    fn test_render_failure_text() {
        let lines = render(
            &Err(failure(
                "Cannot remove video from list",
                Error::NotFound {
                    kind: EntityKind::Video,
                    id: "x".into(),
                },
            )),
            OutputFormat::Text,
        );
        assert_eq!(lines, ["Cannot remove video from list: Video does not exist"]);

        let lines = render(
            &Err(failure("Cannot play video", Error::EmptyCatalog)),
            OutputFormat::Text,
        );
        assert_eq!(lines, ["No videos available"]);
    }

    #[test]
    fn test_render_all_videos() {
        let mut flagged = Video::new("b", "B", vec!["#x".into()]);
        flagged.flag = Some("spam".into());
        let lines = render(
            &Ok(Response::Videos(vec![Video::new("a", "A", Vec::new()), flagged])),
            OutputFormat::Text,
        );
        assert_eq!(
            lines,
            [
                "Here's a list of all available videos:",
                "  A (a) []",
                "  B (b) [#x] - FLAGGED (reason: spam)",
            ]
        );
    }

    #[test]
    fn test_render_json_error() {
        let lines = render(
            &Err(failure("Cannot stop video", Error::NothingPlaying)),
            OutputFormat::Json,
        );
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["error"]["code"], "NOTHING_PLAYING");
        assert_eq!(value["error"]["message"], "No video is currently playing");
    }
}
