//! Shell command parsing and execution

use crate::output::{self, OutputFormat};
use anyhow::bail;
use reel_core::{
    Error, FlagOutcome, NowPlaying, PauseOutcome, PlayOutcome, PlayerSession, PlaylistView, Video,
};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub const INVALID_COMMAND: &str =
    "Please enter a valid command, type HELP for a list of available commands.";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NumberOfVideos,
    ShowAllVideos,
    Play(String),
    PlayRandom,
    Stop,
    Pause,
    Continue,
    ShowPlaying,
    CreatePlaylist(String),
    AddToPlaylist { playlist: String, video_id: String },
    RemoveFromPlaylist { playlist: String, video_id: String },
    ClearPlaylist(String),
    DeletePlaylist(String),
    ShowAllPlaylists,
    ShowPlaylist(String),
    SearchVideos(String),
    SearchVideosWithTag(String),
    SelectResult(usize),
    FlagVideo { video_id: String, reason: Option<String> },
    AllowVideo(String),
    Help,
    Exit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            bail!(INVALID_COMMAND);
        };
        let args: Vec<&str> = words.collect();

        let command = match (keyword.to_uppercase().as_str(), args.as_slice()) {
            ("NUMBER_OF_VIDEOS", []) => Command::NumberOfVideos,
            ("SHOW_ALL_VIDEOS", []) => Command::ShowAllVideos,
            ("PLAY", [id]) => Command::Play(id.to_string()),
            ("PLAY_RANDOM", []) => Command::PlayRandom,
            ("STOP", []) => Command::Stop,
            ("PAUSE", []) => Command::Pause,
            ("CONTINUE", []) => Command::Continue,
            ("SHOW_PLAYING", []) => Command::ShowPlaying,
            ("CREATE_PLAYLIST", [name]) => Command::CreatePlaylist(name.to_string()),
            ("ADD_TO_PLAYLIST", [name, id]) => Command::AddToPlaylist {
                playlist: name.to_string(),
                video_id: id.to_string(),
            },
            ("REMOVE_FROM_PLAYLIST", [name, id]) => Command::RemoveFromPlaylist {
                playlist: name.to_string(),
                video_id: id.to_string(),
            },
            ("CLEAR_PLAYLIST", [name]) => Command::ClearPlaylist(name.to_string()),
            ("DELETE_PLAYLIST", [name]) => Command::DeletePlaylist(name.to_string()),
            ("SHOW_ALL_PLAYLISTS", []) => Command::ShowAllPlaylists,
            ("SHOW_PLAYLIST", [name]) => Command::ShowPlaylist(name.to_string()),
            ("SEARCH_VIDEOS", [term]) => Command::SearchVideos(term.to_string()),
            ("SEARCH_VIDEOS_WITH_TAG", [tag]) => Command::SearchVideosWithTag(tag.to_string()),
            ("SELECT_RESULT", [index]) => match index.parse() {
                Ok(index) => Command::SelectResult(index),
                Err(_) => bail!(INVALID_COMMAND),
            },
            ("FLAG_VIDEO", [id, reason @ ..]) => Command::FlagVideo {
                video_id: id.to_string(),
                reason: (!reason.is_empty()).then(|| reason.join(" ")),
            },
            ("ALLOW_VIDEO", [id]) => Command::AllowVideo(id.to_string()),
            ("HELP", []) => Command::Help,
            ("EXIT", []) => Command::Exit,
            _ => bail!(INVALID_COMMAND),
        };

        Ok(command)
    }
}

/// Successful result of a command, ready for rendering
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "response", content = "data", rename_all = "snake_case")]
pub enum Response {
    VideoCount(usize),
    Videos(Vec<Video>),
    Played(PlayOutcome),
    Stopped(Video),
    Paused(PauseOutcome),
    Resumed(Video),
    NowPlaying(Option<NowPlaying>),
    PlaylistCreated(String),
    AddedToPlaylist { playlist: String, video: Video },
    RemovedFromPlaylist { playlist: String, video: Video },
    PlaylistCleared(String),
    PlaylistDeleted(String),
    Playlists(Vec<String>),
    Playlist { requested: String, view: PlaylistView },
    SearchResults { term: String, results: Vec<Video> },
    Flagged(FlagOutcome),
    Allowed(Video),
    Help,
    Closing,
}

/// A failed command together with the action it was attempting
#[derive(Debug)]
pub struct Failure {
    /// Human-readable action, e.g. `Cannot add video to my_list`
    pub action: String,
    pub error: Error,
}

fn fail(action: impl Into<String>) -> impl FnOnce(Error) -> Failure {
    let action = action.into();
    move |error| Failure { action, error }
}

/// Lines to print, and whether the shell should terminate
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub exit: bool,
}

/// Interactive front-end over a [`PlayerSession`]
pub struct Shell {
    session: PlayerSession,
    format: OutputFormat,
    /// Set after a text-mode search with results; the next line is the answer
    awaiting_selection: bool,
}

impl Shell {
    pub fn new(session: PlayerSession, format: OutputFormat) -> Self {
        Self {
            session,
            format,
            awaiting_selection: false,
        }
    }

    pub fn session(&self) -> &PlayerSession {
        &self.session
    }

    /// Whether the next line answers the search prompt
    pub fn awaiting_selection(&self) -> bool {
        self.awaiting_selection
    }

    /// Handle one line of input
    pub fn handle_line(&mut self, line: &str) -> Reply {
        if std::mem::take(&mut self.awaiting_selection) {
            return Reply {
                lines: self.answer_selection(line.trim()),
                exit: false,
            };
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                debug!(line, "Unparseable command");
                return Reply {
                    lines: vec![e.to_string()],
                    exit: false,
                };
            }
        };

        let exit = command == Command::Exit;
        let result = self.execute(command);

        if self.format == OutputFormat::Text {
            if let Ok(Response::SearchResults { results, .. }) = &result {
                self.awaiting_selection = !results.is_empty();
            }
        }

        Reply {
            lines: output::render(&result, self.format),
            exit,
        }
    }

    /// Interpret the answer to the "play any of the above?" prompt
    fn answer_selection(&mut self, answer: &str) -> Vec<String> {
        // Plain digits only; `usize::from_str` also accepts a leading `+`
        let index = match answer.parse::<usize>() {
            Ok(index) if answer.bytes().all(|b| b.is_ascii_digit()) => index,
            _ => {
                debug!(answer, "Selection declined");
                return Vec::new();
            }
        };

        match self.session.select_search_result(index) {
            Err(Error::InvalidSelectionIndex { index, count }) => {
                debug!(index, count, "Selection out of range, ignoring");
                Vec::new()
            }
            result => output::render(
                &result.map(Response::Played).map_err(fail("Cannot play video")),
                self.format,
            ),
        }
    }

    /// Run a command against the session
    pub fn execute(&mut self, command: Command) -> Result<Response, Failure> {
        let session = &mut self.session;

        match command {
            Command::NumberOfVideos => Ok(Response::VideoCount(session.number_of_videos())),
            Command::ShowAllVideos => Ok(Response::Videos(session.list_videos())),
            Command::Play(id) => session
                .play(&id)
                .map(Response::Played)
                .map_err(fail("Cannot play video")),
            Command::PlayRandom => session
                .play_random()
                .map(Response::Played)
                .map_err(fail("Cannot play video")),
            Command::Stop => session
                .stop()
                .map(Response::Stopped)
                .map_err(fail("Cannot stop video")),
            Command::Pause => session
                .pause()
                .map(Response::Paused)
                .map_err(fail("Cannot pause video")),
            Command::Continue => session
                .resume()
                .map(Response::Resumed)
                .map_err(fail("Cannot continue video")),
            Command::ShowPlaying => Ok(Response::NowPlaying(session.now_playing())),
            Command::CreatePlaylist(name) => session
                .create_playlist(&name)
                .map(|playlist| Response::PlaylistCreated(playlist.name().to_string()))
                .map_err(fail("Cannot create playlist")),
            Command::AddToPlaylist { playlist, video_id } => session
                .add_to_playlist(&playlist, &video_id)
                .map_err(fail(format!("Cannot add video to {playlist}")))
                .map(|video| Response::AddedToPlaylist { playlist, video }),
            Command::RemoveFromPlaylist { playlist, video_id } => session
                .remove_from_playlist(&playlist, &video_id)
                .map_err(fail(format!("Cannot remove video from {playlist}")))
                .map(|video| Response::RemovedFromPlaylist { playlist, video }),
            Command::ClearPlaylist(name) => session
                .clear_playlist(&name)
                .map_err(fail(format!("Cannot clear playlist {name}")))
                .map(|()| Response::PlaylistCleared(name)),
            Command::DeletePlaylist(name) => session
                .delete_playlist(&name)
                .map_err(fail(format!("Cannot delete playlist {name}")))
                .map(|_| Response::PlaylistDeleted(name)),
            Command::ShowAllPlaylists => Ok(Response::Playlists(session.list_playlists())),
            Command::ShowPlaylist(name) => session
                .show_playlist(&name)
                .map_err(fail(format!("Cannot show playlist {name}")))
                .map(|view| Response::Playlist {
                    requested: name,
                    view,
                }),
            Command::SearchVideos(term) => {
                let results = session.search_by_title(&term);
                Ok(Response::SearchResults { term, results })
            }
            Command::SearchVideosWithTag(term) => {
                let results = session.search_by_tag(&term);
                Ok(Response::SearchResults { term, results })
            }
            Command::SelectResult(index) => session
                .select_search_result(index)
                .map(Response::Played)
                .map_err(fail("Cannot play video")),
            Command::FlagVideo { video_id, reason } => session
                .flag(&video_id, reason.as_deref())
                .map(Response::Flagged)
                .map_err(fail("Cannot flag video")),
            Command::AllowVideo(video_id) => session
                .allow(&video_id)
                .map(Response::Allowed)
                .map_err(fail("Cannot remove flag from video")),
            Command::Help => Ok(Response::Help),
            Command::Exit => Ok(Response::Closing),
        }
    }
}

/// Feed every line of `input` to the shell, writing replies to `out`.
///
/// Blank lines and `#` comments are skipped, except as the answer to a
/// search prompt, where they count as "no". With `prompt` set, a prompt is
/// written before each line is read.
pub async fn run_shell<R, W>(
    shell: &mut Shell,
    input: R,
    out: &mut W,
    prompt: bool,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        if prompt {
            write!(out, "{}", output::PROMPT)?;
            out.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let skip = line.trim().is_empty() || line.trim_start().starts_with('#');
        if skip && !shell.awaiting_selection() {
            continue;
        }

        let reply = shell.handle_line(&line);
        for text in &reply.lines {
            writeln!(out, "{text}")?;
        }
        if reply.exit {
            break;
        }
    }

    Ok(())
}
