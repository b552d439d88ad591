//! Basic playback example
//!
//! Walks a session through playback, playlists, search and flagging using
//! the bundled catalog.
//!
//! Run with: cargo run -p reel-core --example basic_playback

use reel_core::{PlayerConfig, PlayerSession, PlayerState, Result};

fn main() -> Result<()> {
    println!("Reel Core - Basic Playback Example");
    println!("==================================\n");

    let config = PlayerConfig {
        random_seed: Some(2024),
        ..Default::default()
    };
    let mut session = PlayerSession::new(config)?;

    println!("Catalog ({} videos):", session.number_of_videos());
    for video in session.list_videos() {
        println!("  - {}", video);
    }
    println!();

    // Playback
    let outcome = session.play_random()?;
    println!("Playing: {}", outcome.playing.title);
    session.pause()?;
    if let Some(now) = session.now_playing() {
        println!("Now: {} (paused: {})", now.video.title, now.paused);
    }
    session.resume()?;
    assert_eq!(session.state(), PlayerState::Playing);

    // Playlists
    session.create_playlist("Weekend Watch")?;
    session.add_to_playlist("weekend watch", "funny_dogs_video_id")?;
    session.add_to_playlist("WEEKEND WATCH", "life_at_google_video_id")?;
    let view = session.show_playlist("weekend watch")?;
    println!("\nPlaylist '{}':", view.name);
    for video in &view.videos {
        println!("  - {}", video.title);
    }

    // Search and select
    println!("\nSearch 'cat':");
    for (i, video) in session.search_by_title("cat").iter().enumerate() {
        println!("  {}) {}", i + 1, video);
    }
    let outcome = session.select_search_result(1)?;
    println!("Selected: {}", outcome.playing.title);

    // Flagging stops the current video
    let flagged = session.flag(&outcome.playing.id, Some("not today"))?;
    println!(
        "\nFlagged '{}' (reason: {}), stopped playback: {}",
        flagged.video.title,
        flagged.reason,
        flagged.stopped.is_some()
    );
    match session.play(&outcome.playing.id) {
        Ok(_) => println!("Unexpectedly played a flagged video"),
        Err(e) => println!("Play refused: {} [{}]", e, e.error_code()),
    }

    Ok(())
}
