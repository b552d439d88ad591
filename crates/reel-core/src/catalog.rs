//! Video catalog
//!
//! Holds every known video keyed by id. The catalog is loaded once from a
//! line-oriented text source:
//!
//! ```text
//! Funny Dogs | funny_dogs_video_id |  #dog , #animal
//! Video about nothing | nothing_video_id |
//! ```
//!
//! Each line is `title | id | tags`, with tags separated by commas. After
//! loading, only the flag state of a video changes.

use crate::{types::Video, Error, Result};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

const BUNDLED_CATALOG: &str = include_str!("../data/videos.txt");

/// In-memory catalog of videos
#[derive(Debug, Clone, Default)]
pub struct VideoCatalog {
    videos: BTreeMap<String, Video>,
}

impl VideoCatalog {
    /// Build a catalog from already constructed videos, rejecting duplicate ids
    pub fn from_videos(videos: impl IntoIterator<Item = Video>) -> Result<Self> {
        let mut catalog = Self::default();
        for (index, video) in videos.into_iter().enumerate() {
            catalog.insert(video, index + 1)?;
        }
        Ok(catalog)
    }

    /// The catalog shipped with the player
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_CATALOG)
    }

    /// Load a catalog file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(std::io::BufReader::new(file))?;
        info!(path = %path.display(), videos = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Read a catalog from any buffered reader
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut catalog = Self::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(video) = parse_line(&line, index + 1)? {
                catalog.insert(video, index + 1)?;
            }
        }
        Ok(catalog)
    }

    /// Parse a catalog held in memory
    pub fn parse(source: &str) -> Result<Self> {
        Self::from_reader(source.as_bytes())
    }

    fn insert(&mut self, video: Video, line: usize) -> Result<()> {
        if self.videos.contains_key(&video.id) {
            return Err(Error::CatalogParse {
                line,
                reason: format!("duplicate video id '{}'", video.id),
            });
        }
        debug!(id = %video.id, title = %video.title, "Catalog entry");
        self.videos.insert(video.id.clone(), video);
        Ok(())
    }

    /// Look up a video by id
    pub fn get(&self, id: &str) -> Option<&Video> {
        self.videos.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Video> {
        self.videos.get_mut(id)
    }

    /// All videos, ordered by id
    pub fn videos(&self) -> impl Iterator<Item = &Video> {
        self.videos.values()
    }

    /// All videos, ordered by their formatted display string
    pub fn sorted_by_display(&self) -> Vec<Video> {
        let mut videos: Vec<Video> = self.videos.values().cloned().collect();
        videos.sort_by_cached_key(|v| v.to_string());
        videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<Option<Video>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let mut fields = line.split('|').map(str::trim);
    let title = fields.next().unwrap_or_default();
    let id = fields.next().ok_or_else(|| Error::CatalogParse {
        line: line_number,
        reason: "expected 'title | id | tags'".to_string(),
    })?;
    if id.is_empty() {
        return Err(Error::CatalogParse {
            line: line_number,
            reason: "empty video id".to_string(),
        });
    }

    let tags = fields
        .next()
        .map(|tags| {
            tags.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(Some(Video::new(id, title, tags)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog() {
        let catalog = VideoCatalog::bundled().unwrap();
        assert_eq!(catalog.len(), 5);

        let cats = catalog.get("amazing_cats_video_id").unwrap();
        assert_eq!(cats.title, "Amazing Cats");
        assert_eq!(cats.tags, vec!["#cat", "#animal"]);

        let nothing = catalog.get("nothing_video_id").unwrap();
        assert!(nothing.tags.is_empty());
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let catalog = VideoCatalog::parse("\nA | a | x\n   \nB | b\n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("b").unwrap().tags.is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_id() {
        let err = VideoCatalog::parse("A | a | x\njust a title\n").unwrap_err();
        assert!(matches!(err, Error::CatalogParse { line: 2, .. }));

        let err = VideoCatalog::parse("A |  | x\n").unwrap_err();
        assert!(matches!(err, Error::CatalogParse { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_duplicate_id() {
        let err = VideoCatalog::parse("A | a |\nB | a |\n").unwrap_err();
        assert!(matches!(err, Error::CatalogParse { line: 2, .. }));
    }

    #[test]
    fn test_sorted_by_display() {
        let catalog = VideoCatalog::bundled().unwrap();
        let titles: Vec<_> = catalog
            .sorted_by_display()
            .into_iter()
            .map(|v| v.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Amazing Cats",
                "Another Cat Video",
                "Funny Dogs",
                "Life at Google",
                "Video about nothing",
            ]
        );
    }
}
