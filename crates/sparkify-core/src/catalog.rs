//! Song catalog lookup used to resolve songplay foreign keys.
//!
//! A play event only carries a song title and an artist name. Resolution is
//! an exact, case-sensitive match on both; anything else is left unmatched.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Artist, Song};

/// The identifiers of a catalog song and its artist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}

/// Looks up catalog songs by exact title and artist name.
pub trait SongCatalog {
    /// Find the song whose title equals `title` and whose artist's name
    /// equals `artist_name`. When several songs match, the one with the
    /// lowest `song_id` is returned.
    fn find_song(&self, title: &str, artist_name: &str) -> Result<Option<SongMatch>>;
}

/// A catalog held in memory, keyed by `(title, artist name)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    songs: HashMap<(String, String), SongMatch>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a song performed by `artist`.
    pub fn insert(&mut self, song: &Song, artist: &Artist) {
        let candidate = SongMatch {
            song_id: song.song_id.clone(),
            artist_id: artist.artist_id.clone(),
        };
        self.songs
            .entry((song.title.clone(), artist.name.clone()))
            .and_modify(|existing| {
                if candidate.song_id < existing.song_id {
                    *existing = candidate.clone();
                }
            })
            .or_insert(candidate);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl SongCatalog for InMemoryCatalog {
    fn find_song(&self, title: &str, artist_name: &str) -> Result<Option<SongMatch>> {
        Ok(self
            .songs
            .get(&(title.to_string(), artist_name.to_string()))
            .cloned())
    }
}
