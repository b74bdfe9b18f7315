use serde::{Deserialize, Serialize};

/// A catalog song. `duration` is whole seconds, truncated from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: Option<i32>,
    pub duration: i64,
}

impl Song {
    #[must_use]
    pub fn new(
        song_id: impl Into<String>,
        title: impl Into<String>,
        artist_id: impl Into<String>,
        duration: i64,
    ) -> Self {
        Self {
            song_id: song_id.into(),
            title: title.into(),
            artist_id: artist_id.into(),
            year: None,
            duration,
        }
    }

    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}
