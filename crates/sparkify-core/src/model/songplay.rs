use serde::{Deserialize, Serialize};

/// One song-play event: the fact row of the star schema.
///
/// `songplay_id` is assigned by the database on insert. `song_id` and
/// `artist_id` are `None` when the play could not be matched against the
/// song catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Songplay {
    /// Epoch milliseconds; references `time.start_time`.
    pub start_time: i64,
    pub user_id: i64,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl Songplay {
    /// Whether the play was resolved to a catalog song.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.song_id.is_some()
    }
}
