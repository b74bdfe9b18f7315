/// The SQL used to load and query the star schema.
///
/// Built once at startup and owned by [`Database`](super::Database), so every
/// batch uses the same statement text and the prepared-statement cache stays
/// warm across files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    /// First write wins.
    pub insert_artist: &'static str,
    /// First write wins.
    pub insert_song: &'static str,
    /// Overwrites `level` only.
    pub upsert_user: &'static str,
    /// First write wins.
    pub insert_time: &'static str,
    pub insert_songplay: &'static str,
    /// Exact title + artist name join, lowest `song_id` first.
    pub select_song: &'static str,
}

impl Default for Statements {
    fn default() -> Self {
        Self {
            insert_artist: "INSERT INTO artists (artist_id, name, location, latitude, longitude)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT (artist_id) DO NOTHING",
            insert_song: "INSERT INTO songs (song_id, title, artist_id, year, duration)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT (song_id) DO NOTHING",
            upsert_user: "INSERT INTO users (user_id, first_name, last_name, gender, level)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT (user_id) DO UPDATE SET level = excluded.level",
            insert_time: "INSERT INTO time (start_time, hour, day, week, month, year, weekday)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT (start_time) DO NOTHING",
            insert_songplay: "INSERT INTO songplays (
                    start_time, user_id, level, song_id, artist_id,
                    session_id, location, user_agent
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT (songplay_id) DO NOTHING",
            select_song: "SELECT s.song_id, s.artist_id
                FROM songs s
                INNER JOIN artists a ON s.artist_id = a.artist_id
                WHERE s.title = ?1 AND a.name = ?2
                ORDER BY s.song_id
                LIMIT 1",
        }
    }
}
