//! Event log files: newline-delimited JSON, one application event per line.
//!
//! Only song-play events (`page == "NextSong"`) are loaded. Each one yields a
//! time-dimension row, a user row and a songplay row; the songplay's song and
//! artist are resolved against the catalog by exact title and artist name.

use serde::Deserialize;
use sparkify_core::model::{Songplay, TableRow, TimeRow, User};
use sparkify_core::SongCatalog;
use std::path::Path;

use super::{read_source, LooseInt, Transformer};
use crate::error::{EtlError, EtlResult};

/// The event type of a song play.
pub const NEXT_SONG: &str = "NextSong";

/// A song-play event. Only parsed once the record is known to be one, since
/// other event types leave the user and song fields null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayEvent {
    ts: LooseInt,
    user_id: LooseInt,
    first_name: String,
    last_name: String,
    gender: String,
    level: String,
    song: Option<String>,
    artist: Option<String>,
    session_id: LooseInt,
    location: Option<String>,
    user_agent: Option<String>,
}

/// Produces time rows, then user rows, then songplay rows for each file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFileTransformer;

impl LogFileTransformer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse the contents of one log file.
    ///
    /// The first malformed line fails the whole file.
    pub fn parse(
        path: &Path,
        content: &str,
        catalog: &dyn SongCatalog,
    ) -> EtlResult<Vec<TableRow>> {
        let mut times = Vec::new();
        let mut users = Vec::new();
        let mut songplays = Vec::new();
        let mut events = 0usize;

        for (index, raw) in content.lines().enumerate() {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }
            events += 1;

            let parse_error = |source: serde_json::Error| EtlError::Parse {
                path: path.to_path_buf(),
                line,
                source,
            };
            let invalid = |field: &'static str, message: String| EtlError::InvalidValue {
                path: path.to_path_buf(),
                line,
                field,
                message,
            };

            let value: serde_json::Value = serde_json::from_str(raw).map_err(parse_error)?;
            if value.get("page").and_then(serde_json::Value::as_str) != Some(NEXT_SONG) {
                continue;
            }
            let event: PlayEvent = serde_json::from_value(value).map_err(parse_error)?;

            let start_time = event.ts.to_i64().map_err(|m| invalid("ts", m))?;
            let user_id = event.user_id.to_i64().map_err(|m| invalid("userId", m))?;
            let session_id = event
                .session_id
                .to_i64()
                .map_err(|m| invalid("sessionId", m))?;
            let time = TimeRow::from_millis(start_time).map_err(|e| invalid("ts", e.to_string()))?;

            let found = match (event.song.as_deref(), event.artist.as_deref()) {
                (Some(title), Some(artist)) => catalog.find_song(title, artist)?,
                _ => None,
            };
            if let Some(found) = &found {
                log::debug!(
                    "Matched play at {} to song {} by {}",
                    start_time,
                    found.song_id,
                    found.artist_id
                );
            }

            times.push(time);
            users.push(User {
                user_id,
                first_name: event.first_name,
                last_name: event.last_name,
                gender: event.gender,
                level: event.level.clone(),
            });
            songplays.push(Songplay {
                start_time,
                user_id,
                level: event.level,
                song_id: found.as_ref().map(|m| m.song_id.clone()),
                artist_id: found.map(|m| m.artist_id),
                session_id,
                location: event.location,
                user_agent: event.user_agent,
            });
        }

        let matched = songplays.iter().filter(|p| p.is_matched()).count();
        log::debug!(
            "{}: {} events, {} plays, {} matched",
            path.display(),
            events,
            songplays.len(),
            matched
        );

        let mut rows = Vec::with_capacity(times.len() + users.len() + songplays.len());
        rows.extend(times.into_iter().map(TableRow::from));
        rows.extend(users.into_iter().map(TableRow::from));
        rows.extend(songplays.into_iter().map(TableRow::from));
        Ok(rows)
    }
}

impl Transformer for LogFileTransformer {
    fn name(&self) -> &str {
        "logs"
    }

    fn transform(&self, path: &Path, catalog: &dyn SongCatalog) -> EtlResult<Vec<TableRow>> {
        let content = read_source(path)?;
        Self::parse(path, &content, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkify_core::model::{Artist, Song, Table};
    use sparkify_core::InMemoryCatalog;

    const PLAY: &str = r#"{"page":"NextSong","ts":1542242350796,"userId":"26","firstName":"Ryan","lastName":"Smith","gender":"M","level":"free","song":"Song1","artist":"Bea","sessionId":583,"location":"San Jose","userAgent":"Mozilla"}"#;
    const HOME: &str = r#"{"artist":null,"auth":"Logged In","firstName":"Ryan","gender":"M","lastName":"Smith","length":null,"level":"free","page":"Home","sessionId":583,"song":null,"ts":1542241826796,"userId":"26"}"#;
    const LOGGED_OUT: &str = r#"{"artist":null,"auth":"Logged Out","firstName":null,"gender":null,"lastName":null,"level":"free","page":"Login","sessionId":52,"song":null,"ts":1541207073796,"userId":""}"#;

    fn catalog() -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert(&Song::new("S1", "Song1", "A1", 210), &Artist::new("A1", "Bea"));
        catalog
    }

    fn parse(content: &str, catalog: &dyn SongCatalog) -> EtlResult<Vec<TableRow>> {
        LogFileTransformer::parse(Path::new("/data/events.json"), content, catalog)
    }

    fn songplays(rows: &[TableRow]) -> Vec<&Songplay> {
        rows.iter()
            .filter_map(|row| match row {
                TableRow::Songplay(play) => Some(play),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_matched_play() {
        let rows = parse(PLAY, &catalog()).unwrap();
        assert_eq!(rows.len(), 3);

        let plays = songplays(&rows);
        assert_eq!(plays.len(), 1);
        let play = plays[0];
        assert_eq!(play.song_id.as_deref(), Some("S1"));
        assert_eq!(play.artist_id.as_deref(), Some("A1"));
        assert_eq!(play.user_id, 26);
        assert_eq!(play.level, "free");
        assert_eq!(play.session_id, 583);
        assert_eq!(play.start_time, 1_542_242_350_796);
        assert_eq!(play.location.as_deref(), Some("San Jose"));
        assert_eq!(play.user_agent.as_deref(), Some("Mozilla"));
    }

    #[test]
    fn test_unmatched_play_against_empty_catalog() {
        let rows = parse(PLAY, &InMemoryCatalog::new()).unwrap();
        let plays = songplays(&rows);
        assert_eq!(plays.len(), 1);
        assert!(plays[0].song_id.is_none());
        assert!(plays[0].artist_id.is_none());
    }

    #[test]
    fn test_other_pages_produce_nothing() {
        let content = format!("{HOME}\n{LOGGED_OUT}\n");
        let rows = parse(&content, &catalog()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_rows_are_grouped_time_user_songplay() {
        let second = PLAY.replace("1542242350796", "1542242481796");
        let content = format!("{PLAY}\n{HOME}\n\n{second}\n");
        let rows = parse(&content, &catalog()).unwrap();

        let tables: Vec<Table> = rows.iter().map(TableRow::table).collect();
        assert_eq!(
            tables,
            vec![
                Table::Time,
                Table::Time,
                Table::Users,
                Table::Users,
                Table::Songplays,
                Table::Songplays,
            ]
        );
    }

    #[test]
    fn test_time_row_derived_from_ts() {
        let rows = parse(PLAY, &catalog()).unwrap();
        let TableRow::Time(time) = &rows[0] else {
            panic!("expected time row first");
        };
        assert_eq!(*time, TimeRow::from_millis(1_542_242_350_796).unwrap());
        assert_eq!((time.hour, time.day, time.month, time.year), (0, 15, 11, 2018));
        assert_eq!(time.weekday, 3);
    }

    #[test]
    fn test_user_row_coerces_user_id() {
        let rows = parse(PLAY, &catalog()).unwrap();
        let TableRow::User(user) = &rows[1] else {
            panic!("expected user row second");
        };
        assert_eq!(
            *user,
            User {
                user_id: 26,
                first_name: "Ryan".to_string(),
                last_name: "Smith".to_string(),
                gender: "M".to_string(),
                level: "free".to_string(),
            }
        );
    }

    #[test]
    fn test_match_requires_exact_title_and_artist() {
        for (song, artist) in [("song1", "Bea"), ("Song1", "bea"), ("Song1", "Cy")] {
            let line = PLAY
                .replace(r#""song":"Song1""#, &format!(r#""song":"{song}""#))
                .replace(r#""artist":"Bea""#, &format!(r#""artist":"{artist}""#));
            let rows = parse(&line, &catalog()).unwrap();
            assert!(songplays(&rows)[0].song_id.is_none(), "{song}/{artist}");
        }
    }

    #[test]
    fn test_missing_field_fails_the_file() {
        let broken = PLAY.replace(r#""sessionId":583,"#, "");
        let content = format!("{PLAY}\n{broken}\n");
        let err = parse(&content, &catalog()).unwrap_err();
        assert!(matches!(err, EtlError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_malformed_line_fails_the_file() {
        let content = format!("{PLAY}\nnot json\n");
        let err = parse(&content, &catalog()).unwrap_err();
        assert!(matches!(err, EtlError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_user_id_is_invalid() {
        let line = PLAY.replace(r#""userId":"26""#, r#""userId":"""#);
        let err = parse(&line, &catalog()).unwrap_err();
        assert!(matches!(
            err,
            EtlError::InvalidValue {
                field: "userId",
                ..
            }
        ));
    }
}
