//! Song metadata files: one JSON object per file, one song and its artist.

use serde::Deserialize;
use sparkify_core::model::{Artist, Song, TableRow};
use sparkify_core::SongCatalog;
use std::path::Path;

use super::{read_source, LooseInt, Transformer};
use crate::error::{EtlError, EtlResult};

/// The fields of a song file this pipeline reads; others are ignored.
#[derive(Debug, Deserialize)]
struct SongRecord {
    artist_id: String,
    artist_name: String,
    artist_location: Option<String>,
    artist_latitude: Option<f64>,
    artist_longitude: Option<f64>,
    song_id: String,
    title: String,
    year: Option<LooseInt>,
    duration: LooseInt,
}

/// Produces one [`Artist`] row followed by one [`Song`] row per file.
///
/// `year` and `duration` are coerced to whole numbers; the fractional part
/// of the duration is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SongFileTransformer;

impl SongFileTransformer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse the contents of one song file.
    pub fn parse(path: &Path, content: &str) -> EtlResult<Vec<TableRow>> {
        let parse_error = |source: serde_json::Error| EtlError::Parse {
            path: path.to_path_buf(),
            line: source.line().max(1),
            source,
        };
        let invalid = |field: &'static str, message: String| EtlError::InvalidValue {
            path: path.to_path_buf(),
            line: 1,
            field,
            message,
        };

        // Going through `Value` lets a repeated key resolve to its last
        // occurrence instead of failing the whole file.
        let value: serde_json::Value = serde_json::from_str(content).map_err(parse_error)?;
        let record: SongRecord = serde_json::from_value(value).map_err(parse_error)?;

        let year = record
            .year
            .as_ref()
            .map(|y| {
                y.to_i64()
                    .and_then(|n| i32::try_from(n).map_err(|e| e.to_string()))
                    .map_err(|message| invalid("year", message))
            })
            .transpose()?;
        let duration = record
            .duration
            .to_i64()
            .map_err(|message| invalid("duration", message))?;

        let artist = Artist {
            artist_id: record.artist_id.clone(),
            name: record.artist_name,
            location: record.artist_location,
            latitude: record.artist_latitude,
            longitude: record.artist_longitude,
        };
        let song = Song {
            song_id: record.song_id,
            title: record.title,
            artist_id: record.artist_id,
            year,
            duration,
        };

        Ok(vec![artist.into(), song.into()])
    }
}

impl Transformer for SongFileTransformer {
    fn name(&self) -> &str {
        "songs"
    }

    fn transform(&self, path: &Path, _catalog: &dyn SongCatalog) -> EtlResult<Vec<TableRow>> {
        let content = read_source(path)?;
        Self::parse(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkify_core::InMemoryCatalog;
    use std::fs;
    use tempfile::TempDir;

    const SONG_FILE: &str = r#"{"artist_id":"A1","artist_name":"Bea","artist_location":"LA","artist_latitude":34.0,"artist_longitude":-118.0,"song_id":"S1","title":"Song1","artist_id":"A1","year":2001,"duration":210.5}"#;

    fn parse(content: &str) -> EtlResult<Vec<TableRow>> {
        SongFileTransformer::parse(Path::new("/data/song.json"), content)
    }

    #[test]
    fn test_song_file_yields_artist_then_song() {
        let rows = parse(SONG_FILE).unwrap();
        assert_eq!(
            rows,
            vec![
                TableRow::Artist(
                    Artist::new("A1", "Bea")
                        .with_location("LA")
                        .with_coordinates(34.0, -118.0)
                ),
                TableRow::Song(Song::new("S1", "Song1", "A1", 210).with_year(2001)),
            ]
        );
    }

    #[test]
    fn test_nullable_artist_fields() {
        let rows = parse(
            r#"{"num_songs":1,"artist_id":"AR7","artist_name":"Cy","artist_location":null,
                "artist_latitude":null,"artist_longitude":null,"song_id":"SO7",
                "title":"Quiet","year":0,"duration":99.99}"#,
        )
        .unwrap();

        let TableRow::Artist(artist) = &rows[0] else {
            panic!("expected artist row first");
        };
        assert!(artist.location.is_none());
        assert!(artist.latitude.is_none());
        assert!(artist.longitude.is_none());

        let TableRow::Song(song) = &rows[1] else {
            panic!("expected song row second");
        };
        assert_eq!(song.year, Some(0));
        assert_eq!(song.duration, 99);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let err = parse(r#"{"artist_id": "A1","#).unwrap_err();
        assert!(matches!(err, EtlError::Parse { .. }));
    }

    #[test]
    fn test_missing_required_field_is_a_parse_error() {
        let err = parse(r#"{"artist_id":"A1","artist_name":"Bea","song_id":"S1","year":2001,"duration":1.0}"#)
            .unwrap_err();
        assert!(matches!(err, EtlError::Parse { .. }));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_uncoercible_duration() {
        let err = parse(r#"{"artist_id":"A1","artist_name":"Bea","song_id":"S1","title":"T","duration":"long"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            EtlError::InvalidValue {
                field: "duration",
                ..
            }
        ));
    }

    #[test]
    fn test_transform_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("TRAAAAW128F429D538.json");
        fs::write(&path, SONG_FILE).unwrap();

        let rows = SongFileTransformer::new()
            .transform(&path, &InMemoryCatalog::new())
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_transform_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = SongFileTransformer::new()
            .transform(&temp_dir.path().join("gone.json"), &InMemoryCatalog::new());
        assert!(matches!(result, Err(EtlError::Io { .. })));
    }
}
