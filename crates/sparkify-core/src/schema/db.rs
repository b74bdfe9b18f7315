use rusqlite::{Connection, OptionalExtension, Transaction};
use std::path::Path;

use crate::catalog::{SongCatalog, SongMatch};
use crate::error::{Error, Result};
use crate::model::{Artist, Song, Songplay, Table, TableRow, TimeRow, User};

use super::migrations::{CREATE_TABLE_QUERIES, DROP_TABLE_QUERIES, MIGRATIONS};
use super::statements::Statements;

/// The single connection a load run holds, plus the statements it loads with.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    statements: Statements,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?, Statements::default())
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, Statements::default())
    }

    fn init(conn: Connection, statements: Statements) -> Result<Self> {
        // Per-connection setting; referential integrity is checked at insert.
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn, statements };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                for sql in migration.statements {
                    self.conn.execute_batch(sql)?;
                }
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }

    /// Drop the five star-schema tables and create them again, empty.
    pub fn reset(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for sql in DROP_TABLE_QUERIES.iter().chain(CREATE_TABLE_QUERIES) {
            tx.execute_batch(sql)?;
        }
        tx.commit()?;
        log::info!("Dropped and recreated {} tables", Table::ALL.len());
        Ok(())
    }

    /// Start the transaction that holds one source file's rows.
    ///
    /// Dropping the returned [`Batch`] without calling [`Batch::commit`]
    /// rolls the file back.
    pub fn begin(&mut self) -> Result<Batch<'_>> {
        let tx = self.conn.transaction()?;
        Ok(Batch {
            tx,
            statements: &self.statements,
        })
    }
}

/// Rows written inside one uncommitted transaction.
#[derive(Debug)]
pub struct Batch<'a> {
    tx: Transaction<'a>,
    statements: &'a Statements,
}

impl Batch<'_> {
    /// Write one row with its table's conflict policy.
    ///
    /// Returns the number of rows changed: 0 when a conflict was ignored.
    pub fn insert(&self, row: &TableRow) -> Result<usize> {
        match row {
            TableRow::Artist(artist) => self.insert_artist(artist),
            TableRow::Song(song) => self.insert_song(song),
            TableRow::User(user) => self.upsert_user(user),
            TableRow::Time(time) => self.insert_time(time),
            TableRow::Songplay(songplay) => self.insert_songplay(songplay),
        }
    }

    pub fn insert_artist(&self, artist: &Artist) -> Result<usize> {
        let mut stmt = self.tx.prepare_cached(self.statements.insert_artist)?;
        Ok(stmt.execute(rusqlite::params![
            artist.artist_id,
            artist.name,
            artist.location,
            artist.latitude,
            artist.longitude,
        ])?)
    }

    pub fn insert_song(&self, song: &Song) -> Result<usize> {
        let mut stmt = self.tx.prepare_cached(self.statements.insert_song)?;
        Ok(stmt.execute(rusqlite::params![
            song.song_id,
            song.title,
            song.artist_id,
            song.year,
            song.duration,
        ])?)
    }

    pub fn upsert_user(&self, user: &User) -> Result<usize> {
        let mut stmt = self.tx.prepare_cached(self.statements.upsert_user)?;
        Ok(stmt.execute(rusqlite::params![
            user.user_id,
            user.first_name,
            user.last_name,
            user.gender,
            user.level,
        ])?)
    }

    pub fn insert_time(&self, time: &TimeRow) -> Result<usize> {
        let mut stmt = self.tx.prepare_cached(self.statements.insert_time)?;
        Ok(stmt.execute(rusqlite::params![
            time.start_time,
            time.hour,
            time.day,
            time.week,
            time.month,
            time.year,
            time.weekday,
        ])?)
    }

    pub fn insert_songplay(&self, songplay: &Songplay) -> Result<usize> {
        let mut stmt = self.tx.prepare_cached(self.statements.insert_songplay)?;
        Ok(stmt.execute(rusqlite::params![
            songplay.start_time,
            songplay.user_id,
            songplay.level,
            songplay.song_id,
            songplay.artist_id,
            songplay.session_id,
            songplay.location,
            songplay.user_agent,
        ])?)
    }

    /// Make every row written through this batch durable.
    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }
}

fn find_song_with(
    conn: &Connection,
    sql: &str,
    title: &str,
    artist_name: &str,
) -> Result<Option<SongMatch>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let found = stmt
        .query_row([title, artist_name], |row| {
            Ok(SongMatch {
                song_id: row.get(0)?,
                artist_id: row.get(1)?,
            })
        })
        .optional()?;
    Ok(found)
}

// Lookups inside a batch see the rows that batch has already written.
impl SongCatalog for Batch<'_> {
    fn find_song(&self, title: &str, artist_name: &str) -> Result<Option<SongMatch>> {
        find_song_with(&self.tx, self.statements.select_song, title, artist_name)
    }
}

impl SongCatalog for Database {
    fn find_song(&self, title: &str, artist_name: &str) -> Result<Option<SongMatch>> {
        find_song_with(&self.conn, self.statements.select_song, title, artist_name)
    }
}

/// Row counts of the five star-schema tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub artists: u64,
    pub songs: u64,
    pub users: u64,
    pub time: u64,
    pub songplays: u64,
}

impl TableCounts {
    #[must_use]
    pub const fn get(&self, table: Table) -> u64 {
        match table {
            Table::Artists => self.artists,
            Table::Songs => self.songs,
            Table::Users => self.users,
            Table::Time => self.time,
            Table::Songplays => self.songplays,
        }
    }
}

// Read queries
impl Database {
    /// Number of rows in one table.
    pub fn count(&self, table: Table) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        u64::try_from(count).map_err(|_| Error::InvalidData(format!("negative count {count}")))
    }

    pub fn counts(&self) -> Result<TableCounts> {
        Ok(TableCounts {
            artists: self.count(Table::Artists)?,
            songs: self.count(Table::Songs)?,
            users: self.count(Table::Users)?,
            time: self.count(Table::Time)?,
            songplays: self.count(Table::Songplays)?,
        })
    }

    pub fn get_artist(&self, artist_id: &str) -> Result<Artist> {
        self.conn
            .query_row(
                "SELECT artist_id, name, location, latitude, longitude
                 FROM artists WHERE artist_id = ?1",
                [artist_id],
                |row| {
                    Ok(Artist {
                        artist_id: row.get(0)?,
                        name: row.get(1)?,
                        location: row.get(2)?,
                        latitude: row.get(3)?,
                        longitude: row.get(4)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| Error::NotFound {
                entity: "artist",
                id: artist_id.to_string(),
            })
    }

    pub fn get_song(&self, song_id: &str) -> Result<Song> {
        self.conn
            .query_row(
                "SELECT song_id, title, artist_id, year, CAST(duration AS INTEGER)
                 FROM songs WHERE song_id = ?1",
                [song_id],
                |row| {
                    Ok(Song {
                        song_id: row.get(0)?,
                        title: row.get(1)?,
                        artist_id: row.get(2)?,
                        year: row.get(3)?,
                        duration: row.get(4)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| Error::NotFound {
                entity: "song",
                id: song_id.to_string(),
            })
    }

    pub fn get_user(&self, user_id: i64) -> Result<User> {
        self.conn
            .query_row(
                "SELECT user_id, first_name, last_name, gender, level
                 FROM users WHERE user_id = ?1",
                [user_id],
                |row| {
                    Ok(User {
                        user_id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        gender: row.get(3)?,
                        level: row.get(4)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| Error::NotFound {
                entity: "user",
                id: user_id.to_string(),
            })
    }

    pub fn get_time(&self, start_time: i64) -> Result<TimeRow> {
        self.conn
            .query_row(
                "SELECT start_time, hour, day, week, month, year, weekday
                 FROM time WHERE start_time = ?1",
                [start_time],
                |row| {
                    Ok(TimeRow {
                        start_time: row.get(0)?,
                        hour: row.get(1)?,
                        day: row.get(2)?,
                        week: row.get(3)?,
                        month: row.get(4)?,
                        year: row.get(5)?,
                        weekday: row.get(6)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| Error::NotFound {
                entity: "time",
                id: start_time.to_string(),
            })
    }

    /// All songplays in insertion order.
    pub fn list_songplays(&self) -> Result<Vec<Songplay>> {
        let mut stmt = self.conn.prepare(
            "SELECT start_time, user_id, level, song_id, artist_id,
                    session_id, location, user_agent
             FROM songplays
             ORDER BY songplay_id",
        )?;

        let songplays = stmt
            .query_map([], |row| {
                Ok(Songplay {
                    start_time: row.get(0)?,
                    user_id: row.get(1)?,
                    level: row.get(2)?,
                    song_id: row.get(3)?,
                    artist_id: row.get(4)?,
                    session_id: row.get(5)?,
                    location: row.get(6)?,
                    user_agent: row.get(7)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(songplays)
    }
}
