/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

pub const TIME_TABLE_CREATE: &str = r#"
CREATE TABLE IF NOT EXISTS time (
    start_time INTEGER PRIMARY KEY,
    hour INTEGER,
    day INTEGER,
    week INTEGER,
    month INTEGER,
    year INTEGER,
    weekday INTEGER
)"#;

pub const ARTIST_TABLE_CREATE: &str = r#"
CREATE TABLE IF NOT EXISTS artists (
    artist_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    location TEXT,
    latitude REAL,
    longitude REAL
)"#;

pub const USER_TABLE_CREATE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY,
    first_name TEXT,
    last_name TEXT,
    gender TEXT CHECK (length(gender) <= 1),
    level TEXT
)"#;

pub const SONG_TABLE_CREATE: &str = r#"
CREATE TABLE IF NOT EXISTS songs (
    song_id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    artist_id TEXT REFERENCES artists(artist_id),
    year INTEGER,
    duration REAL NOT NULL
)"#;

pub const SONGPLAY_TABLE_CREATE: &str = r#"
CREATE TABLE IF NOT EXISTS songplays (
    songplay_id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_time INTEGER NOT NULL REFERENCES time(start_time),
    user_id INTEGER NOT NULL REFERENCES users(user_id),
    level TEXT,
    song_id TEXT,
    artist_id TEXT REFERENCES artists(artist_id),
    session_id INTEGER,
    location TEXT,
    user_agent TEXT
)"#;

const SONG_LOOKUP_INDEX_CREATE: &str =
    "CREATE INDEX IF NOT EXISTS idx_songs_title ON songs(title)";

/// Table creation, referenced tables first.
pub const CREATE_TABLE_QUERIES: &[&str] = &[
    TIME_TABLE_CREATE,
    ARTIST_TABLE_CREATE,
    USER_TABLE_CREATE,
    SONG_TABLE_CREATE,
    SONGPLAY_TABLE_CREATE,
    SONG_LOOKUP_INDEX_CREATE,
];

/// Table removal, referencing tables first.
pub const DROP_TABLE_QUERIES: &[&str] = &[
    "DROP TABLE IF EXISTS songplays",
    "DROP TABLE IF EXISTS users",
    "DROP TABLE IF EXISTS songs",
    "DROP TABLE IF EXISTS artists",
    "DROP TABLE IF EXISTS time",
];

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "star_schema",
    statements: CREATE_TABLE_QUERIES,
}];
