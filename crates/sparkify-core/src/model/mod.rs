pub mod artist;
pub mod song;
pub mod songplay;
pub mod time;
pub mod user;

pub use artist::Artist;
pub use song::Song;
pub use songplay::Songplay;
pub use time::TimeRow;
pub use user::User;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five target tables of the star schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    Artists,
    Songs,
    Users,
    Time,
    Songplays,
}

impl Table {
    /// All tables, in creation order (referenced tables first).
    pub const ALL: [Self; 5] = [
        Self::Time,
        Self::Artists,
        Self::Users,
        Self::Songs,
        Self::Songplays,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Artists => "artists",
            Self::Songs => "songs",
            Self::Users => "users",
            Self::Time => "time",
            Self::Songplays => "songplays",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One typed row bound for a target table.
///
/// Transformers produce these in persistence order; the loader writes each
/// one with the conflict policy of its table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableRow {
    Artist(Artist),
    Song(Song),
    User(User),
    Time(TimeRow),
    Songplay(Songplay),
}

impl TableRow {
    #[must_use]
    pub const fn table(&self) -> Table {
        match self {
            Self::Artist(_) => Table::Artists,
            Self::Song(_) => Table::Songs,
            Self::User(_) => Table::Users,
            Self::Time(_) => Table::Time,
            Self::Songplay(_) => Table::Songplays,
        }
    }
}

impl From<Artist> for TableRow {
    fn from(artist: Artist) -> Self {
        Self::Artist(artist)
    }
}

impl From<Song> for TableRow {
    fn from(song: Song) -> Self {
        Self::Song(song)
    }
}

impl From<User> for TableRow {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<TimeRow> for TableRow {
    fn from(time: TimeRow) -> Self {
        Self::Time(time)
    }
}

impl From<Songplay> for TableRow {
    fn from(songplay: Songplay) -> Self {
        Self::Songplay(songplay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        let names: Vec<&str> = Table::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["time", "artists", "users", "songs", "songplays"]);
    }

    #[test]
    fn test_table_row_reports_its_table() {
        let row: TableRow = Artist::new("A1", "Bea").into();
        assert_eq!(row.table(), Table::Artists);
        assert_eq!(row.table().to_string(), "artists");
    }
}
