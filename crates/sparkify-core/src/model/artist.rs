use serde::{Deserialize, Serialize};

/// A performing artist, as described by a song file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Artist {
    #[must_use]
    pub fn new(artist_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            artist_id: artist_id.into(),
            name: name.into(),
            location: None,
            latitude: None,
            longitude: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_new() {
        let artist = Artist::new("AR1", "Bea");
        assert_eq!(artist.artist_id, "AR1");
        assert_eq!(artist.name, "Bea");
        assert!(artist.location.is_none());
        assert!(artist.latitude.is_none());
    }

    #[test]
    fn test_artist_builder() {
        let artist = Artist::new("AR1", "Bea")
            .with_location("LA")
            .with_coordinates(34.0, -118.0);

        assert_eq!(artist.location, Some("LA".to_string()));
        assert_eq!(artist.latitude, Some(34.0));
        assert_eq!(artist.longitude, Some(-118.0));
    }
}
