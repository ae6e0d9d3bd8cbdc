use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude.
///
/// The `Position` struct is commonly used to store a point on Earth
/// in decimal degrees. Latitude values range from -90.0 to 90.0, and
/// longitude values range from -180.0 to 180.0.
///
/// # Example
///
/// ```rust
/// use common::position::Position;
///
/// let pos = Position {
///     latitude: 30.2,
///     longitude: 120.1,
/// };
///
/// println!("{:?}", pos);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Creates a new [`Position`] with the given latitude and longitude.
    ///
    /// # Example
    ///
    /// ```rust
    /// use common::position::Position;
    ///
    /// let pos = Position::new(&30.2, &120.1);
    /// assert_eq!(pos.longitude, 120.1);
    /// ```
    pub fn new(latitude: &f64, longitude: &f64) -> Self {
        Position {
            latitude: *latitude,
            longitude: *longitude,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// The coordinate part of a [`PositionResult`].
///
/// `altitude` and `altitude_accuracy` are never reported by the mapping SDK;
/// they are kept so the serialized form lines up with the W3C geolocation
/// `coords` object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub altitude_accuracy: Option<f64>,
}

/// A normalized one-shot geolocation fix.
///
/// Serializes as `{"coords": {"latitude": .., "longitude": .., "accuracy": ..,
/// "altitude": null, "altitudeAccuracy": null}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionResult {
    pub coords: Coordinates,
}

impl PositionResult {
    /// Creates a new [`PositionResult`] from a fix without altitude information.
    pub fn new(position: Position, accuracy: Option<f64>) -> Self {
        PositionResult {
            coords: Coordinates {
                latitude: position.latitude,
                longitude: position.longitude,
                accuracy,
                altitude: None,
                altitude_accuracy: None,
            },
        }
    }

    /// Returns the fix as a plain [`Position`].
    pub fn position(&self) -> Position {
        Position {
            latitude: self.coords.latitude,
            longitude: self.coords.longitude,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
