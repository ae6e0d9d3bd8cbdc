use thiserror::Error;

/// Errors surfaced by the SDK loader and the geolocation adapter.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AmapError {
    /// A required configuration value is absent or empty.
    #[error("{0} is not configured")]
    MissingConfiguration(&'static str),

    /// The SDK loader reported a failure.
    #[error("failed to load the AMap SDK: {0}")]
    SdkLoad(String),

    /// The geolocation query did not complete.
    #[error("{0}")]
    GeolocationFailure(String),

    /// The query completed but carried no numeric coordinates.
    #[error("failed to parse the AMap geolocation coordinates")]
    CoordinateParseFailure,
}
