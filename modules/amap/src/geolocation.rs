use crate::{
    PositionResult,
    error::AmapError,
    loader::SdkLoader,
    sdk::{GeolocationOptions, GeolocationResult, RawPosition, STATUS_COMPLETE},
};
use common::position::Position;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

/// Message used when the SDK fails without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "AMap geolocation returned an abnormal result";

#[derive(Clone, Copy, Debug)]
enum Axis {
    Longitude,
    Latitude,
}

type Strategy = fn(&RawPosition, Axis) -> Option<f64>;

/// Ways to read a coordinate off the SDK position object, tried in order.
const EXTRACTION_STRATEGIES: [Strategy; 2] = [plain_field, accessor_method];

fn plain_field(position: &RawPosition, axis: Axis) -> Option<f64> {
    let name = match axis {
        Axis::Longitude => "lng",
        Axis::Latitude => "lat",
    };
    position.field(name).and_then(Value::as_f64)
}

fn accessor_method(position: &RawPosition, axis: Axis) -> Option<f64> {
    let accessors = position.accessors.as_ref()?;
    let value = match axis {
        Axis::Longitude => accessors.get_lng(),
        Axis::Latitude => accessors.get_lat(),
    };
    value.as_ref().and_then(Value::as_f64)
}

fn extract(position: &RawPosition, axis: Axis) -> Option<f64> {
    EXTRACTION_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(position, axis))
}

/// Maps the arguments of the SDK position callback to a [`PositionResult`].
pub fn to_position_result(
    status: &str,
    result: Option<GeolocationResult>,
) -> Result<PositionResult, AmapError> {
    let Some(result) = result else {
        return Err(AmapError::GeolocationFailure(
            GENERIC_FAILURE_MESSAGE.to_string(),
        ));
    };
    let position = match result.position {
        Some(ref position) if status == STATUS_COMPLETE => position,
        _ => {
            let message = result
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            return Err(AmapError::GeolocationFailure(message));
        }
    };
    let longitude = extract(position, Axis::Longitude);
    let latitude = extract(position, Axis::Latitude);
    let (Some(longitude), Some(latitude)) = (longitude, latitude) else {
        return Err(AmapError::CoordinateParseFailure);
    };
    let accuracy = result.accuracy.as_ref().and_then(Value::as_f64);
    Ok(PositionResult::new(
        Position::new(&latitude, &longitude),
        accuracy,
    ))
}

/// One-shot position queries against the AMap SDK.
pub struct GeolocationAdapter {
    loader: Arc<SdkLoader>,
}

impl GeolocationAdapter {
    pub fn new(loader: Arc<SdkLoader>) -> Self {
        GeolocationAdapter { loader }
    }

    /// Queries the current position.
    ///
    /// Loads the SDK if needed and issues a single high accuracy query with a
    /// 10 s timeout, coordinate conversion enabled and address lookup disabled.
    /// Only the first callback invocation is observed. An SDK dropping the
    /// callback without calling it is reported as [`AmapError::GeolocationFailure`].
    pub async fn get_current_position(&self) -> Result<PositionResult, AmapError> {
        let amap = self.loader.ensure_sdk_loaded().await?;
        let geolocation = amap.geolocation(&GeolocationOptions::default());

        let (tx, rx) = oneshot::channel();
        geolocation.get_current_position(Box::new(move |status, result| {
            let _ = tx.send((status.to_string(), result));
        }));
        let (status, result) = rx
            .await
            .map_err(|_| AmapError::GeolocationFailure(GENERIC_FAILURE_MESSAGE.to_string()))?;
        debug!("Geolocation callback reported status {}", status);
        to_position_result(&status, result)
    }
}
