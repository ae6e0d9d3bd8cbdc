use crate::{
    error::AmapError,
    sdk::{
        AmapLoader, AmapNamespace, Geolocation, GeolocationOptions, GeolocationResult, LoadOptions,
        PositionCallback, RawPosition, STATUS_COMPLETE, SdkHandle,
    },
};
use async_trait::async_trait;
use common::position::Position;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// An SDK stand-in that always reports the same position.
///
/// Used as fake GPS source when no browser hosted SDK is available.
#[derive(Clone, Debug)]
pub struct ConstantAmap {
    position: Position,
    accuracy: Option<f64>,
}

impl ConstantAmap {
    pub fn new(position: Position, accuracy: Option<f64>) -> Self {
        ConstantAmap { position, accuracy }
    }
}

impl AmapNamespace for ConstantAmap {
    fn geolocation(&self, options: &GeolocationOptions) -> Box<dyn Geolocation> {
        debug!("Creating constant geolocation with {:?}", options);
        Box::new(ConstantGeolocation {
            position: self.position,
            accuracy: self.accuracy,
        })
    }
}

struct ConstantGeolocation {
    position: Position,
    accuracy: Option<f64>,
}

impl Geolocation for ConstantGeolocation {
    fn get_current_position(&self, callback: PositionCallback) {
        let result = GeolocationResult {
            position: Some(RawPosition::from_lng_lat(
                self.position.longitude,
                self.position.latitude,
            )),
            accuracy: self.accuracy.map(Value::from),
            message: None,
        };
        callback(STATUS_COMPLETE, Some(result));
    }
}

/// Loader handing out a [`ConstantAmap`].
#[derive(Clone, Debug)]
pub struct ConstantAmapLoader {
    amap: ConstantAmap,
}

impl ConstantAmapLoader {
    pub fn new(position: Position, accuracy: Option<f64>) -> Self {
        ConstantAmapLoader {
            amap: ConstantAmap::new(position, accuracy),
        }
    }
}

#[async_trait]
impl AmapLoader for ConstantAmapLoader {
    async fn load(&self, options: LoadOptions) -> Result<SdkHandle, AmapError> {
        debug!("Loading constant AMap SDK {}", options.version);
        Ok(Arc::new(self.amap.clone()))
    }
}
