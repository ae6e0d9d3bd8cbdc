//! Seams towards the third-party AMap SDK.
//!
//! The SDK is a closed collaborator. It is reached through three calls: a
//! loader returning the SDK namespace, a page-global security configuration
//! that has to be set before loading, and a geolocation object answering a
//! single callback based position query.

use crate::error::AmapError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{
    fmt,
    sync::{Arc, RwLock},
    time::Duration,
};

/// SDK version requested from the loader.
pub const SDK_VERSION: &str = "2.0";

/// Plugin providing the geolocation constructor.
pub const GEOLOCATION_PLUGIN: &str = "AMap.Geolocation";

/// Status passed to the position callback on success.
pub const STATUS_COMPLETE: &str = "complete";

/// Options handed to [`AmapLoader::load`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub key: String,
    pub version: &'static str,
    pub plugins: Vec<&'static str>,
}

impl LoadOptions {
    /// Options for loading [`SDK_VERSION`] with the geolocation plugin.
    pub fn new(key: &str) -> Self {
        LoadOptions {
            key: key.to_string(),
            version: SDK_VERSION,
            plugins: vec![GEOLOCATION_PLUGIN],
        }
    }
}

/// The page-global security configuration read by the SDK while loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityConfig {
    pub security_js_code: String,
}

/// Options of a geolocation query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Convert GPS coordinates into the SDK coordinate system.
    pub convert: bool,
    /// Reverse address lookup.
    pub need_address: bool,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        GeolocationOptions {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            convert: true,
            need_address: false,
        }
    }
}

/// A shared handle to the loaded SDK namespace.
pub type SdkHandle = Arc<dyn AmapNamespace>;

/// Loads the SDK into the page.
#[async_trait::async_trait]
pub trait AmapLoader: Send + Sync {
    async fn load(&self, options: LoadOptions) -> Result<SdkHandle, AmapError>;
}

/// The loaded SDK namespace.
pub trait AmapNamespace: Send + Sync {
    /// Constructs a geolocation query object.
    fn geolocation(&self, options: &GeolocationOptions) -> Box<dyn Geolocation>;
}

/// Callback receiving the status and the raw result of a position query.
pub type PositionCallback = Box<dyn FnOnce(&str, Option<GeolocationResult>) + Send>;

/// A one-shot position query.
pub trait Geolocation: Send {
    /// Issues the query. The SDK invokes `callback` at most once.
    fn get_current_position(&self, callback: PositionCallback);
}

/// Accessor methods some SDK coordinate objects expose instead of plain fields.
pub trait PositionAccessors: Send + Sync + fmt::Debug {
    fn get_lng(&self) -> Option<Value>;
    fn get_lat(&self) -> Option<Value>;
}

/// The position object of a [`GeolocationResult`] as the SDK hands it out.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPosition {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(skip)]
    pub accessors: Option<Arc<dyn PositionAccessors>>,
}

impl RawPosition {
    /// A position object with plain numeric `lng`/`lat` fields.
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        let mut fields = Map::new();
        fields.insert("lng".to_string(), Value::from(lng));
        fields.insert("lat".to_string(), Value::from(lat));
        RawPosition {
            fields,
            accessors: None,
        }
    }

    pub fn with_accessors(mut self, accessors: Arc<dyn PositionAccessors>) -> Self {
        self.accessors = Some(accessors);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// The raw result passed to a [`PositionCallback`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GeolocationResult {
    pub position: Option<RawPosition>,
    pub accuracy: Option<Value>,
    pub message: Option<String>,
}

impl GeolocationResult {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// The page the SDK lives in.
///
/// Holds the page-global SDK namespace and security configuration. Code
/// outside of [`crate::loader::SdkLoader`] may install the SDK too, the loader
/// then reuses it.
#[derive(Default)]
pub struct PageContext {
    sdk: RwLock<Option<SdkHandle>>,
    security_config: RwLock<Option<SecurityConfig>>,
}

impl PageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page that already carries a loaded SDK.
    pub fn with_sdk(sdk: SdkHandle) -> Self {
        PageContext {
            sdk: RwLock::new(Some(sdk)),
            security_config: RwLock::new(None),
        }
    }

    pub fn sdk(&self) -> Option<SdkHandle> {
        self.sdk.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn install_sdk(&self, sdk: SdkHandle) {
        *self.sdk.write().unwrap_or_else(|e| e.into_inner()) = Some(sdk);
    }

    pub fn security_config(&self) -> Option<SecurityConfig> {
        self.security_config
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_security_config(&self, config: SecurityConfig) {
        *self
            .security_config
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(config);
    }
}
