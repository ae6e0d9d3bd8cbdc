//! Scriptable SDK doubles for tests of the loader and the geolocation adapter.

use crate::{
    error::AmapError,
    loader::{LoadStatus, SdkLoader},
    sdk::{
        AmapLoader, AmapNamespace, Geolocation, GeolocationOptions, GeolocationResult, LoadOptions,
        PositionCallback, SdkHandle,
    },
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use tokio::{sync::Notify, time::timeout};
use tracing::debug;

/// Returns `true` when both handles point to the same SDK instance.
pub fn same_sdk(lhs: &SdkHandle, rhs: &SdkHandle) -> bool {
    std::ptr::eq(Arc::as_ptr(lhs) as *const (), Arc::as_ptr(rhs) as *const ())
}

/// An [`AmapLoader`] counting its invocations and answering with a configurable outcome.
///
/// A gated loader blocks every load until [`MockLoader::release`] is called,
/// which keeps loads in flight while a test issues more requests.
pub struct MockLoader {
    outcome: Mutex<Result<SdkHandle, AmapError>>,
    loads: AtomicUsize,
    last_options: Mutex<Option<LoadOptions>>,
    gate: Option<Notify>,
}

impl MockLoader {
    pub fn succeeding(sdk: SdkHandle) -> Self {
        Self::with_outcome(Ok(sdk), false)
    }

    pub fn failing(error: AmapError) -> Self {
        Self::with_outcome(Err(error), false)
    }

    pub fn gated(outcome: Result<SdkHandle, AmapError>) -> Self {
        Self::with_outcome(outcome, true)
    }

    fn with_outcome(outcome: Result<SdkHandle, AmapError>, gated: bool) -> Self {
        MockLoader {
            outcome: Mutex::new(outcome),
            loads: AtomicUsize::new(0),
            last_options: Mutex::new(None),
            gate: gated.then(Notify::new),
        }
    }

    /// Lets one pending (or the next) gated load finish.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Changes the outcome of subsequent loads.
    pub fn set_outcome(&self, outcome: Result<SdkHandle, AmapError>) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<LoadOptions> {
        self.last_options.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AmapLoader for MockLoader {
    async fn load(&self, options: LoadOptions) -> Result<SdkHandle, AmapError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(options);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        debug!("MockLoader finished load {}", self.load_count());
        self.outcome.lock().unwrap().clone()
    }
}

/// What a [`ScriptedAmap`] geolocation does with the callback.
#[derive(Clone, Debug)]
pub enum Script {
    /// Invoke the callback with the given arguments.
    Respond(String, Option<GeolocationResult>),
    /// Drop the callback without invoking it.
    Discard,
}

impl Script {
    pub fn respond(status: &str, result: Option<GeolocationResult>) -> Self {
        Script::Respond(status.to_string(), result)
    }

    /// Responds with a result parsed from `json`.
    pub fn respond_json(status: &str, json: &str) -> Self {
        let result = GeolocationResult::from_json(json)
            .unwrap_or_else(|e| panic!("Failed to deserialize the raw json. Reason: {e}"));
        Script::respond(status, Some(result))
    }
}

/// An [`AmapNamespace`] whose geolocation answers with a fixed [`Script`].
pub struct ScriptedAmap {
    script: Script,
    geolocations: AtomicUsize,
    last_options: Mutex<Option<GeolocationOptions>>,
}

impl ScriptedAmap {
    pub fn new(script: Script) -> Self {
        ScriptedAmap {
            script,
            geolocations: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        }
    }

    pub fn geolocation_count(&self) -> usize {
        self.geolocations.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<GeolocationOptions> {
        *self.last_options.lock().unwrap()
    }
}

impl AmapNamespace for ScriptedAmap {
    fn geolocation(&self, options: &GeolocationOptions) -> Box<dyn Geolocation> {
        self.geolocations.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(*options);
        Box::new(ScriptedGeolocation {
            script: self.script.clone(),
        })
    }
}

struct ScriptedGeolocation {
    script: Script,
}

impl Geolocation for ScriptedGeolocation {
    fn get_current_position(&self, callback: PositionCallback) {
        match &self.script {
            Script::Respond(status, result) => callback(status.as_str(), result.clone()),
            Script::Discard => drop(callback),
        }
    }
}

/// Waits until `loader` reports `status`.
///
/// # Panics
///
/// Panics if the status is not reached within `duration`.
pub async fn wait_for_status(
    loader: &SdkLoader,
    status: LoadStatus,
    duration: std::time::Duration,
) {
    let reached = timeout(duration, async {
        while loader.status() != status {
            tokio::task::yield_now().await;
        }
    })
    .await;
    if reached.is_err() {
        panic!(
            "Loader did not reach status {:?}, current {:?}",
            status,
            loader.status()
        );
    }
}
