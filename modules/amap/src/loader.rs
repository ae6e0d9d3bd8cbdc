use crate::{
    config::AmapConfig,
    error::AmapError,
    sdk::{AmapLoader, LoadOptions, PageContext, SdkHandle, SecurityConfig},
};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

type LoadOutcome = Result<SdkHandle, AmapError>;
type PendingLoad = Shared<BoxFuture<'static, LoadOutcome>>;

/// What happens to the loader state when an SDK load fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Go back to [`LoadStatus::Unloaded`], the next call starts a new load.
    #[default]
    Reset,
    /// Keep the error, every later call fails with it for the lifetime of the loader.
    Poison,
}

/// Observable lifecycle of the SDK load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

enum LoadState {
    Unloaded,
    Loading(PendingLoad),
    Loaded(SdkHandle),
    Failed(AmapError),
}

/// Loads the AMap SDK into a [`PageContext`] at most once.
///
/// Construct one per page and share it (e.g. behind an [`Arc`]) with every
/// component that needs the SDK. All calls to [`SdkLoader::ensure_sdk_loaded`]
/// made while a load is in flight join that load instead of starting another.
pub struct SdkLoader {
    page: Arc<PageContext>,
    loader: Arc<dyn AmapLoader>,
    config: AmapConfig,
    policy: FailurePolicy,
    state: Arc<Mutex<LoadState>>,
}

impl SdkLoader {
    pub fn new(page: Arc<PageContext>, loader: Arc<dyn AmapLoader>, config: AmapConfig) -> Self {
        Self::with_policy(page, loader, config, FailurePolicy::default())
    }

    pub fn with_policy(
        page: Arc<PageContext>,
        loader: Arc<dyn AmapLoader>,
        config: AmapConfig,
        policy: FailurePolicy,
    ) -> Self {
        SdkLoader {
            page,
            loader,
            config,
            policy,
            state: Arc::new(Mutex::new(LoadState::Unloaded)),
        }
    }

    pub fn status(&self) -> LoadStatus {
        match &*self.state.lock().unwrap_or_else(|e| e.into_inner()) {
            LoadState::Unloaded => LoadStatus::Unloaded,
            LoadState::Loading(_) => LoadStatus::Loading,
            LoadState::Loaded(_) => LoadStatus::Loaded,
            LoadState::Failed(_) => LoadStatus::Failed,
        }
    }

    /// Returns the SDK namespace, loading it first if needed.
    ///
    /// An SDK already present in the page is returned without loading. The
    /// configuration is only validated when a new load has to be started.
    /// The load runs on its own tokio task, dropping the returned future does
    /// not cancel it.
    pub async fn ensure_sdk_loaded(&self) -> Result<SdkHandle, AmapError> {
        let pending = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(sdk) = self.page.sdk() {
                return Ok(sdk);
            }
            let in_flight = match &*state {
                LoadState::Loaded(sdk) => return Ok(sdk.clone()),
                LoadState::Failed(e) => return Err(e.clone()),
                LoadState::Loading(pending) => Some(pending.clone()),
                LoadState::Unloaded => None,
            };
            match in_flight {
                Some(pending) => {
                    debug!("Joining the AMap SDK load in flight");
                    pending
                }
                None => {
                    let pending = self.start_load()?;
                    *state = LoadState::Loading(pending.clone());
                    pending
                }
            }
        };
        pending.await
    }

    fn start_load(&self) -> Result<PendingLoad, AmapError> {
        let key = self.config.key()?;
        let security_js_code = self.config.security_js_code()?;
        self.page.set_security_config(SecurityConfig {
            security_js_code: security_js_code.to_string(),
        });

        let options = LoadOptions::new(key);
        info!(
            "Loading AMap SDK {} with plugins {:?}",
            options.version, options.plugins
        );
        let loader = self.loader.clone();
        let task_page = self.page.clone();
        let task_state = self.state.clone();
        let policy = self.policy;
        let task = tokio::spawn(async move {
            let outcome = loader.load(options).await;
            settle(&task_state, &task_page, policy, &outcome);
            outcome
        });
        let page = self.page.clone();
        let state = self.state.clone();
        Ok(async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let outcome = Err(AmapError::SdkLoad(e.to_string()));
                    settle(&state, &page, policy, &outcome);
                    outcome
                }
            }
        }
        .boxed()
        .shared())
    }
}

fn settle(
    state: &Mutex<LoadState>,
    page: &PageContext,
    policy: FailurePolicy,
    outcome: &LoadOutcome,
) {
    let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
    match (outcome, policy) {
        (Ok(sdk), _) => {
            page.install_sdk(sdk.clone());
            *state = LoadState::Loaded(sdk.clone());
            info!("AMap SDK loaded");
        }
        (Err(_), FailurePolicy::Reset) => {
            *state = LoadState::Unloaded;
            debug!("AMap SDK load failed, next request loads again");
        }
        (Err(e), FailurePolicy::Poison) => {
            *state = LoadState::Failed(e.clone());
            debug!("AMap SDK load failed, keeping the failure");
        }
    }
}
