//! Reconciles filter state into view data: demo substitution or a live fetch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use shared::{
    domain::{AccountSelection, ClientId, DateRange, FilterDimension},
    metrics::MetricsData,
};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::{
    api::CampaignsApi,
    demo::demo_metrics,
    events::{DashboardEvent, ViewSource},
    filters::{FetchRequest, FilterChange, FilterState},
    mapping::build_metrics,
};

/// Shown when the backend failed without saying why.
pub const GENERIC_FETCH_ERROR: &str = "Erro ao buscar dados";

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewErrorKind {
    /// The backend answered `success: false`; its message is shown verbatim.
    Reported,
    /// The call itself failed; details only go to the log.
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewError {
    kind: ViewErrorKind,
    message: String,
}

impl ViewError {
    pub fn reported(message: impl Into<String>) -> Self {
        Self {
            kind: ViewErrorKind::Reported,
            message: message.into(),
        }
    }

    pub fn unexpected() -> Self {
        Self {
            kind: ViewErrorKind::Unexpected,
            message: GENERIC_FETCH_ERROR.to_string(),
        }
    }

    pub fn kind(&self) -> ViewErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub metrics: Option<MetricsData>,
    pub loading: bool,
    pub error: Option<ViewError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub filters: FilterState,
    pub view: ViewState,
}

/// How a reconciliation pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Demo mode is on; the fixture is in place.
    Demo,
    Loaded,
    Failed(ViewError),
    /// Preconditions not met, or nothing changed. No call was made.
    Skipped,
    /// A newer fetch or a demo toggle overtook this one.
    Superseded,
}

struct ControllerState {
    filters: FilterState,
    view: ViewState,
    /// Generation of the latest issued fetch. Bumping it invalidates in-flight fetches.
    generation: u64,
}

pub struct DashboardController {
    api: Arc<dyn CampaignsApi>,
    state: Mutex<ControllerState>,
    events: broadcast::Sender<DashboardEvent>,
}

impl DashboardController {
    pub fn new(api: Arc<dyn CampaignsApi>) -> Self {
        Self::with_filters(api, FilterState::default())
    }

    pub fn with_filters(api: Arc<dyn CampaignsApi>, filters: FilterState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            api,
            state: Mutex::new(ControllerState {
                filters,
                view: ViewState::default(),
                generation: 0,
            }),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.lock_state();
        ViewSnapshot {
            filters: state.filters.clone(),
            view: state.view.clone(),
        }
    }

    pub fn filters(&self) -> FilterState {
        self.lock_state().filters.clone()
    }

    pub fn view(&self) -> ViewState {
        self.lock_state().view.clone()
    }

    pub async fn set_client(&self, client_id: ClientId) -> FetchOutcome {
        let change = self.lock_state().filters.set_client(client_id);
        self.filters_changed(change).await
    }

    pub async fn set_accounts(&self, accounts: AccountSelection) -> FetchOutcome {
        let change = self.lock_state().filters.set_accounts(accounts);
        self.filters_changed(change).await
    }

    pub async fn set_date_range(&self, range: DateRange) -> FetchOutcome {
        let change = self.lock_state().filters.set_date_range(range);
        self.filters_changed(change).await
    }

    pub async fn set_compare_range(&self, range: Option<DateRange>) -> FetchOutcome {
        let change = self.lock_state().filters.set_compare_range(range);
        self.filters_changed(change).await
    }

    pub async fn set_filter(
        &self,
        dimension: FilterDimension,
        value: impl Into<String>,
    ) -> FetchOutcome {
        let change = self.lock_state().filters.set_filter(dimension, value);
        debug!(dimension = dimension.as_str(), "filter selection changed");
        self.filters_changed(change).await
    }

    pub async fn toggle_demo_mode(&self) -> FetchOutcome {
        let enabled = !self.lock_state().filters.demo_mode();
        self.set_demo_mode(enabled).await
    }

    /// Edge-triggered: entering demo mode swaps in the fixture at once and
    /// invalidates any in-flight fetch; leaving it clears the view and
    /// fetches once if the selection is complete.
    pub async fn set_demo_mode(&self, enabled: bool) -> FetchOutcome {
        let ready_to_fetch = {
            let mut state = self.lock_state();
            if state.filters.demo_mode() == enabled {
                return if enabled {
                    FetchOutcome::Demo
                } else {
                    FetchOutcome::Skipped
                };
            }
            state.filters.set_demo_mode(enabled);
            self.publish(DashboardEvent::DemoModeChanged(enabled));

            if enabled {
                state.generation += 1;
                state.view = ViewState {
                    metrics: Some(demo_metrics()),
                    loading: false,
                    error: None,
                };
                info!("demo mode enabled");
                self.publish(DashboardEvent::ViewUpdated(ViewSource::Demo));
                return FetchOutcome::Demo;
            }

            state.view.metrics = None;
            info!("demo mode disabled");
            self.publish(DashboardEvent::ViewUpdated(ViewSource::Cleared));
            state.filters.is_ready_to_fetch()
        };

        if ready_to_fetch {
            self.fetch().await
        } else {
            FetchOutcome::Skipped
        }
    }

    /// Derives fresh view data from the current filters.
    pub async fn reconcile(&self) -> FetchOutcome {
        {
            let mut state = self.lock_state();
            if state.filters.demo_mode() {
                state.view.metrics = Some(demo_metrics());
                self.publish(DashboardEvent::ViewUpdated(ViewSource::Demo));
                return FetchOutcome::Demo;
            }
        }
        self.fetch().await
    }

    /// Runs one live fetch cycle. Never returns an error: failures land in
    /// the view's error slot and in the returned outcome.
    pub async fn fetch(&self) -> FetchOutcome {
        let (generation, request) = {
            let mut state = self.lock_state();
            if state.filters.demo_mode() {
                return FetchOutcome::Demo;
            }
            let Some(request) = state.filters.fetch_request() else {
                debug!("fetch skipped: client or accounts not selected");
                return FetchOutcome::Skipped;
            };
            state.generation += 1;
            state.view.loading = true;
            state.view.error = None;
            self.publish(DashboardEvent::LoadingChanged(true));
            (state.generation, request)
        };

        info!(
            generation,
            client_id = %request.client_id,
            start = %request.range.start,
            end = %request.range.end,
            compare = request.compare.is_some(),
            "fetching dashboard data"
        );

        let mut in_flight = InFlight {
            controller: self,
            generation,
            settled: false,
        };
        let result = self.load(&request).await;
        in_flight.settled = true;

        let mut state = self.lock_state();
        if state.generation != generation {
            debug!(
                generation,
                latest = state.generation,
                "discarding superseded fetch result"
            );
            self.publish(DashboardEvent::FetchSuperseded { generation });
            return FetchOutcome::Superseded;
        }

        state.view.loading = false;
        self.publish(DashboardEvent::LoadingChanged(false));
        match result {
            Ok(metrics) => {
                state.view.metrics = Some(metrics);
                state.view.error = None;
                info!(generation, "dashboard data loaded");
                self.publish(DashboardEvent::ViewUpdated(ViewSource::Live));
                FetchOutcome::Loaded
            }
            Err(err) => {
                state.view.metrics = None;
                state.view.error = Some(err.clone());
                self.publish(DashboardEvent::FetchFailed(err.clone()));
                FetchOutcome::Failed(err)
            }
        }
    }

    async fn load(&self, request: &FetchRequest) -> Result<MetricsData, ViewError> {
        let (campaigns, insights) = futures::join!(
            self.api.list_campaigns(&request.client_id, &request.range),
            self.api.get_insights(
                &request.client_id,
                &request.range,
                request.compare.as_ref()
            ),
        );

        let (campaigns, insights) = match (campaigns, insights) {
            (Ok(campaigns), Ok(insights)) => (campaigns, insights),
            (Err(err), _) | (_, Err(err)) => {
                error!(
                    client_id = %request.client_id,
                    error = %format!("{err:#}"),
                    "dashboard fetch failed"
                );
                return Err(ViewError::unexpected());
            }
        };

        if !(campaigns.success && insights.success) {
            let message = campaigns
                .error_message()
                .or_else(|| insights.error_message())
                .unwrap_or(GENERIC_FETCH_ERROR);
            warn!(
                client_id = %request.client_id,
                campaigns_ok = campaigns.success,
                insights_ok = insights.success,
                reported = message,
                "campaigns api reported a failure"
            );
            return Err(ViewError::reported(message));
        }

        match (campaigns.data, insights.data) {
            (Some(campaigns), Some(insights)) => Ok(build_metrics(&campaigns, &insights)),
            _ => {
                warn!(
                    client_id = %request.client_id,
                    "campaigns api succeeded without data; showing demo dataset"
                );
                Ok(demo_metrics())
            }
        }
    }

    async fn filters_changed(&self, change: FilterChange) -> FetchOutcome {
        debug!(?change, "filters changed");
        self.publish(DashboardEvent::FiltersChanged(change));
        self.reconcile().await
    }

    fn publish(&self, event: DashboardEvent) {
        let _ = self.events.send(event);
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the loading flag if a fetch future is dropped before it settles.
struct InFlight<'a> {
    controller: &'a DashboardController,
    generation: u64,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.controller.lock_state();
        if state.generation == self.generation && state.view.loading {
            state.view.loading = false;
            self.controller.publish(DashboardEvent::LoadingChanged(false));
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
