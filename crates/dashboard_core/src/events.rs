//! Change notifications published by the dashboard controller.

use serde::Serialize;

use crate::{controller::ViewError, filters::FilterChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSource {
    Demo,
    Live,
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum DashboardEvent {
    FiltersChanged(FilterChange),
    DemoModeChanged(bool),
    LoadingChanged(bool),
    ViewUpdated(ViewSource),
    FetchFailed(ViewError),
    /// A fetch finished after a newer one was issued; its results were dropped.
    FetchSuperseded { generation: u64 },
}
