//! Filter reconciliation and data fetching for the campaign metrics dashboard.

pub mod api;
pub mod controller;
pub mod demo;
pub mod events;
pub mod filters;
pub mod format;
pub mod mapping;

pub use api::{CampaignsApi, HttpCampaignsApi};
pub use controller::{
    DashboardController, FetchOutcome, ViewError, ViewErrorKind, ViewSnapshot, ViewState,
    GENERIC_FETCH_ERROR,
};
pub use events::{DashboardEvent, ViewSource};
pub use filters::{FetchRequest, FilterChange, FilterState};
