//! Filter state holder: the six slices the dashboard reconciles on.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use shared::domain::{
    AccountSelection, ClientId, DateRange, FilterDimension, FilterSelection, FormattedRange,
};

/// Which slice a setter touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "slice", rename_all = "snake_case")]
pub enum FilterChange {
    /// Account sets are cleared alongside the client.
    Client { client_id: ClientId },
    Accounts { total: usize },
    DateRange { range: DateRange },
    CompareRange { range: Option<DateRange> },
    Filter {
        dimension: FilterDimension,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    client_id: Option<ClientId>,
    selected_accounts: AccountSelection,
    date_range: DateRange,
    compare_range: Option<DateRange>,
    active_filter: FilterSelection,
    demo_mode: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::starting_on(Local::now().date_naive())
    }
}

impl FilterState {
    /// Empty selection with the month-to-date range ending on `today`.
    pub fn starting_on(today: NaiveDate) -> Self {
        Self {
            client_id: None,
            selected_accounts: AccountSelection::default(),
            date_range: DateRange::month_to_date(today),
            compare_range: None,
            active_filter: FilterSelection::default(),
            demo_mode: false,
        }
    }

    pub fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    pub fn selected_accounts(&self) -> &AccountSelection {
        &self.selected_accounts
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn compare_range(&self) -> Option<DateRange> {
        self.compare_range
    }

    pub fn active_filter(&self) -> &FilterSelection {
        &self.active_filter
    }

    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    pub fn set_client(&mut self, client_id: ClientId) -> FilterChange {
        self.client_id = Some(client_id.clone());
        self.selected_accounts = AccountSelection::default();
        FilterChange::Client { client_id }
    }

    pub fn set_accounts(&mut self, accounts: AccountSelection) -> FilterChange {
        let total = accounts.len();
        self.selected_accounts = accounts;
        FilterChange::Accounts { total }
    }

    pub fn set_date_range(&mut self, range: DateRange) -> FilterChange {
        self.date_range = range;
        FilterChange::DateRange { range }
    }

    pub fn set_compare_range(&mut self, range: Option<DateRange>) -> FilterChange {
        self.compare_range = range;
        FilterChange::CompareRange { range }
    }

    pub fn set_filter(
        &mut self,
        dimension: FilterDimension,
        value: impl Into<String>,
    ) -> FilterChange {
        let value = value.into();
        self.active_filter.set(dimension, value.clone());
        FilterChange::Filter { dimension, value }
    }

    pub(crate) fn set_demo_mode(&mut self, enabled: bool) {
        self.demo_mode = enabled;
    }

    /// A client plus at least one account on either provider.
    pub fn is_ready_to_fetch(&self) -> bool {
        self.client_id
            .as_ref()
            .is_some_and(|client_id| !client_id.is_blank())
            && !self.selected_accounts.is_empty()
    }

    /// Parameters for a live fetch, or `None` while the selection is incomplete.
    ///
    /// `active_filter` is not part of the request: neither API read accepts it yet.
    pub fn fetch_request(&self) -> Option<FetchRequest> {
        if !self.is_ready_to_fetch() {
            return None;
        }
        let client_id = self.client_id.clone()?;
        Some(FetchRequest {
            client_id,
            range: self.date_range.format(),
            compare: self.compare_range.as_ref().map(DateRange::format),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub client_id: ClientId,
    pub range: FormattedRange,
    pub compare: Option<FormattedRange>,
}

#[cfg(test)]
#[path = "tests/filters_tests.rs"]
mod tests;
