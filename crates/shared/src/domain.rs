use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Wire format for every date the dashboard sends upstream.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// "All" sentinel for the campaign dimension.
pub const ALL_CAMPAIGNS: &str = "Todas";
/// "All" sentinel for the ad set and objective dimensions.
pub const ALL_OPTIONS: &str = "Todos";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(ClientId);
id_newtype!(AccountId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Meta,
    Google,
}

impl FromStr for Provider {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "meta" => Ok(Self::Meta),
            "google" => Ok(Self::Google),
            _ => Err(DomainError::UnknownProvider(value.to_string())),
        }
    }
}

/// Ad accounts chosen for the current client, one set per provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSelection {
    pub meta: BTreeSet<AccountId>,
    pub google: BTreeSet<AccountId>,
}

impl AccountSelection {
    pub fn new<M, G>(meta: M, google: G) -> Self
    where
        M: IntoIterator<Item = AccountId>,
        G: IntoIterator<Item = AccountId>,
    {
        Self {
            meta: meta.into_iter().collect(),
            google: google.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, provider: Provider, account_id: AccountId) -> bool {
        match provider {
            Provider::Meta => self.meta.insert(account_id),
            Provider::Google => self.google.insert(account_id),
        }
    }

    pub fn len(&self) -> usize {
        self.meta.len() + self.google.len()
    }

    /// True when neither provider has a selected account.
    pub fn is_empty(&self) -> bool {
        self.meta.is_empty() && self.google.is_empty()
    }
}

/// Inclusive calendar range. `from <= to` is the picker's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// First day of `today`'s month through `today`.
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            from: today.with_day(1).unwrap_or(today),
            to: today,
        }
    }

    pub fn format(&self) -> FormattedRange {
        FormattedRange {
            start: self.from.format(DATE_FORMAT).to_string(),
            end: self.to.format(DATE_FORMAT).to_string(),
        }
    }
}

/// A date range as sent to the campaigns API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormattedRange {
    pub start: String,
    pub end: String,
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(value.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterDimension {
    Campaign,
    AdSet,
    Objective,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [Self::Campaign, Self::AdSet, Self::Objective];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::AdSet => "adSet",
            Self::Objective => "objective",
        }
    }

    pub fn all_sentinel(self) -> &'static str {
        match self {
            Self::Campaign => ALL_CAMPAIGNS,
            Self::AdSet | Self::Objective => ALL_OPTIONS,
        }
    }
}

impl FromStr for FilterDimension {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "campaign" => Ok(Self::Campaign),
            "adSet" | "ad_set" | "adset" => Ok(Self::AdSet),
            "objective" => Ok(Self::Objective),
            _ => Err(DomainError::UnknownFilterDimension(value.to_string())),
        }
    }
}

/// Parses `dimension=value`, as typed on a command line.
pub fn parse_filter_assignment(raw: &str) -> Result<(FilterDimension, String), DomainError> {
    let Some((dimension, value)) = raw.split_once('=') else {
        return Err(DomainError::MalformedFilter(raw.to_string()));
    };
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::MalformedFilter(raw.to_string()));
    }
    Ok((dimension.parse()?, value.to_string()))
}

/// Label currently chosen for each named filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub campaign: String,
    pub ad_set: String,
    pub objective: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            campaign: ALL_CAMPAIGNS.into(),
            ad_set: ALL_OPTIONS.into(),
            objective: ALL_OPTIONS.into(),
        }
    }
}

impl FilterSelection {
    pub fn get(&self, dimension: FilterDimension) -> &str {
        match dimension {
            FilterDimension::Campaign => &self.campaign,
            FilterDimension::AdSet => &self.ad_set,
            FilterDimension::Objective => &self.objective,
        }
    }

    pub fn set(&mut self, dimension: FilterDimension, value: impl Into<String>) {
        let slot = match dimension {
            FilterDimension::Campaign => &mut self.campaign,
            FilterDimension::AdSet => &mut self.ad_set,
            FilterDimension::Objective => &mut self.objective,
        };
        *slot = value.into();
    }

    pub fn is_unfiltered(&self) -> bool {
        FilterDimension::ALL
            .iter()
            .all(|dimension| self.get(*dimension) == dimension.all_sentinel())
    }
}
