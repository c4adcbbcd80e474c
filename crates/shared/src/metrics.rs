//! Display-ready view data. Scalar metrics are already locale formatted.

use serde::{Deserialize, Serialize};

use crate::domain::Provider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsData {
    pub invested: String,
    pub result: String,
    pub cost_per_result: String,
    pub return_rate: String,
    pub impressions: String,
    pub clicks: String,
    pub cpc: String,
    pub cpm: String,
    pub timeline_data: Vec<TimelinePoint>,
    pub device_data: Vec<DeviceSlice>,
    pub period_data: Vec<PeriodBar>,
    pub campaign_data: Vec<CampaignRow>,
    pub ads_data: Vec<AdPreview>,
    pub best_contents: Vec<ContentRow>,
    /// Period-over-period deltas, present when a comparison range was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<MetricChanges>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSlice {
    pub name: String,
    pub value: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBar {
    pub period: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRow {
    pub campaign: String,
    pub invested: String,
    pub results: u64,
    pub cost_per_result: String,
    pub return_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdPreview {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub metrics: AdMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRow {
    pub id: String,
    pub title: String,
    pub platform: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub metrics: ContentMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub cost_per_result: f64,
    pub frequency: f64,
    pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricChange {
    pub value: String,
    /// Whether the change is favourable, not whether the number went up.
    pub is_positive: bool,
}

impl MetricChange {
    pub fn new(value: impl Into<String>, is_positive: bool) -> Self {
        Self {
            value: value.into(),
            is_positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricChanges {
    pub invested: MetricChange,
    pub result: MetricChange,
    pub cost_per_result: MetricChange,
    pub return_rate: MetricChange,
    pub impressions: MetricChange,
    pub clicks: MetricChange,
    pub cpc: MetricChange,
    pub cpm: MetricChange,
}
