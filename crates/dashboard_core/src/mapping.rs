//! Maps raw campaigns API records into the display-ready `MetricsData` shape.

use std::cmp::Reverse;

use chrono::Datelike;
use shared::{
    metrics::{
        AdMetrics, AdPreview, CampaignRow, ContentMetrics, ContentRow, DeviceSlice,
        MetricChange, MetricChanges, MetricsData, PeriodBar, TimelinePoint,
    },
    protocol::{CampaignRecord, InsightsReport, MetricTotals},
};

use crate::format::{format_currency, format_integer, format_percent, ratio, round_to};

/// Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["seg", "ter", "qua", "qui", "sex", "sáb", "dom"];

pub const DEVICE_PALETTE: [&str; 6] = [
    "#FF6384", "#FFDD00", "#36A2EB", "#4BC0C0", "#9966FF", "#FF9F40",
];

const TOP_ADS: usize = 5;
const TOP_CONTENTS: usize = 5;

pub fn build_metrics(campaigns: &[CampaignRecord], insights: &InsightsReport) -> MetricsData {
    let totals = DerivedTotals::from(&insights.totals);

    MetricsData {
        invested: format_currency(totals.spend),
        result: format_integer(totals.results),
        cost_per_result: format_currency(totals.cost_per_result),
        return_rate: format_percent(totals.return_rate),
        impressions: format_integer(totals.impressions),
        clicks: format_integer(totals.clicks),
        cpc: format_currency(totals.cpc),
        cpm: format_currency(totals.cpm),
        timeline_data: timeline(insights),
        device_data: devices(insights),
        period_data: weekday_results(insights),
        campaign_data: campaign_rows(campaigns),
        ads_data: top_ads(insights),
        best_contents: best_contents(insights),
        changes: insights
            .comparison
            .as_ref()
            .map(|previous| changes(&totals, &DerivedTotals::from(previous))),
    }
}

#[derive(Debug, Clone, Copy)]
struct DerivedTotals {
    spend: f64,
    results: u64,
    impressions: u64,
    clicks: u64,
    cost_per_result: f64,
    return_rate: f64,
    cpc: f64,
    cpm: f64,
}

impl From<&MetricTotals> for DerivedTotals {
    fn from(totals: &MetricTotals) -> Self {
        let results = totals.results as f64;
        let clicks = totals.clicks as f64;
        let impressions = totals.impressions as f64;
        Self {
            spend: totals.spend,
            results: totals.results,
            impressions: totals.impressions,
            clicks: totals.clicks,
            cost_per_result: ratio(totals.spend, results),
            return_rate: ratio(results, clicks) * 100.0,
            cpc: ratio(totals.spend, clicks),
            cpm: ratio(totals.spend, impressions) * 1000.0,
        }
    }
}

fn timeline(insights: &InsightsReport) -> Vec<TimelinePoint> {
    let mut daily: Vec<_> = insights.daily.iter().collect();
    daily.sort_by_key(|day| day.date);
    daily
        .into_iter()
        .map(|day| TimelinePoint {
            date: day.date.format("%-d/%m").to_string(),
            value: round_to(day.spend, 2),
        })
        .collect()
}

fn devices(insights: &InsightsReport) -> Vec<DeviceSlice> {
    insights
        .devices
        .iter()
        .zip(DEVICE_PALETTE.iter().cycle())
        .map(|(device, color)| DeviceSlice {
            name: device.name.clone(),
            value: device.value,
            color: (*color).to_string(),
        })
        .collect()
}

fn weekday_results(insights: &InsightsReport) -> Vec<PeriodBar> {
    let mut buckets = [0u64; 7];
    for day in &insights.daily {
        buckets[day.date.weekday().num_days_from_monday() as usize] += day.results;
    }
    WEEKDAY_LABELS
        .iter()
        .zip(buckets)
        .map(|(period, value)| PeriodBar {
            period: (*period).to_string(),
            value,
        })
        .collect()
}

fn campaign_rows(campaigns: &[CampaignRecord]) -> Vec<CampaignRow> {
    let mut sorted: Vec<_> = campaigns.iter().collect();
    sorted.sort_by(|a, b| b.results.cmp(&a.results).then_with(|| a.name.cmp(&b.name)));
    sorted
        .into_iter()
        .map(|record| CampaignRow {
            campaign: record.name.clone(),
            invested: format_currency(record.spend),
            results: record.results,
            cost_per_result: format_currency(ratio(record.spend, record.results as f64)),
            return_rate: format_percent(ratio(record.results as f64, record.clicks as f64) * 100.0),
        })
        .collect()
}

fn top_ads(insights: &InsightsReport) -> Vec<AdPreview> {
    let mut ads: Vec<_> = insights.ads.iter().collect();
    ads.sort_by_key(|ad| (Reverse(ad.conversions), Reverse(ad.clicks)));
    ads.into_iter()
        .take(TOP_ADS)
        .map(|ad| AdPreview {
            id: ad.id.clone(),
            name: ad.name.clone(),
            image_url: ad.image_url.clone().unwrap_or_default(),
            metrics: AdMetrics {
                impressions: ad.impressions,
                clicks: ad.clicks,
                conversions: ad.conversions,
            },
        })
        .collect()
}

fn best_contents(insights: &InsightsReport) -> Vec<ContentRow> {
    let mut contents: Vec<_> = insights.contents.iter().collect();
    contents.sort_by_key(|content| (Reverse(content.conversions), Reverse(content.impressions)));
    contents
        .into_iter()
        .take(TOP_CONTENTS)
        .map(|content| ContentRow {
            id: content.id.clone(),
            title: content.title.clone(),
            platform: content.platform,
            image_url: content.image_url.clone(),
            metrics: ContentMetrics {
                impressions: content.impressions,
                clicks: content.clicks,
                ctr: round_to(
                    ratio(content.clicks as f64, content.impressions as f64),
                    4,
                ),
                cost_per_result: round_to(ratio(content.spend, content.conversions as f64), 2),
                frequency: round_to(ratio(content.impressions as f64, content.reach as f64), 2),
                conversions: content.conversions,
            },
        })
        .collect()
}

fn changes(current: &DerivedTotals, previous: &DerivedTotals) -> MetricChanges {
    MetricChanges {
        invested: change(current.spend, previous.spend, true),
        result: change(current.results as f64, previous.results as f64, true),
        cost_per_result: change(current.cost_per_result, previous.cost_per_result, false),
        return_rate: change(current.return_rate, previous.return_rate, true),
        impressions: change(current.impressions as f64, previous.impressions as f64, true),
        clicks: change(current.clicks as f64, previous.clicks as f64, true),
        cpc: change(current.cpc, previous.cpc, false),
        cpm: change(current.cpm, previous.cpm, false),
    }
}

/// Relative change against the comparison period. A zero baseline reports no change.
fn change(current: f64, previous: f64, higher_is_better: bool) -> MetricChange {
    let relative = ratio(current - previous, previous);
    let is_positive = relative == 0.0 || (relative > 0.0) == higher_is_better;
    MetricChange::new(format_percent(relative.abs() * 100.0), is_positive)
}

#[cfg(test)]
#[path = "tests/mapping_tests.rs"]
mod tests;
