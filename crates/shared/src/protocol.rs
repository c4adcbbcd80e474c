//! Wire types exchanged with the campaigns API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Provider};

/// Envelope returned by every campaigns API read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// The reported error verbatim. Only an empty string counts as absent.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub results: u64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTotals {
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub results: u64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    pub totals: MetricTotals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<MetricTotals>,
    #[serde(default)]
    pub daily: Vec<DailyInsight>,
    #[serde(default)]
    pub devices: Vec<DeviceInsight>,
    #[serde(default)]
    pub ads: Vec<AdInsight>,
    #[serde(default)]
    pub contents: Vec<ContentInsight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyInsight {
    pub date: NaiveDate,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub results: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInsight {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdInsight {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInsight {
    pub id: String,
    pub title: String,
    pub platform: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub conversions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_without_data_deserializes() {
        let envelope: ApiResponse<Vec<CampaignRecord>> =
            serde_json::from_str(r#"{"success":false,"error":"token expired"}"#)
                .expect("envelope");
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error_message(), Some("token expired"));
    }

    #[test]
    fn empty_error_message_is_ignored() {
        let envelope = ApiResponse::<()>::failure("");
        assert_eq!(envelope.error_message(), None);
    }

    #[test]
    fn error_message_is_returned_untrimmed() {
        assert_eq!(
            ApiResponse::<()>::failure("  E1\n").error_message(),
            Some("  E1\n")
        );
        assert_eq!(ApiResponse::<()>::failure("   ").error_message(), Some("   "));
    }

    fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> ApiResponse<T> {
        serde_json::from_str(raw).expect("envelope")
    }

    #[test]
    fn envelope_decodes_for_any_deserializable_payload() {
        let envelope: ApiResponse<InsightsReport> = decode(r#"{"success":true}"#);
        assert!(envelope.success);
        assert!(envelope.data.is_none());
        assert!(envelope.error.is_none());

        let envelope: ApiResponse<Vec<CampaignRecord>> =
            decode(r#"{"success":true,"data":[{"id":"c1","name":"Prospecting"}]}"#);
        assert_eq!(envelope.data.expect("data")[0].name, "Prospecting");
    }

    #[test]
    fn campaign_record_uses_camel_case_and_defaults() {
        let record: CampaignRecord = serde_json::from_str(
            r#"{"id":"c1","name":"Prospecting","accountId":"act_9","provider":"google","spend":12.5}"#,
        )
        .expect("record");
        assert_eq!(record.account_id, Some(AccountId::new("act_9")));
        assert_eq!(record.provider, Some(Provider::Google));
        assert_eq!(record.results, 0);
    }

    #[test]
    fn insights_report_parses_iso_daily_dates() {
        let report: InsightsReport = serde_json::from_str(
            r#"{"totals":{"spend":10.0,"results":2,"impressions":100,"clicks":5},
                "daily":[{"date":"2024-04-01","spend":10.0,"results":2}]}"#,
        )
        .expect("report");
        assert_eq!(
            report.daily[0].date,
            NaiveDate::from_ymd_opt(2024, 4, 1).expect("date")
        );
        assert!(report.comparison.is_none());
        assert!(report.contents.is_empty());
    }
}
