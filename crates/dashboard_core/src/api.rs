use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{ClientId, FormattedRange},
    protocol::{ApiResponse, CampaignRecord, InsightsReport},
};
use tracing::debug;
use url::Url;

/// Read operations the dashboard needs from the campaigns backend.
///
/// `Ok` carries whatever envelope the backend reported, including
/// `success: false`. `Err` is reserved for failures the backend never got to
/// describe (transport errors, undecodable bodies).
#[async_trait]
pub trait CampaignsApi: Send + Sync {
    async fn list_campaigns(
        &self,
        client_id: &ClientId,
        range: &FormattedRange,
    ) -> Result<ApiResponse<Vec<CampaignRecord>>>;

    async fn get_insights(
        &self,
        client_id: &ClientId,
        range: &FormattedRange,
        compare: Option<&FormattedRange>,
    ) -> Result<ApiResponse<InsightsReport>>;
}

pub struct HttpCampaignsApi {
    http: Client,
    base_url: Url,
}

impl HttpCampaignsApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build campaigns api http client")?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .with_context(|| format!("invalid campaigns api base url: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!(
                "campaigns api base url cannot carry a path: {base_url}"
            ));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, client_id: &ClientId, resource: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                anyhow!(
                    "campaigns api base url cannot carry a path: {}",
                    self.base_url
                )
            })?
            .pop_if_empty()
            .extend(["clients", client_id.as_str(), resource]);
        Ok(url)
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse<T>> {
        debug!(url = %url, "campaigns api request");
        let response = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .with_context(|| format!("failed to reach campaigns api: {url}"))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("failed to read campaigns api response: {url}"))?;

        // Failure envelopes are meaningful even on non-2xx statuses.
        match serde_json::from_slice::<ApiResponse<T>>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(err) if status.is_success() => {
                Err(anyhow!(err).context(format!("malformed campaigns api envelope from {url}")))
            }
            Err(_) => Err(anyhow!("campaigns api returned {status} for {url}")),
        }
    }
}

#[async_trait]
impl CampaignsApi for HttpCampaignsApi {
    async fn list_campaigns(
        &self,
        client_id: &ClientId,
        range: &FormattedRange,
    ) -> Result<ApiResponse<Vec<CampaignRecord>>> {
        let url = self.endpoint(client_id, "campaigns")?;
        self.get_envelope(
            url,
            &[("start", range.start.as_str()), ("end", range.end.as_str())],
        )
        .await
    }

    async fn get_insights(
        &self,
        client_id: &ClientId,
        range: &FormattedRange,
        compare: Option<&FormattedRange>,
    ) -> Result<ApiResponse<InsightsReport>> {
        let url = self.endpoint(client_id, "insights")?;
        let mut query = vec![("start", range.start.as_str()), ("end", range.end.as_str())];
        if let Some(compare) = compare {
            query.push(("compareStart", compare.start.as_str()));
            query.push(("compareEnd", compare.end.as_str()));
        }
        self.get_envelope(url, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_percent_encoded_segments() {
        let api = HttpCampaignsApi::new("http://localhost:3001/api/", None).expect("api");
        let url = api
            .endpoint(&ClientId::new("acme corp"), "campaigns")
            .expect("endpoint");
        assert_eq!(
            url.as_str(),
            "http://localhost:3001/api/clients/acme%20corp/campaigns"
        );
    }

    #[test]
    fn endpoint_works_without_base_path() {
        let api = HttpCampaignsApi::new("http://localhost:3001", None).expect("api");
        let url = api
            .endpoint(&ClientId::new("acme"), "insights")
            .expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:3001/clients/acme/insights");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(HttpCampaignsApi::new("not a url", None).is_err());
        assert!(HttpCampaignsApi::new("mailto:ops@example.com", None).is_err());
    }
}
