//! Boundary validation against the remote plot authority.
//!
//! The authority receives the drawn polygon (GeoJSON), the reference plot id,
//! and a tolerance percent; it answers with a [`ValidationVerdict`]. Every
//! call is stateless — session state lives in [`crate::session`], which
//! re-invokes validation on every polygon mutation.

pub mod model;

pub use model::ValidationVerdict;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::CaptureConfig;
use crate::geo::{self, Coordinate};

/// Failure of a single validation call.
///
/// Never surfaced to the UI as a hard failure: the controller clears the
/// pending verdict, logs, and the next polygon mutation retries.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("validation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("validation backend returned HTTP {status}")]
    Backend { status: u16 },
}

/// Remote authority deciding whether a drawn boundary matches the plot
/// record within tolerance.
#[async_trait]
pub trait ValidationAuthority: Send + Sync {
    /// Submit `polygon` for `plot_id` and return the authority's verdict.
    async fn validate(
        &self,
        plot_id: &str,
        polygon: &[Coordinate],
        tolerance_percent: f64,
    ) -> Result<ValidationVerdict, ValidationError>;
}

// ─── HTTP implementation ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest<'a> {
    plot_id: &'a str,
    polygon_geo_json: String,
    tolerance_percent: f64,
}

/// `POST {api_base_url}/boundaries/validate`.
pub struct HttpValidationAuthority {
    client: reqwest::Client,
    base_url: String,
}

impl HttpValidationAuthority {
    /// Build a client with the configured request timeout.
    pub fn new(config: &CaptureConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }
}

#[async_trait]
impl ValidationAuthority for HttpValidationAuthority {
    async fn validate(
        &self,
        plot_id: &str,
        polygon: &[Coordinate],
        tolerance_percent: f64,
    ) -> Result<ValidationVerdict, ValidationError> {
        let url = format!("{}/boundaries/validate", self.base_url);
        let body = ValidateRequest {
            plot_id,
            polygon_geo_json: geo::to_geojson_string(polygon),
            tolerance_percent,
        };
        let resp = self.client.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(ValidationError::Backend {
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json::<ValidationVerdict>().await?)
    }
}
