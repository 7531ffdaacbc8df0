//! Terminal persistence operations for a verified boundary.
//!
//! Two single-shot operations the session controller invokes only after the
//! validation gate has passed. Both are idempotency-unsafe network calls:
//! no retry happens at this layer, and failures surface verbatim so the
//! supervisor may retry `finish()` without redrawing.

pub mod model;

pub use model::{PlotBoundaryUpdate, PlotStatus, ReferencePlot};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::CaptureConfig;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("persistence request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("persistence backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },
}

/// The store that owns task and plot records.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Complete a field task with its captured boundary (GeoJSON).
    async fn complete_task(
        &self,
        task_id: &str,
        polygon_geojson: &str,
        notes: Option<&str>,
    ) -> Result<(), GatewayError>;

    /// Replace a plot's recorded boundary (WKT) and derived metadata.
    async fn update_plot_boundary(
        &self,
        plot_id: &str,
        update: &PlotBoundaryUpdate,
    ) -> Result<(), GatewayError>;
}

// ─── HTTP implementation ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteTaskRequest<'a> {
    polygon_geo_json: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

/// `POST {base}/tasks/{taskId}/complete` and `PUT {base}/plots/{plotId}/boundary`.
pub struct HttpPersistenceGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPersistenceGateway {
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

    async fn check(resp: reqwest::Response) -> Result<(), GatewayError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(GatewayError::Backend {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl PersistenceGateway for HttpPersistenceGateway {
    async fn complete_task(
        &self,
        task_id: &str,
        polygon_geojson: &str,
        notes: Option<&str>,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/tasks/{}/complete", self.base_url, task_id);
        let body = CompleteTaskRequest {
            polygon_geo_json: polygon_geojson,
            notes,
        };
        let resp = self.client.post(&url).json(&body).send().await?;
        Self::check(resp).await
    }

    async fn update_plot_boundary(
        &self,
        plot_id: &str,
        update: &PlotBoundaryUpdate,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/plots/{}/boundary", self.base_url, plot_id);
        let resp = self.client.put(&url).json(update).send().await?;
        Self::check(resp).await
    }
}
