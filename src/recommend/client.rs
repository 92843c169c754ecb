//! Blocking HTTP client for the crop-recommendation service.

use crate::config::MlApiConfig;
use crate::error::Result;
use crate::recommend::fallback::{self, PlantMatch};
use crate::recommend::types::{
    RecommendationRequest, RecommendationResponse, YieldPrediction, YieldPredictionRequest,
};
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Where a recommendation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Answered by the ML service.
    Remote,

    /// Service unavailable; bundled list used.
    Fallback,
}

/// Recommendation ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Plant name.
    pub plant: String,

    /// Bundled metadata, when the plant is in the bundled list.
    pub details: Option<&'static PlantMatch>,

    /// Where it came from.
    pub source: RecommendationSource,
}

impl Recommendation {
    /// Wrap a service answer, attaching bundled metadata if known.
    #[must_use]
    pub fn remote(plant: String) -> Self {
        Self {
            details: fallback::find(&plant),
            plant,
            source: RecommendationSource::Remote,
        }
    }

    /// The first bundled plant.
    #[must_use]
    pub fn fallback() -> Self {
        let primary = fallback::primary();
        Self {
            plant: primary.name.to_string(),
            details: Some(primary),
            source: RecommendationSource::Fallback,
        }
    }
}

/// Client for the ML service. No retries; the timeout is the only
/// cancellation.
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    base_url: String,
    http: Client,
}

impl RecommendationClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &MlApiConfig) -> Result<Self> {
        Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Create a client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_client(base_url, http))
    }

    /// Wrap a preconfigured HTTP client. Its timeout applies as-is.
    #[must_use]
    pub fn from_client(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Ask the service for a plant.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, a non-2xx status, or
    /// an unparseable body.
    pub fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResponse> {
        debug!(?request, "requesting crop recommendation");
        let response = self
            .http
            .post(self.url("crop_recommendation_fastapi"))
            .json(request)
            .send()?
            .error_for_status()?;
        let body: RecommendationResponse = response.json()?;
        debug!(plant = %body.plant, "crop recommendation received");
        Ok(body)
    }

    /// Ask the service for a plant, falling back to the bundled list on any
    /// failure.
    #[must_use]
    pub fn recommend_or_fallback(&self, request: &RecommendationRequest) -> Recommendation {
        match self.recommend(request) {
            Ok(response) => Recommendation::remote(response.plant),
            Err(e) => {
                warn!(error = %e, "crop recommendation failed, using bundled list");
                Recommendation::fallback()
            }
        }
    }

    /// Predict yield for `crop` at a location.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, a non-2xx status, or
    /// an unparseable body.
    pub fn predict_yield(&self, latitude: f64, longitude: f64, crop: &str) -> Result<YieldPrediction> {
        let request = YieldPredictionRequest {
            latitude,
            longitude,
            crop: crop.to_string(),
        };
        let response = self
            .http
            .post(self.url("yield_prediction_fastapi"))
            .json(&request)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    /// Whether the service answers its root endpoint with success.
    #[must_use]
    pub fn check_health(&self) -> bool {
        match self.http.get(self.url("")).send() {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "ML API health check failed");
                false
            }
        }
    }
}
