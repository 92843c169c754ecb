//! Request and response types of the ML service.

use serde::{Deserialize, Serialize};

/// How much effort the grower is ready to put in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentLevel {
    /// First-time grower.
    #[default]
    Beginner,

    /// Some experience.
    Intermediate,

    /// Experienced grower.
    Expert,
}

impl CommitmentLevel {
    /// Map the app's level name (`pemula`, `menengah`, `mahir`) or the API
    /// name. Anything unrecognised is treated as a beginner.
    #[must_use]
    pub fn from_app(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "menengah" | "intermediate" => Self::Intermediate,
            "mahir" | "expert" => Self::Expert,
            _ => Self::Beginner,
        }
    }
}

/// Sunlight reaching the planting spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SunExposure {
    /// Direct sun most of the day.
    #[default]
    #[serde(rename = "Full Sun")]
    FullSun,

    /// Sun for part of the day.
    #[serde(rename = "Partial Shade")]
    PartialShade,

    /// Little direct sun.
    #[serde(rename = "Shade")]
    Shade,
}

impl SunExposure {
    /// Map the app's condition name (`full`, `partial`, `shade`). Anything
    /// unrecognised is treated as full sun.
    #[must_use]
    pub fn from_app(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "partial" | "partial shade" => Self::PartialShade,
            "shade" => Self::Shade,
            _ => Self::FullSun,
        }
    }
}

/// Geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lon: f64,
}

/// Body of `POST /crop_recommendation_fastapi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Grower commitment.
    #[serde(rename = "tingkat_komitmen")]
    pub commitment: CommitmentLevel,

    /// Where the plants will grow.
    pub location: Location,

    /// Sunlight at the spot.
    pub sun_exposure: SunExposure,

    /// Planting area in square metres.
    pub area: f64,
}

/// Response of `POST /crop_recommendation_fastapi`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Recommended plant name.
    pub plant: String,
}

/// Body of `POST /yield_prediction_fastapi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPredictionRequest {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// Crop name.
    pub crop: String,
}

/// Response of `POST /yield_prediction_fastapi`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct YieldPrediction {
    /// Predicted yield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_yield: Option<f64>,

    /// Unit of `predicted_yield`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Service status string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Service message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
