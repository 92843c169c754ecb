//! Client for the external crop-recommendation service.

pub mod client;
pub mod fallback;
pub mod types;

pub use client::{Recommendation, RecommendationClient, RecommendationSource};
pub use fallback::{FALLBACK_PLANTS, PlantMatch};
pub use types::{
    CommitmentLevel, Location, RecommendationRequest, RecommendationResponse, SunExposure,
    YieldPrediction,
};
