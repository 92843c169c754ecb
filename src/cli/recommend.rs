//! `agriplay recommend`, `yield` and `health` command implementations.

use crate::config::load_config;
use crate::error::{Error, Result};
use crate::recommend::{
    CommitmentLevel, Location, Recommendation, RecommendationClient, RecommendationRequest,
    RecommendationSource, SunExposure,
};

/// Run the recommend command.
///
/// Never fails because of the ML service; an unreachable service prints
/// the bundled recommendation instead.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the HTTP client
/// cannot be built.
pub fn run(level: &str, lat: f64, lon: f64, sun: &str, area: f64) -> Result<()> {
    let config = load_config()?;
    let client = RecommendationClient::new(&config.ml_api)?;

    let request = RecommendationRequest {
        commitment: CommitmentLevel::from_app(level),
        location: Location { lat, lon },
        sun_exposure: SunExposure::from_app(sun),
        area,
    };
    let recommendation = client.recommend_or_fallback(&request);
    print!("{}", render(&recommendation));

    Ok(())
}

/// Run the yield command.
///
/// # Errors
///
/// Returns an error if the ML service call fails.
pub fn run_yield(lat: f64, lon: f64, crop: &str) -> Result<()> {
    let config = load_config()?;
    let client = RecommendationClient::new(&config.ml_api)?;

    let prediction = client.predict_yield(lat, lon, crop)?;
    println!("{}", serde_json::to_string_pretty(&prediction)?);

    Ok(())
}

/// Run the health command.
///
/// # Errors
///
/// Returns [`Error::ServiceUnavailable`] if the ML service does not answer,
/// or an error if the config cannot be loaded or the HTTP client cannot be
/// built.
pub fn run_health() -> Result<()> {
    let config = load_config()?;
    let client = RecommendationClient::new(&config.ml_api)?;

    println!("{}", health_report(client.check_health(), &config.ml_api.base_url)?);
    Ok(())
}

/// Line printed when the service is up.
fn health_report(up: bool, base_url: &str) -> Result<String> {
    if up {
        Ok(format!("ML API at {base_url} is up."))
    } else {
        Err(Error::ServiceUnavailable(base_url.to_string()))
    }
}

/// Text shown for a recommendation.
fn render(recommendation: &Recommendation) -> String {
    use std::fmt::Write as _;

    let mut out = format!("Recommended: {}\n", recommendation.plant);
    if let Some(details) = recommendation.details {
        let _ = writeln!(out, "Match: {}%", details.match_score);
        let _ = writeln!(
            out,
            "Difficulty: {} · {} days",
            details.difficulty, details.growth_days
        );
        let _ = writeln!(out, "{}", details.description);
    }
    if recommendation.source == RecommendationSource::Fallback {
        out.push_str("(offline recommendation)\n");
    }
    out
}
