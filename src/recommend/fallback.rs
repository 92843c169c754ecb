//! Plant list bundled with the app, shown when the ML service is down.

use serde::Serialize;

/// A recommended plant with display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantMatch {
    /// Catalog id.
    pub id: u32,

    /// Plant name.
    pub name: &'static str,

    /// Difficulty label.
    pub difficulty: &'static str,

    /// Days from planting to harvest.
    pub growth_days: u32,

    /// Fixed match percentage.
    pub match_score: u8,

    /// Short description.
    pub description: &'static str,
}

/// Bundled plants, best match first.
pub const FALLBACK_PLANTS: &[PlantMatch] = &[
    PlantMatch {
        id: 1,
        name: "Kangkung Hidroponik",
        difficulty: "Pemula",
        growth_days: 25,
        match_score: 98,
        description: "Juara ketahanan! Tumbuh sangat cepat di iklim Bojongsoang dan tahan genangan air.",
    },
    PlantMatch {
        id: 2,
        name: "Cabai Rawit",
        difficulty: "Menengah",
        growth_days: 90,
        match_score: 85,
        description: "Cocok untuk dataran rendah panas.",
    },
    PlantMatch {
        id: 3,
        name: "Tomat Cherry",
        difficulty: "Menengah",
        growth_days: 70,
        match_score: 82,
        description: "Butuh sinar matahari penuh.",
    },
    PlantMatch {
        id: 4,
        name: "Sawi Hijau",
        difficulty: "Pemula",
        growth_days: 30,
        match_score: 95,
        description: "Panen cepat, perawatan mudah.",
    },
    PlantMatch {
        id: 5,
        name: "Bayam Merah",
        difficulty: "Pemula",
        growth_days: 25,
        match_score: 92,
        description: "Kaya zat besi, tumbuh cepat.",
    },
    PlantMatch {
        id: 6,
        name: "Terong Ungu",
        difficulty: "Menengah",
        growth_days: 80,
        match_score: 78,
        description: "Butuh lahan agak luas.",
    },
];

/// The plant shown first when falling back.
#[must_use]
pub fn primary() -> &'static PlantMatch {
    &FALLBACK_PLANTS[0]
}

/// Look up a bundled plant by name, ignoring case and surrounding spaces.
#[must_use]
pub fn find(name: &str) -> Option<&'static PlantMatch> {
    let name = name.trim();
    FALLBACK_PLANTS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
