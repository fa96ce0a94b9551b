//! Match configuration and AI difficulty presets
//!
//! Everything here is data the outer menu/draft layers choose before a match
//! starts; the simulation itself never mutates it.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// AI opponent difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Number of turret angles the planner samples
    pub fn angle_steps(&self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Medium => 12,
            Difficulty::Hard => 18,
        }
    }

    /// Number of shot powers the planner samples
    pub fn power_steps(&self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Medium => 10,
            Difficulty::Hard => 16,
        }
    }

    /// Amplitude of the score noise injected per candidate.
    /// Larger noise at lower difficulty intentionally degrades play strength.
    pub fn noise_amp(&self) -> f32 {
        match self {
            Difficulty::Easy => 30.0,
            Difficulty::Medium => 10.0,
            Difficulty::Hard => 2.0,
        }
    }
}

/// Per-match configuration, fixed once the match starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Seed for terrain generation, wind rolls and planner noise
    pub seed: u64,
    /// Battlefield width in terrain columns
    pub field_width: usize,
    /// Score either player must reach to win outright
    pub target_score: f32,
    /// Maximum magnitude of the per-round wind roll
    pub wind_max: f32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            field_width: DEFAULT_FIELD_WIDTH,
            target_score: DEFAULT_TARGET_SCORE,
            wind_max: WIND_MAX,
        }
    }
}

impl MatchSettings {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}
