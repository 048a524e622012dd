// src/mood/mod.rs
// Mood labels and intensity bands shared by the prompt builder and the resolver.

use serde::Deserialize;
use std::convert::Infallible;

/// Emotional states the companion has dedicated guidance for.
///
/// Anything else parses to [`Mood::Unmapped`] and is answered with the
/// generic tables instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Calm,
    Excited,
    Angry,
    Tired,
    Confused,
    Proud,
    Unmapped,
}

impl Mood {
    /// Every mapped mood, in the order the client presents them.
    pub const MAPPED: [Mood; 9] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Calm,
        Mood::Excited,
        Mood::Angry,
        Mood::Tired,
        Mood::Confused,
        Mood::Proud,
    ];

    /// Case-insensitive lookup, never fails.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "happy" => Mood::Happy,
            "sad" => Mood::Sad,
            "anxious" => Mood::Anxious,
            "calm" => Mood::Calm,
            "excited" => Mood::Excited,
            "angry" => Mood::Angry,
            "tired" => Mood::Tired,
            "confused" => Mood::Confused,
            "proud" => Mood::Proud,
            _ => Mood::Unmapped,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Calm => "calm",
            Mood::Excited => "excited",
            Mood::Angry => "angry",
            Mood::Tired => "tired",
            Mood::Confused => "confused",
            Mood::Proud => "proud",
            Mood::Unmapped => "unmapped",
        }
    }

    pub fn is_mapped(&self) -> bool {
        !matches!(self, Mood::Unmapped)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Mood::parse(s))
    }
}

/// Lowest and highest intensity a client may report.
pub const MIN_INTENSITY: i32 = 1;
pub const MAX_INTENSITY: i32 = 10;

pub fn is_valid_intensity(intensity: i32) -> bool {
    (MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity)
}

/// Coarse strength of a mood, derived from its 1-10 intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntensityBand {
    Low,
    Medium,
    High,
}

impl IntensityBand {
    /// Values below the valid range land in `Low`, values above in `High`.
    pub fn from_intensity(intensity: i32) -> Self {
        if intensity <= 3 {
            IntensityBand::Low
        } else if intensity <= 6 {
            IntensityBand::Medium
        } else {
            IntensityBand::High
        }
    }

    /// Position of this band's sentence in a fallback sequence.
    pub fn index(&self) -> usize {
        match self {
            IntensityBand::Low => 0,
            IntensityBand::Medium => 1,
            IntensityBand::High => 2,
        }
    }
}

impl std::fmt::Display for IntensityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                IntensityBand::Low => "low",
                IntensityBand::Medium => "medium",
                IntensityBand::High => "high",
            }
        )
    }
}

/// One string per band. Used for prompt suffixes and chat starters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BandText {
    pub low: String,
    pub medium: String,
    pub high: String,
}

impl BandText {
    pub fn new(low: impl Into<String>, medium: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            low: low.into(),
            medium: medium.into(),
            high: high.into(),
        }
    }

    pub fn get(&self, band: IntensityBand) -> &str {
        match band {
            IntensityBand::Low => &self.low,
            IntensityBand::Medium => &self.medium,
            IntensityBand::High => &self.high,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (IntensityBand, &str)> {
        [
            (IntensityBand::Low, self.low.as_str()),
            (IntensityBand::Medium, self.medium.as_str()),
            (IntensityBand::High, self.high.as_str()),
        ]
        .into_iter()
    }
}
