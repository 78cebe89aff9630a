//! Pulse appearance: color, intensity, labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnimError, AnimResult};

/// Weakest allowed pulse intensity.
pub const MIN_INTENSITY: f32 = 0.1;
/// Strongest allowed pulse intensity.
pub const MAX_INTENSITY: f32 = 1.0;

/// Named pulse colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PulseColor {
    White,
    LightBlue,
    Cyan,
    Blue,
    Violet,
    Magenta,
    Pink,
    Red,
    Orange,
    Gold,
    Yellow,
    Lime,
    Green,
}

impl PulseColor {
    /// Every palette entry, in display order.
    pub const ALL: [PulseColor; 13] = [
        PulseColor::White,
        PulseColor::LightBlue,
        PulseColor::Cyan,
        PulseColor::Blue,
        PulseColor::Violet,
        PulseColor::Magenta,
        PulseColor::Pink,
        PulseColor::Red,
        PulseColor::Orange,
        PulseColor::Gold,
        PulseColor::Yellow,
        PulseColor::Lime,
        PulseColor::Green,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PulseColor::White => "white",
            PulseColor::LightBlue => "lightblue",
            PulseColor::Cyan => "cyan",
            PulseColor::Blue => "blue",
            PulseColor::Violet => "violet",
            PulseColor::Magenta => "magenta",
            PulseColor::Pink => "pink",
            PulseColor::Red => "red",
            PulseColor::Orange => "orange",
            PulseColor::Gold => "gold",
            PulseColor::Yellow => "yellow",
            PulseColor::Lime => "lime",
            PulseColor::Green => "green",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            PulseColor::White => [255, 255, 255],
            PulseColor::LightBlue => [173, 216, 230],
            PulseColor::Cyan => [0, 255, 255],
            PulseColor::Blue => [30, 144, 255],
            PulseColor::Violet => [238, 130, 238],
            PulseColor::Magenta => [255, 0, 255],
            PulseColor::Pink => [255, 182, 193],
            PulseColor::Red => [255, 64, 64],
            PulseColor::Orange => [255, 165, 0],
            PulseColor::Gold => [255, 215, 0],
            PulseColor::Yellow => [255, 255, 0],
            PulseColor::Lime => [0, 255, 0],
            PulseColor::Green => [34, 139, 34],
        }
    }

    /// Relative luminance in `[0, 1]`.
    pub fn luminance(&self) -> f32 {
        let [r, g, b] = self.rgb();
        (0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)) / 255.0
    }

    /// Comma-separated palette names.
    pub fn palette() -> String {
        Self::ALL.iter().map(PulseColor::name).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for PulseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PulseColor {
    type Err = AnimError;

    /// Case-insensitive; `light_blue` and `light blue` also match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| AnimError::UnknownColor {
                name: s.to_string(),
                known: Self::palette(),
            })
    }
}

/// Validated pulse style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PulseStyle {
    color: PulseColor,
    intensity: f32,
    labeled: bool,
}

impl PulseStyle {
    /// Validate raw style options.
    ///
    /// `supports_label` says whether the target backdrop can carry labels;
    /// asking for labels on one that cannot is an error.
    pub fn validate(
        color: &str,
        intensity: f32,
        labeled: bool,
        supports_label: bool,
    ) -> AnimResult<Self> {
        let color = color.parse::<PulseColor>()?;
        Self::new(color, intensity, labeled, supports_label)
    }

    /// Same checks as [`PulseStyle::validate`] for an already-parsed color.
    pub fn new(
        color: PulseColor,
        intensity: f32,
        labeled: bool,
        supports_label: bool,
    ) -> AnimResult<Self> {
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity) {
            return Err(AnimError::OutOfRange(intensity));
        }
        if labeled && !supports_label {
            return Err(AnimError::UnsupportedFeature(
                "labels are only available on x-ray backdrops".into(),
            ));
        }
        Ok(Self {
            color,
            intensity,
            labeled,
        })
    }

    pub fn color(&self) -> PulseColor {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn labeled(&self) -> bool {
        self.labeled
    }
}

impl Default for PulseStyle {
    fn default() -> Self {
        Self {
            color: PulseColor::White,
            intensity: 0.5,
            labeled: false,
        }
    }
}
