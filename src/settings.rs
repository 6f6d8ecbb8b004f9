//! Player preferences
//!
//! Read from the page URL (`?quality=low&mute=1`); never persisted.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Raymarch step budget per pixel
    pub fn max_steps(&self) -> u32 {
        match self {
            QualityPreset::Low => 48,
            QualityPreset::Medium => 96,
            QualityPreset::High => 160,
        }
    }

    /// Whether to trace soft shadows
    pub fn soft_shadows(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Build settings from a URL query string (leading `?` optional)
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "quality" => match QualityPreset::from_str(value) {
                    Some(preset) => settings.quality = preset,
                    None => log::warn!("Unknown quality preset '{}'", value),
                },
                "volume" => match value.parse::<f32>() {
                    Ok(v) if v.is_finite() => settings.master_volume = v.clamp(0.0, 1.0),
                    _ => log::warn!("Bad volume '{}'", value),
                },
                "sfx" => match value.parse::<f32>() {
                    Ok(v) if v.is_finite() => settings.sfx_volume = v.clamp(0.0, 1.0),
                    _ => log::warn!("Bad sfx volume '{}'", value),
                },
                "mute" => settings.muted = parse_flag(value),
                "fps" => settings.show_fps = parse_flag(value),
                _ => log::debug!("Ignoring query key '{}'", key),
            }
        }

        settings
    }

    /// Volume actually sent to the speakers
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value, "" | "1" | "true" | "on" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(Settings::from_query(""), Settings::default());
        assert_eq!(Settings::from_query("?"), Settings::default());
    }

    #[test]
    fn test_query_overrides() {
        let s = Settings::from_query("?quality=high&volume=0.5&mute&fps=1");
        assert_eq!(s.quality, QualityPreset::High);
        assert_eq!(s.master_volume, 0.5);
        assert!(s.muted);
        assert!(s.show_fps);
        assert_eq!(s.effective_volume(), 0.0);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let s = Settings::from_query("quality=ultra&volume=loud&other=3");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_volume_clamped() {
        let s = Settings::from_query("volume=4&sfx=-1");
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.sfx_volume, 0.0);
    }

    #[test]
    fn test_preset_budgets() {
        assert!(QualityPreset::Low.max_steps() < QualityPreset::High.max_steps());
        assert!(!QualityPreset::Low.soft_shadows());
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
    }
}
