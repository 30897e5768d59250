//! YAML configuration loader for prompts, UI strings and colours.
use std::sync::LazyLock;

use serde::Deserialize;

pub mod settings;

pub use settings::{ConfigError, ModelSettings, Settings, load_settings, settings_path};

// ============================================================================
// Prompts Configuration
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PromptsConfig {
    /// Base system instruction sent with every request
    pub system_instruction: String,
}

// ============================================================================
// UI Configuration
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UiConfig {
    pub strings: UiStrings,
    pub modes: ModeLabels,
    pub icons: Icons,
    pub colors: ThemeColors,
}

#[derive(Debug, Deserialize)]
pub struct UiStrings {
    pub title: String,
    pub subtitle: String,
    pub greeting: String,
    pub thinking: String,
    pub pause: String,
    pub resume: String,
    pub sources_heading: String,
    pub input_placeholder: String,
    /// Committed as the model reply when the gateway call fails
    pub fallback_error: String,
    pub help: String,
}

#[derive(Debug, Deserialize)]
pub struct ModeLabels {
    pub standard: String,
    pub thinking: String,
    pub search: String,
}

#[derive(Debug, Deserialize)]
pub struct Icons {
    pub user: String,
    pub model: String,
    pub error: String,
    pub cursor: String,
}

/// RGB color as [r, g, b] array
pub type RgbColor = [u8; 3];

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeColors {
    pub accent: RgbColor,
    pub accent_dim: RgbColor,
    pub error: RgbColor,
    pub text: RgbColor,
    pub text_muted: RgbColor,
    pub bg_base: RgbColor,
    pub bg_surface: RgbColor,
    pub bg_elevated: RgbColor,
    pub border: RgbColor,
    pub user: RgbColor,
    pub model: RgbColor,
    pub link: RgbColor,
}

// ============================================================================
// Loading Functions
// ============================================================================

fn parse_yaml<T: for<'de> Deserialize<'de>>(name: &str, content: &str) -> T {
    serde_yaml::from_str(content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e))
}

// ============================================================================
// Global Configuration (embedded at compile time)
// ============================================================================

pub static PROMPTS: LazyLock<PromptsConfig> =
    LazyLock::new(|| parse_yaml("prompts.yaml", include_str!("../../../../yamls/prompts.yaml")));
pub static UI: LazyLock<UiConfig> = LazyLock::new(|| parse_yaml("ui.yaml", include_str!("../../../../yamls/ui.yaml")));

// =============================================================================
// THEME COLORS (loaded from yamls/ui.yaml)
// =============================================================================

pub mod theme {
    use super::UI;
    use ratatui::style::Color;

    fn rgb(c: [u8; 3]) -> Color {
        Color::Rgb(c[0], c[1], c[2])
    }

    pub fn accent() -> Color {
        rgb(UI.colors.accent)
    }
    pub fn accent_dim() -> Color {
        rgb(UI.colors.accent_dim)
    }
    pub fn error() -> Color {
        rgb(UI.colors.error)
    }
    pub fn text() -> Color {
        rgb(UI.colors.text)
    }
    pub fn text_muted() -> Color {
        rgb(UI.colors.text_muted)
    }
    pub fn bg_base() -> Color {
        rgb(UI.colors.bg_base)
    }
    pub fn bg_surface() -> Color {
        rgb(UI.colors.bg_surface)
    }
    pub fn bg_elevated() -> Color {
        rgb(UI.colors.bg_elevated)
    }
    pub fn border() -> Color {
        rgb(UI.colors.border)
    }
    pub fn user() -> Color {
        rgb(UI.colors.user)
    }
    pub fn model() -> Color {
        rgb(UI.colors.model)
    }
    pub fn link() -> Color {
        rgb(UI.colors.link)
    }
}
