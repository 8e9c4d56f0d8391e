//! Gallery configuration loaded from TOML.

use anyhow::{Context, Result};
use nr_buttons::color::{constants, hex, Hsla};
use nr_buttons::style::DEFAULT_SHADOW_RADIUS;
use nr_buttons::{ButtonContent, ButtonStyle, LOADING_DELAY};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "NR_BUTTONS_GALLERY_CONFIG";

/// Whole gallery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Buttons shown by `list`
    #[serde(default = "builtin_buttons", rename = "button")]
    pub buttons: Vec<ButtonConfig>,
    /// Settings for `demo`
    #[serde(default)]
    pub demo: DemoConfig,
}

/// One `[[button]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonConfig {
    pub label: String,
    /// Symbol name; when set the button shows an icon instead of the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub style: ButtonStyle,
}

impl ButtonConfig {
    fn new(label: &str, style: ButtonStyle) -> Self {
        Self {
            label: label.to_string(),
            icon: None,
            style,
        }
    }

    pub fn content(&self) -> ButtonContent {
        match &self.icon {
            Some(name) => ButtonContent::Icon { name: name.clone() },
            None => ButtonContent::Text(self.label.clone()),
        }
    }
}

/// The `[demo]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "constants::white")]
    pub busy_tint: Hsla,
    #[serde(default)]
    pub style: ButtonStyle,
}

impl DemoConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            busy_tint: constants::white(),
            style: ButtonStyle::default(),
        }
    }
}

fn default_delay_ms() -> u64 {
    LOADING_DELAY.as_millis() as u64
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            buttons: builtin_buttons(),
            demo: DemoConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config/nr-buttons/gallery.toml"))
            .unwrap_or_else(|| PathBuf::from("gallery.toml"))
    }

    /// Load from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Load from a specific path. A missing file yields the built-in gallery.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No gallery config at {}, using built-in buttons", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        for button in &config.buttons {
            button
                .style
                .validate()
                .with_context(|| format!("Invalid style for button '{}'", button.label))?;
        }
        config.demo.style.validate().context("Invalid demo style")?;

        tracing::info!("Loaded {} buttons from {}", config.buttons.len(), path.display());
        Ok(config)
    }
}

/// One button per style.
pub fn builtin_buttons() -> Vec<ButtonConfig> {
    vec![
        ButtonConfig::new(
            "Basic",
            ButtonStyle::Solid {
                background: constants::blue(),
                foreground: constants::white(),
            },
        ),
        ButtonConfig {
            icon: Some("heart.fill".to_string()),
            ..ButtonConfig::new(
                "Favorite",
                ButtonStyle::Icon {
                    background: constants::blue(),
                    tint: constants::white(),
                },
            )
        },
        ButtonConfig::new(
            "Outline",
            ButtonStyle::Outline {
                border: constants::blue(),
                foreground: constants::blue(),
            },
        ),
        ButtonConfig::new(
            "Gradient",
            ButtonStyle::Gradient {
                colors: vec![constants::blue(), constants::purple()],
            },
        ),
        ButtonConfig::new(
            "Rounded",
            ButtonStyle::Rounded {
                background: hex("#34c759"),
                corner_radius: 20.0,
                shadow_radius: DEFAULT_SHADOW_RADIUS,
            },
        ),
        ButtonConfig::new(
            "Textured",
            ButtonStyle::Textured {
                texture: "texture".to_string(),
                foreground: constants::white(),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let config = GalleryConfig::load_from_path(&dir.path().join("absent.toml")).unwrap();

        let kinds: Vec<_> = config.buttons.iter().map(|b| b.style.kind()).collect();
        assert_eq!(
            kinds,
            vec!["solid", "icon", "outline", "gradient", "rounded", "textured"]
        );
        assert_eq!(config.demo.delay(), LOADING_DELAY);
    }

    #[test]
    fn test_default_path_is_dot_config_under_home() {
        env::remove_var(CONFIG_ENV);
        let path = GalleryConfig::default_path();
        let home = directories::BaseDirs::new().unwrap().home_dir().to_path_buf();
        assert_eq!(path, home.join(".config").join("nr-buttons").join("gallery.toml"));

        env::set_var(CONFIG_ENV, "/tmp/custom-gallery.toml");
        assert_eq!(
            GalleryConfig::default_path(),
            PathBuf::from("/tmp/custom-gallery.toml")
        );
        env::remove_var(CONFIG_ENV);
    }

    #[test]
    fn test_parse_buttons_and_demo() {
        let file = write_config(
            r##"
[demo]
delay_ms = 250
busy_tint = "#ff9500"

[[button]]
label = "Submit"
style = { kind = "solid", background = "#007aff" }

[[button]]
label = "Star"
icon = "star.fill"
style = { kind = "icon", background = "#000", tint = "#ffcc00" }
"##,
        );

        let config = GalleryConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.buttons.len(), 2);
        assert_eq!(config.buttons[0].content(), ButtonContent::from("Submit"));
        assert_eq!(
            config.buttons[1].content(),
            ButtonContent::Icon {
                name: "star.fill".to_string()
            }
        );
        assert_eq!(config.demo.delay(), Duration::from_millis(250));
        assert_eq!(config.demo.busy_tint, hex("#ff9500"));
        assert_eq!(config.demo.style, ButtonStyle::default());
    }

    #[test]
    fn test_rejects_empty_gradient() {
        let file = write_config(
            r##"
[[button]]
label = "Broken"
style = { kind = "gradient", colors = [] }
"##,
        );

        let err = GalleryConfig::load_from_path(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Broken"));
    }

    #[test]
    fn test_rejects_bad_color() {
        let file = write_config(
            r##"
[[button]]
label = "Bad"
style = { kind = "solid", background = "chartreuse" }
"##,
        );

        assert!(GalleryConfig::load_from_path(file.path()).is_err());
    }
}
