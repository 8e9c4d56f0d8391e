//! Button content and visual styles.

use serde::{Deserialize, Serialize};

use crate::color::{constants, Hsla};
use crate::{Error, Result};

/// Corner radius shared by the rectangular styles.
pub const DEFAULT_CORNER_RADIUS: f32 = 8.0;

/// Shadow radius used by [`ButtonStyle::Rounded`] unless configured.
pub const DEFAULT_SHADOW_RADIUS: f32 = 10.0;

/// Stroke width of the [`ButtonStyle::Outline`] border.
pub const OUTLINE_WIDTH: f32 = 2.0;

/// Side length of an icon glyph.
pub const ICON_SIZE: f32 = 30.0;

/// What a button shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonContent {
    /// A text label
    Text(String),
    /// A named symbol glyph
    Icon { name: String },
}

impl ButtonContent {
    /// Text shown to the user, or the icon name for icon content.
    pub fn label(&self) -> &str {
        match self {
            ButtonContent::Text(text) => text,
            ButtonContent::Icon { name } => name,
        }
    }
}

impl From<&str> for ButtonContent {
    fn from(text: &str) -> Self {
        ButtonContent::Text(text.to_string())
    }
}

impl From<String> for ButtonContent {
    fn from(text: String) -> Self {
        ButtonContent::Text(text)
    }
}

/// Visual style of a button.
///
/// Styles are purely cosmetic: they change what is drawn, never how the
/// button reacts to a tap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ButtonStyle {
    /// Filled rounded rectangle
    Solid {
        background: Hsla,
        #[serde(default = "constants::white")]
        foreground: Hsla,
    },
    /// Clear background with a stroked rounded rectangle
    Outline { border: Hsla, foreground: Hsla },
    /// Leading-to-trailing linear gradient fill
    Gradient { colors: Vec<Hsla> },
    /// Tinted glyph in a filled circle
    Icon { background: Hsla, tint: Hsla },
    /// Named image scaled to fill, clipped to a rounded rectangle
    Textured { texture: String, foreground: Hsla },
    /// Filled rectangle with a custom corner radius and a drop shadow
    Rounded {
        background: Hsla,
        corner_radius: f32,
        #[serde(default = "default_shadow_radius")]
        shadow_radius: f32,
    },
}

fn default_shadow_radius() -> f32 {
    DEFAULT_SHADOW_RADIUS
}

impl ButtonStyle {
    /// Short lowercase name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ButtonStyle::Solid { .. } => "solid",
            ButtonStyle::Outline { .. } => "outline",
            ButtonStyle::Gradient { .. } => "gradient",
            ButtonStyle::Icon { .. } => "icon",
            ButtonStyle::Textured { .. } => "textured",
            ButtonStyle::Rounded { .. } => "rounded",
        }
    }

    /// Check the style parameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            ButtonStyle::Gradient { colors } if colors.is_empty() => Err(Error::EmptyGradient),
            _ => Ok(()),
        }
    }

    /// Color of the label drawn on top of this style.
    pub fn foreground(&self) -> Hsla {
        match self {
            ButtonStyle::Solid { foreground, .. }
            | ButtonStyle::Outline { foreground, .. }
            | ButtonStyle::Textured { foreground, .. } => *foreground,
            ButtonStyle::Icon { tint, .. } => *tint,
            ButtonStyle::Gradient { .. } | ButtonStyle::Rounded { .. } => constants::white(),
        }
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        ButtonStyle::Solid {
            background: constants::blue(),
            foreground: constants::white(),
        }
    }
}

/// Spinner shown while an action button is busy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusyIndicator {
    pub tint: Hsla,
}

impl Default for BusyIndicator {
    fn default() -> Self {
        Self {
            tint: constants::white(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex;

    #[test]
    fn test_empty_gradient_is_rejected() {
        let style = ButtonStyle::Gradient { colors: vec![] };
        assert!(matches!(style.validate(), Err(Error::EmptyGradient)));

        let style = ButtonStyle::Gradient {
            colors: vec![hex("#f00"), hex("#00f")],
        };
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_foreground_per_style() {
        let tint = hex("#ff8800");
        let icon = ButtonStyle::Icon {
            background: hex("#000"),
            tint,
        };
        assert_eq!(icon.foreground(), tint);

        let rounded = ButtonStyle::Rounded {
            background: hex("#000"),
            corner_radius: 20.0,
            shadow_radius: DEFAULT_SHADOW_RADIUS,
        };
        assert_eq!(rounded.foreground(), constants::white());
    }

    #[test]
    fn test_style_deserializes_with_defaults() {
        let style: ButtonStyle =
            serde_json::from_str(r##"{"kind":"solid","background":"#336699"}"##).unwrap();
        assert_eq!(style.foreground(), constants::white());
        assert_eq!(style.kind(), "solid");

        let style: ButtonStyle = serde_json::from_str(
            r##"{"kind":"rounded","background":"#336699","corner_radius":16}"##,
        )
        .unwrap();
        match style {
            ButtonStyle::Rounded { shadow_radius, .. } => {
                assert_eq!(shadow_radius, DEFAULT_SHADOW_RADIUS)
            }
            other => panic!("unexpected style {:?}", other),
        }
    }

    #[test]
    fn test_content_label() {
        assert_eq!(ButtonContent::from("Submit").label(), "Submit");
        let icon = ButtonContent::Icon {
            name: "star.fill".to_string(),
        };
        assert_eq!(icon.label(), "star.fill");
    }
}
