//! Framework-agnostic render description of a button.
//!
//! A [`ButtonFrame`] lists what to draw, back to front, inside fixed bounds.
//! Host toolkits translate the layers into their own primitives.

use serde::Serialize;
use std::fmt;

use crate::color::{constants, Hsla};
use crate::style::{
    BusyIndicator, ButtonContent, ButtonStyle, DEFAULT_CORNER_RADIUS, ICON_SIZE, OUTLINE_WIDTH,
};

/// Padding applied on every side of the content.
pub const PADDING: f32 = 16.0;

/// Advance width of one label glyph.
pub const GLYPH_WIDTH: f32 = 9.0;

/// Height of a label line.
pub const LINE_HEIGHT: f32 = 20.0;

/// Width and height in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// How a shape is filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    Color { color: Hsla },
    LinearGradient { stops: Vec<Hsla> },
    Texture { name: String },
}

/// Shape the background is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Clip {
    RoundedRect { radius: f32 },
    Circle,
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum Layer {
    Shadow { radius: f32 },
    Fill { fill: Fill, clip: Clip },
    Border { color: Hsla, width: f32, clip: Clip },
    Label { text: String, color: Hsla },
    Glyph { name: String, color: Hsla, size: f32 },
    Spinner { tint: Hsla },
}

/// Everything needed to draw a button at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonFrame {
    /// Hit region and visual bounds
    pub bounds: Size,
    /// Layers, back to front
    pub layers: Vec<Layer>,
}

impl ButtonFrame {
    /// Lay out an idle button.
    pub fn idle(content: &ButtonContent, style: &ButtonStyle) -> Self {
        let mut layers = background_layers(style);
        layers.push(content_layer(content, style.foreground()));
        Self {
            bounds: measure(content),
            layers,
        }
    }

    /// Lay out a busy button.
    ///
    /// The content layer is kept with a transparent color so the bounds match
    /// the idle frame, and a spinner is drawn over it.
    pub fn busy(content: &ButtonContent, style: &ButtonStyle, indicator: &BusyIndicator) -> Self {
        let mut layers = background_layers(style);
        layers.push(content_layer(content, constants::transparent()));
        layers.push(Layer::Spinner {
            tint: indicator.tint,
        });
        Self {
            bounds: measure(content),
            layers,
        }
    }

    /// Whether a spinner is drawn.
    pub fn shows_spinner(&self) -> bool {
        self.layers
            .iter()
            .any(|layer| matches!(layer, Layer::Spinner { .. }))
    }

    /// Text of the first label that is actually visible.
    pub fn visible_label(&self) -> Option<&str> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Label { text, color } if !color.is_transparent() => Some(text.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for ButtonFrame {
    /// Single-line terminal rendering, e.g. `( Submit )` or `( ⠿      )`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match self.clip() {
            Some(Clip::Circle) => ('(', ')'),
            _ => ('[', ']'),
        };

        let width = ((self.bounds.width - 2.0 * PADDING) / GLYPH_WIDTH).round().max(1.0) as usize;
        let body = match (self.visible_label(), self.shows_spinner()) {
            (_, true) => format!("{:^width$}", "⠿", width = width),
            (Some(text), false) => format!("{:^width$}", text, width = width),
            (None, false) => " ".repeat(width),
        };

        write!(f, "{} {} {}", open, body, close)
    }
}

impl ButtonFrame {
    fn clip(&self) -> Option<Clip> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Fill { clip, .. } | Layer::Border { clip, .. } => Some(*clip),
            _ => None,
        })
    }
}

/// Size of the content plus padding.
pub fn measure(content: &ButtonContent) -> Size {
    let inner = match content {
        ButtonContent::Text(text) => {
            Size::new(text.chars().count() as f32 * GLYPH_WIDTH, LINE_HEIGHT)
        }
        ButtonContent::Icon { .. } => Size::new(ICON_SIZE, ICON_SIZE),
    };
    Size::new(inner.width + 2.0 * PADDING, inner.height + 2.0 * PADDING)
}

fn background_layers(style: &ButtonStyle) -> Vec<Layer> {
    let rounded = Clip::RoundedRect {
        radius: DEFAULT_CORNER_RADIUS,
    };

    match style {
        ButtonStyle::Solid { background, .. } => vec![Layer::Fill {
            fill: Fill::Color { color: *background },
            clip: rounded,
        }],
        ButtonStyle::Outline { border, .. } => vec![Layer::Border {
            color: *border,
            width: OUTLINE_WIDTH,
            clip: rounded,
        }],
        ButtonStyle::Gradient { colors } => vec![Layer::Fill {
            fill: Fill::LinearGradient {
                stops: colors.clone(),
            },
            clip: rounded,
        }],
        ButtonStyle::Icon { background, .. } => vec![Layer::Fill {
            fill: Fill::Color { color: *background },
            clip: Clip::Circle,
        }],
        ButtonStyle::Textured { texture, .. } => vec![Layer::Fill {
            fill: Fill::Texture {
                name: texture.clone(),
            },
            clip: rounded,
        }],
        ButtonStyle::Rounded {
            background,
            corner_radius,
            shadow_radius,
        } => vec![
            Layer::Shadow {
                radius: *shadow_radius,
            },
            Layer::Fill {
                fill: Fill::Color { color: *background },
                clip: Clip::RoundedRect {
                    radius: *corner_radius,
                },
            },
        ],
    }
}

fn content_layer(content: &ButtonContent, color: Hsla) -> Layer {
    match content {
        ButtonContent::Text(text) => Layer::Label {
            text: text.clone(),
            color,
        },
        ButtonContent::Icon { name } => Layer::Glyph {
            name: name.clone(),
            color,
            size: ICON_SIZE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex;
    use approx::assert_abs_diff_eq;

    fn solid() -> ButtonStyle {
        ButtonStyle::Solid {
            background: hex("#007aff"),
            foreground: constants::white(),
        }
    }

    #[test]
    fn test_measure_text() {
        let size = measure(&ButtonContent::from("Submit"));
        assert_abs_diff_eq!(size.width, 6.0 * GLYPH_WIDTH + 32.0);
        assert_abs_diff_eq!(size.height, LINE_HEIGHT + 32.0);
    }

    #[test]
    fn test_measure_icon() {
        let size = measure(&ButtonContent::Icon {
            name: "heart".to_string(),
        });
        assert_eq!(size, Size::new(62.0, 62.0));
    }

    #[test]
    fn test_busy_frame_keeps_bounds_and_hides_label() {
        let content = ButtonContent::from("Submit");
        let idle = ButtonFrame::idle(&content, &solid());
        let busy = ButtonFrame::busy(&content, &solid(), &BusyIndicator::default());

        assert_eq!(idle.bounds, busy.bounds);
        assert_eq!(idle.visible_label(), Some("Submit"));
        assert!(!idle.shows_spinner());
        assert_eq!(busy.visible_label(), None);
        assert!(busy.shows_spinner());
    }

    #[test]
    fn test_rounded_draws_shadow_first() {
        let style = ButtonStyle::Rounded {
            background: hex("#34c759"),
            corner_radius: 20.0,
            shadow_radius: 10.0,
        };
        let frame = ButtonFrame::idle(&ButtonContent::from("Go"), &style);
        assert_eq!(frame.layers[0], Layer::Shadow { radius: 10.0 });
        assert!(matches!(
            frame.layers[1],
            Layer::Fill {
                clip: Clip::RoundedRect { radius },
                ..
            } if radius == 20.0
        ));
    }

    #[test]
    fn test_display() {
        let content = ButtonContent::from("Submit");
        let idle = ButtonFrame::idle(&content, &solid());
        assert_eq!(idle.to_string(), "[ Submit ]");

        let busy = ButtonFrame::busy(&content, &solid(), &BusyIndicator::default());
        assert_eq!(busy.to_string(), "[   ⠿    ]");

        let icon = ButtonStyle::Icon {
            background: hex("#000"),
            tint: hex("#fff"),
        };
        let frame = ButtonFrame::idle(
            &ButtonContent::Icon {
                name: "star".to_string(),
            },
            &icon,
        );
        assert!(frame.to_string().starts_with('('));
    }
}
