//! Stateless button component
//!
//! Provides styled button variants.

use crate::color::{constants, Hsla};
use crate::render::ButtonFrame;
use crate::style::{ButtonContent, ButtonStyle, DEFAULT_SHADOW_RADIUS};
use crate::Result;

/// A tappable control that forwards every press to its callback.
pub struct Button {
    content: ButtonContent,
    style: ButtonStyle,
    on_press: Box<dyn FnMut()>,
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("content", &self.content)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl Button {
    /// Create a button, validating the style.
    pub fn new(
        content: impl Into<ButtonContent>,
        style: ButtonStyle,
        on_press: impl FnMut() + 'static,
    ) -> Result<Self> {
        style.validate()?;
        Ok(Self {
            content: content.into(),
            style,
            on_press: Box::new(on_press),
        })
    }

    /// White text on a filled background.
    pub fn solid(title: &str, background: Hsla, on_press: impl FnMut() + 'static) -> Self {
        Self::with_valid_style(
            title.into(),
            ButtonStyle::Solid {
                background,
                foreground: constants::white(),
            },
            on_press,
        )
    }

    /// A tinted symbol inside a filled circle.
    pub fn icon(
        icon_name: &str,
        background: Hsla,
        icon_color: Hsla,
        on_press: impl FnMut() + 'static,
    ) -> Self {
        Self::with_valid_style(
            ButtonContent::Icon {
                name: icon_name.to_string(),
            },
            ButtonStyle::Icon {
                background,
                tint: icon_color,
            },
            on_press,
        )
    }

    pub fn outline(
        title: &str,
        border: Hsla,
        text_color: Hsla,
        on_press: impl FnMut() + 'static,
    ) -> Self {
        Self::with_valid_style(
            title.into(),
            ButtonStyle::Outline {
                border,
                foreground: text_color,
            },
            on_press,
        )
    }

    /// Fails with [`Error::EmptyGradient`](crate::Error::EmptyGradient) when
    /// `colors` is empty.
    pub fn gradient(
        title: &str,
        colors: Vec<Hsla>,
        on_press: impl FnMut() + 'static,
    ) -> Result<Self> {
        Self::new(title, ButtonStyle::Gradient { colors }, on_press)
    }

    /// Filled button with a custom corner radius and a drop shadow.
    pub fn rounded(
        title: &str,
        background: Hsla,
        corner_radius: f32,
        on_press: impl FnMut() + 'static,
    ) -> Self {
        Self::with_valid_style(
            title.into(),
            ButtonStyle::Rounded {
                background,
                corner_radius,
                shadow_radius: DEFAULT_SHADOW_RADIUS,
            },
            on_press,
        )
    }

    pub fn textured(
        title: &str,
        texture: &str,
        text_color: Hsla,
        on_press: impl FnMut() + 'static,
    ) -> Self {
        Self::with_valid_style(
            title.into(),
            ButtonStyle::Textured {
                texture: texture.to_string(),
                foreground: text_color,
            },
            on_press,
        )
    }

    // Only for styles that cannot fail validation.
    fn with_valid_style(
        content: ButtonContent,
        style: ButtonStyle,
        on_press: impl FnMut() + 'static,
    ) -> Self {
        Self {
            content,
            style,
            on_press: Box::new(on_press),
        }
    }

    /// Handle a tap.
    pub fn press(&mut self) {
        tracing::trace!(style = self.style.kind(), label = self.content.label(), "button pressed");
        (self.on_press)();
    }

    pub fn content(&self) -> &ButtonContent {
        &self.content
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    pub fn render(&self) -> ButtonFrame {
        ButtonFrame::idle(&self.content, &self.style)
    }
}
