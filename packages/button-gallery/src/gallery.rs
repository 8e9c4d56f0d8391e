//! Static listing of the configured buttons.

use nr_buttons::{ActionButton, Button, ButtonFrame, ButtonStyle};
use serde::Serialize;

use crate::config::{ButtonConfig, GalleryConfig};

/// One rendered row of the gallery.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryEntry {
    pub label: String,
    pub style: &'static str,
    pub frame: ButtonFrame,
}

impl GalleryEntry {
    fn new(label: &str, style: &ButtonStyle, frame: ButtonFrame) -> Self {
        Self {
            label: label.to_string(),
            style: style.kind(),
            frame,
        }
    }
}

fn build(config: &ButtonConfig) -> nr_buttons::Result<Button> {
    let label = config.label.clone();
    Button::new(config.content(), config.style.clone(), move || {
        tracing::info!("{} pressed", label);
    })
}

/// Render every configured button, then the demo action button idle and busy.
pub fn entries(config: &GalleryConfig) -> nr_buttons::Result<Vec<GalleryEntry>> {
    let mut entries = Vec::with_capacity(config.buttons.len() + 2);

    for button_config in &config.buttons {
        let button = build(button_config)?;
        entries.push(GalleryEntry::new(
            &button_config.label,
            button.style(),
            button.render(),
        ));
    }

    let demo = ActionButton::builder("Loading")
        .style(config.demo.style.clone())
        .busy_indicator(nr_buttons::BusyIndicator {
            tint: config.demo.busy_tint,
        })
        .on_activate(nr_buttons::operation::delay(config.demo.delay()))
        .on_complete(|| {})
        .build()?;
    entries.push(GalleryEntry::new("Loading (idle)", demo.style(), demo.render()));
    entries.push(GalleryEntry::new(
        "Loading (busy)",
        demo.style(),
        ButtonFrame::busy(demo.content(), demo.style(), demo.busy_indicator()),
    ));

    Ok(entries)
}

/// Plain-text table of gallery entries.
pub fn format_table(entries: &[GalleryEntry]) -> String {
    let width = entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);
    entries
        .iter()
        .map(|entry| {
            format!(
                "{:<width$}  {:<8}  {:>5.0}x{:<3.0}  {}",
                entry.label,
                entry.style,
                entry.frame.bounds.width,
                entry.frame.bounds.height,
                entry.frame,
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
