//! Light/dark themes and color parsing for configured channel colors.

use eframe::egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

/// Alpha applied to state bands whose index lies beyond the configured palette.
pub const DEFAULT_BAND_ALPHA: f32 = 0.2;

/// Visual theme of the window and plots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Colors derived from a [`Theme`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeColors {
    pub background: Color32,
    pub foreground: Color32,
    pub font: Color32,
    pub axis: Color32,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            Theme::Light => ThemeColors {
                background: Color32::from_rgb(0xf0, 0xf0, 0xf0),
                foreground: Color32::BLACK,
                font: Color32::from_rgb(0x4f, 0x52, 0x78),
                axis: Color32::BLACK,
            },
            Theme::Dark => ThemeColors {
                background: Color32::from_rgb(0x2d, 0x2d, 0x2d),
                foreground: Color32::WHITE,
                font: Color32::from_rgb(0xd3, 0xd5, 0xe4),
                axis: Color32::WHITE,
            },
        }
    }

    /// Apply this theme's visuals to an egui context.
    pub fn apply(&self, ctx: &Context) {
        let c = self.colors();
        let mut v = match self {
            Theme::Light => Visuals::light(),
            Theme::Dark => Visuals::dark(),
        };
        v.panel_fill = c.background;
        v.window_fill = c.background;
        v.extreme_bg_color = c.background;
        v.override_text_color = Some(c.font);
        v.widgets.noninteractive.fg_stroke.color = c.axis;
        v.widgets.noninteractive.bg_stroke.color = c.axis;
        ctx.set_visuals(v);
    }
}

/// Fallback palette for state bands without a configured color.
pub fn fallback_color(index: usize) -> Color32 {
    const PALETTE: [Color32; 10] = [
        Color32::from_rgb(31, 119, 180),
        Color32::from_rgb(255, 127, 14),
        Color32::from_rgb(44, 160, 44),
        Color32::from_rgb(214, 39, 40),
        Color32::from_rgb(148, 103, 189),
        Color32::from_rgb(140, 86, 75),
        Color32::from_rgb(227, 119, 194),
        Color32::from_rgb(127, 127, 127),
        Color32::from_rgb(188, 189, 34),
        Color32::from_rgb(23, 190, 207),
    ];
    PALETTE[index % PALETTE.len()]
}

/// Parse a hex color (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`) or a basic color name.
pub fn parse_color(s: &str) -> Option<Color32> {
    let s = s.trim();
    if s.starts_with('#') {
        return Color32::from_hex(s).ok();
    }
    let c = match s.to_ascii_lowercase().as_str() {
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "gray" | "grey" => Color32::from_rgb(128, 128, 128),
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        "yellow" => Color32::from_rgb(255, 255, 0),
        "cyan" => Color32::from_rgb(0, 255, 255),
        "magenta" => Color32::from_rgb(255, 0, 255),
        "orange" => Color32::from_rgb(255, 165, 0),
        "purple" => Color32::from_rgb(128, 0, 128),
        "brown" => Color32::from_rgb(165, 42, 42),
        "pink" => Color32::from_rgb(255, 192, 203),
        _ => return None,
    };
    Some(c)
}

/// Parse `s`, falling back to `fallback` (with a warning) when it is not a color.
pub fn parse_color_or(s: &str, fallback: Color32) -> Color32 {
    parse_color(s).unwrap_or_else(|| {
        log::warn!("unrecognized color `{s}`, using fallback");
        fallback
    })
}

/// Combine an opaque color with an alpha in `[0, 1]`.
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

/// Hex form `#rrggbb` of a color, ignoring alpha.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(parse_color("#9b0000"), Some(Color32::from_rgb(0x9b, 0, 0)));
        assert_eq!(parse_color("#fff"), Some(Color32::WHITE));
        assert_eq!(parse_color("Green"), Some(Color32::from_rgb(0, 128, 0)));
        assert_eq!(
            parse_color("#ff000080"),
            Some(Color32::from_rgba_unmultiplied(255, 0, 0, 128))
        );
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn hex_round_trip() {
        let c = Color32::from_rgb(1, 2, 254);
        assert_eq!(parse_color(&to_hex(c)), Some(c));
    }
}
