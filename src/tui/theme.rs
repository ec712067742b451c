//! # Theme
//!
//! The terminal's reading of the injected stylesheet. Only CSS custom
//! properties with hex colors are understood; everything else in the sheet
//! is ignored.
//!
//! ```css
//! :root {
//!     --primary-color: #1E3A8A;
//!     --accent-color: #F59E0B;
//! }
//! ```

use ratatui::style::Color;

use crate::core::router::ViewTone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Yellow,
            text: Color::White,
            muted: Color::DarkGray,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Starts from the defaults and overrides whatever the sheet declares.
    pub fn from_css(css: &str) -> Self {
        let mut theme = Theme::default();
        for (name, value) in custom_properties(css) {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match name {
                "primary-color" => theme.primary = color,
                "accent-color" => theme.accent = color,
                "text-color" => theme.text = color,
                "muted-color" => theme.muted = color,
                "error-color" => theme.error = color,
                _ => {}
            }
        }
        theme
    }

    pub fn tone(&self, tone: ViewTone) -> Color {
        match tone {
            ViewTone::Normal => self.text,
            ViewTone::Muted => self.muted,
            ViewTone::Accent => self.accent,
            ViewTone::Error => self.error,
        }
    }
}

/// `--name: value;` declarations, in order of appearance.
fn custom_properties(css: &str) -> impl Iterator<Item = (&str, &str)> {
    css.split([';', '{', '}'])
        .filter_map(|decl| decl.trim().strip_prefix("--"))
        .filter_map(|decl| decl.split_once(':'))
        .map(|(name, value)| (name.trim(), value.trim()))
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shell::DEFAULT_STYLE_SHEET;

    #[test]
    fn test_bundled_stylesheet_sets_palette() {
        let theme = Theme::from_css(DEFAULT_STYLE_SHEET);
        assert_eq!(theme.primary, Color::Rgb(0x1E, 0x3A, 0x8A));
        assert_eq!(theme.accent, Color::Rgb(0xF5, 0x9E, 0x0B));
        assert_eq!(theme.tone(ViewTone::Error), Color::Rgb(0xDC, 0x26, 0x26));
    }

    #[test]
    fn test_unknown_or_bad_values_keep_defaults() {
        let theme = Theme::from_css(":root { --accent-color: red; --shadow: #000000; }");
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn test_empty_sheet_is_default() {
        assert_eq!(Theme::from_css(""), Theme::default());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }
}
