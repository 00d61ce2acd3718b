//! Color palette and the named style table indexed by [`StyleId`].

use crate::editor::StyleId;

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Composite this color over an opaque `base`.
    pub fn over(self, base: Self) -> Self {
        let alpha = f32::from(self.a) / 255.0;
        let mix = |top: u8, bottom: u8| {
            (f32::from(top) * alpha + f32::from(bottom) * (1.0 - alpha)).round() as u8
        };
        Self::rgb(mix(self.r, base.r), mix(self.g, base.g), mix(self.b, base.b))
    }
}

/// One entry of the style table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub name: &'static str,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    const fn plain(name: &'static str, color: Color) -> Self {
        Self {
            name,
            color,
            bold: false,
            italic: false,
        }
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Fixed palette the editor draws with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub background_active: Color,
    pub gutter_background: Color,
    pub gutter_background_active: Color,
    pub selection: Color,
    pub cursor: Color,
    /// Indexed by [`StyleId`]; entry 0 is the default text style.
    pub styles: Vec<Style>,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0x1e, 0x1f, 0x22),
            background_active: Color::rgb(0x26, 0x28, 0x2c),
            gutter_background: Color::rgb(0x1a, 0x1b, 0x1e),
            gutter_background_active: Color::rgb(0x24, 0x25, 0x29),
            selection: Color::rgba(0x3d, 0x7a, 0xd6, 0x80),
            cursor: Color::rgb(0xe8, 0xe8, 0xe8),
            styles: vec![
                Style::plain("default", Color::rgb(0xd4, 0xd4, 0xd4)),
                Style::plain("line-number", Color::rgb(0x5c, 0x60, 0x66)),
                Style::plain("line-number-active", Color::rgb(0xc0, 0xc4, 0xca)),
                Style::plain("comment", Color::rgb(0x6a, 0x99, 0x55)).italic(),
                Style::plain("keyword", Color::rgb(0xc5, 0x86, 0xc0)).bold(),
                Style::plain("type", Color::rgb(0x4e, 0xc9, 0xb0)),
                Style::plain("string", Color::rgb(0xce, 0x91, 0x78)),
                Style::plain("literal", Color::rgb(0xb5, 0xce, 0xa8)),
                Style::plain("function", Color::rgb(0xdc, 0xdc, 0xaa)),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::rgb(0xfa, 0xfa, 0xf8),
            background_active: Color::rgb(0xee, 0xef, 0xea),
            gutter_background: Color::rgb(0xf0, 0xf0, 0xec),
            gutter_background_active: Color::rgb(0xe4, 0xe5, 0xe0),
            selection: Color::rgba(0x4a, 0x90, 0xe2, 0x60),
            cursor: Color::rgb(0x20, 0x20, 0x20),
            styles: vec![
                Style::plain("default", Color::rgb(0x24, 0x29, 0x2e)),
                Style::plain("line-number", Color::rgb(0x9a, 0x9e, 0xa4)),
                Style::plain("line-number-active", Color::rgb(0x30, 0x34, 0x3a)),
                Style::plain("comment", Color::rgb(0x6a, 0x73, 0x7d)).italic(),
                Style::plain("keyword", Color::rgb(0xd7, 0x3a, 0x49)).bold(),
                Style::plain("type", Color::rgb(0x00, 0x5c, 0xc5)),
                Style::plain("string", Color::rgb(0x03, 0x2f, 0x62)),
                Style::plain("literal", Color::rgb(0x00, 0x5c, 0x5c)),
                Style::plain("function", Color::rgb(0x6f, 0x42, 0xc1)),
            ],
        }
    }

    pub fn for_background(background: Background) -> Self {
        match background {
            Background::Dark => Self::dark(),
            Background::Light => Self::light(),
        }
    }

    /// Style for `id`, falling back to the default style for unknown ids.
    pub fn style(&self, id: StyleId) -> &Style {
        self.styles
            .get(id.index())
            .unwrap_or_else(|| &self.styles[StyleId::DEFAULT.index()])
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Terminal background brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Dark,
    Light,
}

impl Background {
    /// Guess the background from the `COLORFGBG` environment variable.
    pub fn detect() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    /// Parse a `COLORFGBG` value such as `"15;0"`; defaults to dark.
    pub fn from_colorfgbg(colorfgbg: Option<&str>) -> Self {
        let Some(value) = colorfgbg else {
            return Self::Dark;
        };
        let bg_str = value.rsplit(';').next().unwrap_or(value);
        let Ok(bg) = bg_str.parse::<u8>() else {
            return Self::Dark;
        };

        if bg >= 7 { Self::Light } else { Self::Dark }
    }
}
