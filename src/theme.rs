//! Colors used by the editor and preview panes

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }
}

/// Editor pane colors
#[derive(Debug, Clone)]
pub struct EditorTheme {
    pub background: Color,
    pub foreground: Color,
    pub current_line_background: Color,
    pub cursor_color: Color,
    pub gutter_foreground: Color,
}

/// Open-file button colors
#[derive(Debug, Clone)]
pub struct ButtonTheme {
    pub background: Color,
    pub background_hover: Color,
    pub foreground: Color,
}

/// Preview pane colors
#[derive(Debug, Clone)]
pub struct PreviewTheme {
    pub background: Color,
    pub foreground: Color,
    pub error: Color,
}

/// Resolved theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub editor: EditorTheme,
    pub button: ButtonTheme,
    pub preview: PreviewTheme,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Default Dark".to_string(),
            editor: EditorTheme {
                background: Color::rgb(0x00, 0x00, 0x00),
                foreground: Color::WHITE,
                current_line_background: Color::rgb(0x32, 0x32, 0x32),
                cursor_color: Color::WHITE,
                gutter_foreground: Color::WHITE,
            },
            button: ButtonTheme {
                background: Color::rgb(0x3a, 0x3a, 0x3a),
                background_hover: Color::rgb(0x55, 0x55, 0x55),
                foreground: Color::WHITE,
            },
            preview: PreviewTheme {
                background: Color::rgb(0x10, 0x10, 0x10),
                foreground: Color::WHITE,
                error: Color::rgb(0xff, 0x00, 0x00),
            },
        }
    }
}
