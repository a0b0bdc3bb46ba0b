//! Syntax highlighting for shader source
//!
//! Only uniform declarations (`var <name> <type>`) are colored. Highlighting
//! is a pure function of one line and is recomputed every frame.

use std::sync::LazyLock;

use regex::Regex;

use crate::theme::Color;

/// Color of the `var` keyword in a uniform declaration
pub const KEYWORD_COLOR: Color = Color::rgb(0xc7, 0x92, 0xea);
/// Color of the declared uniform's name
pub const NAME_COLOR: Color = Color::rgb(0xff, 0xcb, 0x6b);
/// Color of everything else
pub const DEFAULT_COLOR: Color = Color::WHITE;

static UNIFORM_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"var [a-zA-Z0-9_.-]+ [a-zA-Z0-9_.-]+").expect("uniform pattern is valid")
});

/// A colored run of a line's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSegment {
    pub text: String,
    pub color: Color,
}

impl LineSegment {
    fn new(text: &str, color: Color) -> Self {
        Self {
            text: text.to_string(),
            color,
        }
    }
}

/// Whether `line` contains a uniform declaration anywhere
pub fn is_uniform_declaration(line: &str) -> bool {
    UNIFORM_DECL.is_match(line)
}

/// Split `line` into colored segments, left to right.
///
/// A uniform declaration yields one segment per single-space separated token
/// (empty tokens included); anything else is one default-colored segment.
pub fn highlight_line(line: &str) -> Vec<LineSegment> {
    if !is_uniform_declaration(line) {
        return vec![LineSegment::new(line, DEFAULT_COLOR)];
    }

    line.split(' ')
        .enumerate()
        .map(|(i, token)| {
            let color = match i {
                0 => KEYWORD_COLOR,
                1 => NAME_COLOR,
                _ => DEFAULT_COLOR,
            };
            LineSegment::new(token, color)
        })
        .collect()
}
