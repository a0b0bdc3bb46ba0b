//! Button rendering primitives
//!
//! Pure-function API for rendering themed buttons. Callers determine the
//! visual state from pointer position and pass it to the render function.

use kager::theme::Theme;

use super::frame::{Frame, TextPainter};
use super::Rect;

/// Label of the file-open button
pub const OPEN_LABEL: &str = "Open File";

/// Horizontal padding around a button label, in pixels
const PADDING_X: usize = 8;
/// Vertical padding around a button label, in pixels
const PADDING_Y: usize = 4;

/// Visual state of a button, determined by the caller from pointer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Hovered,
}

impl ButtonState {
    pub fn from_hover(hovered: bool) -> Self {
        if hovered {
            ButtonState::Hovered
        } else {
            ButtonState::Normal
        }
    }
}

/// Button rect sized to fit `label`, anchored with its top-right corner at (right, top)
pub fn button_rect(right: usize, top: usize, label: &str, char_width: f32, line_height: usize) -> Rect {
    let width = (label.chars().count() as f32 * char_width).ceil() as usize + PADDING_X * 2;
    let height = line_height + PADDING_Y * 2;
    Rect::new(right.saturating_sub(width), top, width, height)
}

/// Render a button with a centered label
pub fn render_button(
    frame: &mut Frame,
    painter: &mut TextPainter,
    theme: &Theme,
    rect: Rect,
    label: &str,
    state: ButtonState,
) {
    let btn = &theme.button;
    let bg = match state {
        ButtonState::Normal => btn.background.to_argb_u32(),
        ButtonState::Hovered => btn.background_hover.to_argb_u32(),
    };
    frame.fill_rect(rect, bg);

    let text_w = painter.measure_width(label).round() as usize;
    let text_x = rect.x + rect.width.saturating_sub(text_w) / 2;
    painter.draw(
        frame,
        text_x as isize,
        (rect.y + PADDING_Y) as isize,
        label,
        btn.foreground.to_argb_u32(),
    );
}
