//! View module - softbuffer rendering of the editor and preview panes
//!
//! The window is split in half: the editor on the left, the preview pane on
//! the right. Everything is drawn into a persistent back buffer and copied to
//! the surface on present.

pub mod button;
pub mod frame;

pub use button::{ButtonState, OPEN_LABEL};
pub use frame::{Frame, TextPainter};

use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings, LineMetrics, Metrics};
use softbuffer::Surface;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::Path;
use std::rc::Rc;
use winit::window::Window;

use kager::preview::PreviewStatus;
use kager::session::EditorView;
use kager::theme::Theme;

pub type GlyphCacheKey = (char, u32);

pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Monospace fonts tried, in order, when no font is configured
const SYSTEM_MONOSPACE_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Monaco.ttf",
    "/Library/Fonts/Courier New.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

/// Left edge of line numbers
const GUTTER_X: usize = 2;
/// Minimum distance from the pane edge to the text column
const MIN_TEXT_X: usize = 20;
/// Top padding above the first line
const TEXT_TOP: f32 = 5.0;
/// Inset of the preview pane's text
const PREVIEW_INSET: usize = 20;
/// Margin around the Open button
const BUTTON_MARGIN: usize = 10;

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point (in window pixels) lies inside the rect
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64
            && y >= self.y as f64
            && x < (self.x + self.width) as f64
            && y < (self.y + self.height) as f64
    }
}

/// Load the configured font, or the first system monospace font found
pub fn load_font(configured: Option<&Path>) -> Result<Font> {
    if let Some(path) = configured {
        return font_from_file(path);
    }

    for candidate in SYSTEM_MONOSPACE_FONTS {
        let path = Path::new(candidate);
        if !path.is_file() {
            continue;
        }
        match font_from_file(path) {
            Ok(font) => {
                tracing::info!("Using font {}", path.display());
                return Ok(font);
            }
            Err(e) => tracing::warn!("Skipping font {}: {:#}", path.display(), e),
        }
    }

    Err(anyhow!(
        "no monospace font found; set font_path in the config file"
    ))
}

fn font_from_file(path: &Path) -> Result<Font> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read font {}", path.display()))?;
    Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| anyhow!("Failed to parse font {}: {}", path.display(), e))
}

/// Width of the line-number gutter for a document of `line_count` lines
fn gutter_width(line_count: usize, char_width: f32) -> usize {
    let digits = line_count.max(1).to_string().len();
    let needed = (digits as f32 * char_width).ceil() as usize + GUTTER_X + 6;
    needed.max(MIN_TEXT_X)
}

pub struct Renderer {
    font: Font,
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Persistent back buffer; softbuffer doesn't guarantee the surface
    /// contents survive between frames.
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
    font_size: f32,
    line_metrics: LineMetrics,
    glyph_cache: GlyphCache,
    char_width: f32,
    theme: Theme,
    open_button_hovered: bool,
}

impl Renderer {
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        font: Font,
        font_size: f32,
        theme: Theme,
    ) -> Result<Self> {
        let scale_factor = window.scale_factor();
        let (width, height) = {
            let size = window.inner_size();
            (size.width.max(1), size.height.max(1))
        };

        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create surface: {}", e))?;
        resize_surface(&mut surface, width, height)?;

        let font_size = font_size * scale_factor as f32;
        let line_metrics = font
            .horizontal_line_metrics(font_size)
            .ok_or_else(|| anyhow!("Font missing horizontal line metrics"))?;

        let (metrics, _) = font.rasterize('M', font_size);
        let char_width = metrics.advance_width;

        Ok(Self {
            font,
            surface,
            back_buffer: vec![0u32; (width as usize) * (height as usize)],
            width,
            height,
            font_size,
            line_metrics,
            glyph_cache: HashMap::new(),
            char_width,
            theme,
            open_button_hovered: false,
        })
    }

    pub fn line_height(&self) -> usize {
        self.line_metrics.new_line_size.ceil() as usize
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let (width, height) = (width.max(1), height.max(1));
        if self.width == width && self.height == height {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.back_buffer
            .resize((width as usize) * (height as usize), 0);
        resize_surface(&mut self.surface, width, height)
    }

    fn editor_width(&self) -> usize {
        self.width as usize / 2
    }

    /// Where the Open button sits: top-right corner of the editor pane
    pub fn open_button_rect(&self) -> Rect {
        button::button_rect(
            self.editor_width().saturating_sub(BUTTON_MARGIN),
            BUTTON_MARGIN,
            OPEN_LABEL,
            self.char_width,
            self.line_height(),
        )
    }

    pub fn set_open_button_hovered(&mut self, hovered: bool) {
        self.open_button_hovered = hovered;
    }
}

fn resize_surface(
    surface: &mut Surface<Rc<Window>, Rc<Window>>,
    width: u32,
    height: u32,
) -> Result<()> {
    let w = NonZeroU32::new(width).ok_or_else(|| anyhow!("surface width is zero"))?;
    let h = NonZeroU32::new(height).ok_or_else(|| anyhow!("surface height is zero"))?;
    surface
        .resize(w, h)
        .map_err(|e| anyhow!("Failed to resize surface: {}", e))
}

impl kager::session::Renderer for Renderer {
    fn render_editor(&mut self, view: &EditorView<'_>) -> Result<()> {
        let line_height = self.line_height();
        let editor_width = self.editor_width();
        let height = self.height as usize;
        let char_width = self.char_width;
        let button_rect = self.open_button_rect();
        let button_state = ButtonState::from_hover(self.open_button_hovered);
        let theme = &self.theme.editor;

        let mut frame = Frame::new(&mut self.back_buffer, self.width as usize, height);
        let mut painter = TextPainter::new(
            &self.font,
            &mut self.glyph_cache,
            self.font_size,
            self.line_metrics.ascent,
        );

        frame.fill_rect(
            Rect::new(0, 0, editor_width, height),
            theme.background.to_argb_u32(),
        );

        let text_x = gutter_width(view.lines.len(), char_width);
        let space_width = painter.measure_width(" ");

        for (i, line) in view.lines.iter().enumerate() {
            let top = TEXT_TOP + (view.scroll_offset + i as f32) * line_height as f32;
            if top + (line_height as f32) < 0.0 {
                continue;
            }
            if top >= height as f32 {
                break;
            }
            let y = top.round() as isize;

            let is_active = i == view.cursor.line;
            if is_active && y >= 0 {
                frame.fill_rect(
                    Rect::new(0, y as usize, editor_width, line_height),
                    theme.current_line_background.to_argb_u32(),
                );
            }

            painter.draw(
                &mut frame,
                GUTTER_X as isize,
                y,
                &(i + 1).to_string(),
                theme.gutter_foreground.to_argb_u32(),
            );

            let mut x = text_x as f32;
            if let Some(segments) = view.highlights.get(i) {
                for (n, segment) in segments.iter().enumerate() {
                    if n > 0 {
                        x += space_width;
                    }
                    x += painter.draw(
                        &mut frame,
                        x.round() as isize,
                        y,
                        &segment.text,
                        segment.color.to_argb_u32(),
                    );
                }
            }

            // The cursor glyph takes the place of the character under it
            if is_active && view.cursor_visible {
                let prefix: String = line.chars().take(view.cursor.column).collect();
                let cursor_x = text_x as f32 + painter.measure_width(&prefix);
                let cell_width = line
                    .chars()
                    .nth(view.cursor.column)
                    .map(|ch| painter.measure_width(ch.encode_utf8(&mut [0; 4])))
                    .unwrap_or(char_width);
                if y >= 0 {
                    frame.fill_rect(
                        Rect::new(
                            cursor_x.round() as usize,
                            y as usize,
                            cell_width.ceil() as usize,
                            line_height,
                        ),
                        theme.current_line_background.to_argb_u32(),
                    );
                }
                painter.draw(
                    &mut frame,
                    cursor_x.round() as isize,
                    y,
                    "|",
                    theme.cursor_color.to_argb_u32(),
                );
            }
        }

        button::render_button(
            &mut frame,
            &mut painter,
            &self.theme,
            button_rect,
            OPEN_LABEL,
            button_state,
        );

        Ok(())
    }

    fn render_preview(&mut self, status: &PreviewStatus, frame_number: u64) -> Result<()> {
        let line_height = self.line_height();
        let pane_x = self.editor_width();
        let pane_width = (self.width as usize).saturating_sub(pane_x);
        let height = self.height as usize;
        let theme = &self.theme.preview;

        let mut frame = Frame::new(&mut self.back_buffer, self.width as usize, height);
        let mut painter = TextPainter::new(
            &self.font,
            &mut self.glyph_cache,
            self.font_size,
            self.line_metrics.ascent,
        );

        frame.fill_rect(
            Rect::new(pane_x, 0, pane_width, height),
            theme.background.to_argb_u32(),
        );

        let text_x = (pane_x + PREVIEW_INSET) as isize;
        match status {
            PreviewStatus::Compiled => {
                let label = format!("compiled (frame {})", frame_number);
                painter.draw(
                    &mut frame,
                    text_x,
                    PREVIEW_INSET as isize,
                    &label,
                    theme.foreground.to_argb_u32(),
                );
            }
            PreviewStatus::Failed(message) => {
                for (i, line) in message.lines().enumerate() {
                    let y = PREVIEW_INSET + i * line_height;
                    if y >= height {
                        break;
                    }
                    painter.draw(
                        &mut frame,
                        text_x,
                        y as isize,
                        line,
                        theme.error.to_argb_u32(),
                    );
                }
            }
        }

        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("Failed to get surface buffer: {}", e))?;
        // The surface can lag a resize by a frame
        let len = buffer.len().min(self.back_buffer.len());
        buffer[..len].copy_from_slice(&self.back_buffer[..len]);
        buffer
            .present()
            .map_err(|e| anyhow!("Failed to present buffer: {}", e))
    }
}
