//! One editing session: the per-tick pipeline tying input, the edit engine,
//! the renderer and the previewer together.
//!
//! Each step runs strictly in order: engine tick, editor render, preview,
//! preview render, present. Rendering and previewing only ever see borrowed
//! snapshots, so nothing downstream of the engine can touch the buffer.

use anyhow::{Context, Result};

use crate::editable::{Cursor, EditEngine, InputSnapshot, TextBuffer, TickReport};
use crate::preview::{PreviewStatus, Previewer};
use crate::syntax::{highlight_line, LineSegment};

/// Ticks in one full cursor blink cycle
pub const BLINK_PERIOD: u32 = 30;
/// The cursor is drawn while the blink phase is above this
pub const BLINK_VISIBLE_ABOVE: u32 = 15;

/// Cursor blink phase, advanced once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorBlink {
    phase: u32,
}

impl CursorBlink {
    pub fn advance(&mut self) {
        if self.phase > 0 {
            self.phase -= 1;
        } else {
            self.phase = BLINK_PERIOD;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase > BLINK_VISIBLE_ABOVE
    }
}

/// Read-only view of the editor handed to the renderer each tick
#[derive(Debug, Clone, Copy)]
pub struct EditorView<'a> {
    pub lines: &'a [String],
    /// Highlight segments, parallel to `lines`
    pub highlights: &'a [Vec<LineSegment>],
    pub cursor: Cursor,
    /// Vertical scroll offset in lines
    pub scroll_offset: f32,
    pub cursor_visible: bool,
    pub frame: u64,
}

/// Draws the editor and preview panes
pub trait Renderer {
    fn render_editor(&mut self, view: &EditorView<'_>) -> Result<()>;

    fn render_preview(&mut self, status: &PreviewStatus, frame: u64) -> Result<()>;

    /// Show the finished frame
    fn present(&mut self) -> Result<()>;
}

/// Owns the edit engine and the presentation counters that go with it
#[derive(Debug, Default)]
pub struct Session {
    engine: EditEngine,
    blink: CursorBlink,
    frame: u64,
    last_preview: Option<PreviewStatus>,
}

impl Session {
    pub fn new(engine: EditEngine) -> Self {
        Self {
            engine,
            blink: CursorBlink::default(),
            frame: 0,
            last_preview: None,
        }
    }

    pub fn engine(&self) -> &EditEngine {
        &self.engine
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_preview(&self) -> Option<&PreviewStatus> {
        self.last_preview.as_ref()
    }

    /// Replace the document (Open button)
    pub fn open(&mut self, buffer: TextBuffer) {
        self.engine.load(buffer);
    }

    /// Run one tick of the pipeline
    pub fn step<R, P>(
        &mut self,
        input: &InputSnapshot,
        renderer: &mut R,
        previewer: &mut P,
    ) -> Result<TickReport>
    where
        R: Renderer + ?Sized,
        P: Previewer + ?Sized,
    {
        self.frame += 1;
        let report = self
            .engine
            .tick(input)
            .context("edit engine rejected a buffer operation")?;
        self.blink.advance();

        let lines = self.engine.buffer().lines();
        let highlights: Vec<Vec<LineSegment>> =
            lines.iter().map(|line| highlight_line(line)).collect();
        let view = EditorView {
            lines: &lines,
            highlights: &highlights,
            cursor: self.engine.cursor(),
            scroll_offset: self.engine.scroll_offset(),
            cursor_visible: self.blink.is_visible(),
            frame: self.frame,
        };
        renderer.render_editor(&view)?;

        let status = previewer.preview(&self.engine.buffer().text(), self.frame);
        renderer.render_preview(&status, self.frame)?;
        self.last_preview = Some(status);

        renderer.present()?;
        Ok(report)
    }
}
