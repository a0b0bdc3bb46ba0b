//! Per-tick pipeline: engine, renderer and previewer ordering

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use common::test_engine;
use kager::editable::{EditKey, InputSnapshot};
use kager::preview::{PreviewStatus, Previewer, SourceCheckPreviewer};
use kager::session::{EditorView, Renderer};
use kager::Session;

type Log = Rc<RefCell<Vec<String>>>;

#[derive(Default)]
struct RecordingRenderer {
    log: Log,
    frames: Vec<(Vec<String>, usize, usize)>,
    fail_editor: bool,
}

impl Renderer for RecordingRenderer {
    fn render_editor(&mut self, view: &EditorView<'_>) -> Result<()> {
        if self.fail_editor {
            bail!("surface lost");
        }
        self.log.borrow_mut().push(format!("editor:{}", view.frame));
        self.frames.push((
            view.lines.to_vec(),
            view.cursor.line,
            view.cursor.column,
        ));
        assert_eq!(view.lines.len(), view.highlights.len());
        Ok(())
    }

    fn render_preview(&mut self, status: &PreviewStatus, frame: u64) -> Result<()> {
        let tag = if status.is_compiled() { "ok" } else { "err" };
        self.log
            .borrow_mut()
            .push(format!("render_preview:{}:{}", frame, tag));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.log.borrow_mut().push("present".to_string());
        Ok(())
    }
}

struct ScriptedPreviewer {
    log: Log,
    sources: Vec<String>,
    status: PreviewStatus,
}

impl Previewer for ScriptedPreviewer {
    fn preview(&mut self, source: &str, frame: u64) -> PreviewStatus {
        self.log.borrow_mut().push(format!("preview:{}", frame));
        self.sources.push(source.to_string());
        self.status.clone()
    }
}

fn fixtures(status: PreviewStatus) -> (RecordingRenderer, ScriptedPreviewer) {
    let log: Log = Rc::default();
    let renderer = RecordingRenderer {
        log: Rc::clone(&log),
        ..RecordingRenderer::default()
    };
    let previewer = ScriptedPreviewer {
        log,
        sources: Vec::new(),
        status,
    };
    (renderer, previewer)
}

#[test]
fn test_step_runs_engine_then_render_then_preview() {
    let mut session = Session::new(test_engine(&["package main", "var Time float"], 0, 0));
    let (mut renderer, mut previewer) = fixtures(PreviewStatus::Compiled);

    session
        .step(&InputSnapshot::idle(), &mut renderer, &mut previewer)
        .unwrap();
    session
        .step(&InputSnapshot::idle(), &mut renderer, &mut previewer)
        .unwrap();

    assert_eq!(
        *renderer.log.borrow(),
        vec![
            "editor:1",
            "preview:1",
            "render_preview:1:ok",
            "present",
            "editor:2",
            "preview:2",
            "render_preview:2:ok",
            "present",
        ]
    );
    // Readers see the padded text from this tick's engine pass
    assert_eq!(renderer.frames[0].0, vec!["package main ", "var Time float "]);
    assert_eq!(previewer.sources[0], "package main \nvar Time float ");
    assert_eq!(session.frame(), 2);
}

#[test]
fn test_renderer_sees_cursor_after_edit() {
    let mut session = Session::new(test_engine(&["abc", "def"], 0, 1));
    let (mut renderer, mut previewer) = fixtures(PreviewStatus::Compiled);

    session
        .step(
            &InputSnapshot::holding(&[EditKey::Enter]),
            &mut renderer,
            &mut previewer,
        )
        .unwrap();

    let (lines, line, column) = &renderer.frames[0];
    assert_eq!(lines, &vec!["a", "bc ", "def "]);
    assert_eq!((*line, *column), (1, 0));
}

#[test]
fn test_preview_failure_leaves_buffer_untouched() {
    let mut session = Session::new(test_engine(&["func Fragment() {"], 0, 0));
    let failure = PreviewStatus::Failed("1:17: expected '}'".to_string());
    let (mut renderer, mut previewer) = fixtures(failure.clone());

    for _ in 0..3 {
        session
            .step(&InputSnapshot::idle(), &mut renderer, &mut previewer)
            .unwrap();
    }

    assert_eq!(session.engine().buffer().lines(), vec!["func Fragment() { "]);
    assert_eq!(session.last_preview(), Some(&failure));
    // Re-attempted every tick with the current text
    assert_eq!(previewer.sources.len(), 3);
    assert!(renderer
        .log
        .borrow()
        .iter()
        .any(|entry| entry == "render_preview:3:err"));
}

#[test]
fn test_render_error_stops_the_step() {
    let mut session = Session::new(test_engine(&["x"], 0, 0));
    let (mut renderer, mut previewer) = fixtures(PreviewStatus::Compiled);
    renderer.fail_editor = true;

    let err = session
        .step(&InputSnapshot::idle(), &mut renderer, &mut previewer)
        .unwrap_err();

    assert!(err.to_string().contains("surface lost"));
    assert!(previewer.sources.is_empty());
    assert!(session.last_preview().is_none());
}

#[test]
fn test_open_replaces_document() {
    let mut session = Session::new(test_engine(&["old", "text"], 1, 2));
    session.open(kager::TextBuffer::from_text("new"));

    let mut renderer = RecordingRenderer::default();
    let mut previewer = SourceCheckPreviewer::new();
    session
        .step(&InputSnapshot::idle(), &mut renderer, &mut previewer)
        .unwrap();

    assert_eq!(renderer.frames[0].0, vec!["new "]);
    assert_eq!((renderer.frames[0].1, renderer.frames[0].2), (0, 0));
    assert_eq!(session.last_preview(), Some(&PreviewStatus::Compiled));
}
