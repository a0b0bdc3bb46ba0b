use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use fontdue::Font;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::Window;

use kager::config::EditorConfig;
use kager::loader::load_file;
use kager::preview::SourceCheckPreviewer;
use kager::theme::Theme;
use kager::Session;

use super::input::InputCollector;
use crate::view::Renderer;

const WINDOW_TITLE: &str = "kager - shader editor";

pub struct App {
    session: Session,
    previewer: SourceCheckPreviewer,
    input: InputCollector,
    config: EditorConfig,
    /// Handed to the renderer once the window exists
    font: Option<Font>,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    tick_interval: Duration,
    next_tick: Instant,
    mouse_position: Option<(f64, f64)>,
    dialog_open: bool,
    dialog_tx: Sender<Option<PathBuf>>,
    dialog_rx: Receiver<Option<PathBuf>>,
    fatal: Option<anyhow::Error>,
}

impl App {
    pub fn new(session: Session, config: EditorConfig, font: Font) -> Self {
        let (dialog_tx, dialog_rx) = mpsc::channel();
        let tick_interval = Duration::from_secs_f64(1.0 / config.ticks_per_second.max(1) as f64);

        Self {
            session,
            previewer: SourceCheckPreviewer::new(),
            input: InputCollector::new(),
            config,
            font: Some(font),
            renderer: None,
            window: None,
            context: None,
            tick_interval,
            next_tick: Instant::now(),
            mouse_position: None,
            dialog_open: false,
            dialog_tx,
            dialog_rx,
            fatal: None,
        }
    }

    /// The error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.fatal.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{:#}", error);
        self.fatal = Some(error);
        event_loop.exit();
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create graphics context: {}", e))?;

        let font = self
            .font
            .take()
            .ok_or_else(|| anyhow!("renderer already initialized"))?;
        let renderer = Renderer::new(
            Rc::clone(&window),
            &context,
            font,
            self.config.font_size,
            Theme::default(),
        )?;

        self.renderer = Some(renderer);
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    /// Show the file dialog off the event loop thread
    fn open_file_dialog(&mut self) {
        if self.dialog_open {
            return;
        }
        self.dialog_open = true;

        let tx = self.dialog_tx.clone();
        std::thread::spawn(move || {
            let picked = rfd::FileDialog::new()
                .add_filter("Kage Shader File (.go)", &["go"])
                .pick_file();
            let _ = tx.send(picked);
        });
    }

    /// Load whatever file the dialog returned since the last tick
    fn process_dialog_results(&mut self) {
        while let Ok(picked) = self.dialog_rx.try_recv() {
            self.dialog_open = false;
            let Some(path) = picked else {
                tracing::debug!("Open dialog cancelled");
                continue;
            };

            match load_file(&path, self.config.tab_width) {
                Ok(buffer) => {
                    self.session.open(buffer);
                    if let Some(window) = &self.window {
                        window.set_title(&format!("{} - {}", WINDOW_TITLE, path.display()));
                    }
                }
                Err(e) => tracing::warn!("Could not open {}: {:#}", path.display(), e),
            }
        }
    }

    fn tick(&mut self) -> Result<()> {
        self.process_dialog_results();

        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };
        let snapshot = self.input.take_snapshot();
        self.session
            .step(&snapshot, renderer, &mut self.previewer)?;
        Ok(())
    }

    fn update_hover(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let hovered = self
            .mouse_position
            .is_some_and(|(x, y)| renderer.open_button_rect().contains(x, y));
        renderer.set_open_button_hovered(hovered);
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Result<()> {
        match event {
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height)?;
                }
                self.update_hover();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.handle_key_event(event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let line_height = self
                    .renderer
                    .as_ref()
                    .map_or(0.0, |r| r.line_height() as f32);
                self.input.handle_wheel(*delta, line_height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some((position.x, position.y));
                self.update_hover();
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                self.update_hover();
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                let clicked = match (self.mouse_position, self.renderer.as_ref()) {
                    (Some((x, y)), Some(renderer)) => renderer.open_button_rect().contains(x, y),
                    _ => false,
                };
                if clicked {
                    self.open_file_dialog();
                }
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
            }
            _ => {}
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                self.fail(event_loop, e);
                return;
            }
            self.next_tick = Instant::now();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let ours = self.window.as_ref().is_some_and(|w| w.id() == window_id);
        if !ours {
            return;
        }

        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        if let Err(e) = self.handle_event(&event) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_tick {
            if let Err(e) = self.tick() {
                self.fail(event_loop, e);
                return;
            }
            self.next_tick += self.tick_interval;
            // Don't try to catch up after a stall
            if self.next_tick < now {
                self.next_tick = now + self.tick_interval;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}
