use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use kager::cli::CliArgs;
use kager::editable::{EditEngine, TextBuffer};
use kager::loader::load_file;
use kager::Session;

mod runtime;
mod view;

use runtime::App;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    kager::tracing::init();

    let startup = args.into_config();
    let config = startup.editor;

    let buffer = match &startup.path {
        Some(path) => load_file(path, config.tab_width)?,
        None => TextBuffer::new(),
    };

    let font = view::load_font(config.font_path.as_deref())?;

    let engine = EditEngine::new(buffer).with_intervals(config.repeat_intervals());
    let session = Session::new(engine);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(session, config, font);

    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
