//! Benchmarks for the per-tick edit engine and highlighter
//!
//! Run with: cargo bench engine_tick

use kager::editable::{EditEngine, EditKey, InputSnapshot, TextBuffer};
use kager::syntax::highlight_line;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn make_engine(lines: usize) -> EditEngine {
    let lines: Vec<String> = (0..lines)
        .map(|i| {
            if i % 4 == 0 {
                format!("var Uniform{} float", i)
            } else {
                format!("    value{} := imageSrc0At(texCoord) * {}.0", i, i)
            }
        })
        .collect();
    EditEngine::new(TextBuffer::from_lines(lines))
}

// ============================================================================
// Engine ticks
// ============================================================================

#[divan::bench(args = [100, 1000, 10000])]
fn tick_idle(bencher: divan::Bencher, lines: usize) {
    let mut engine = make_engine(lines);
    let input = InputSnapshot::idle();
    // First tick pads every line; measure the steady state
    engine.tick(&input).unwrap();

    bencher.bench_local(|| {
        divan::black_box(engine.tick(&input).unwrap());
    });
}

#[divan::bench(args = [100, 1000])]
fn tick_typing(bencher: divan::Bencher, lines: usize) {
    let mut engine = make_engine(lines);
    let input = InputSnapshot::typing("x");

    bencher.bench_local(|| {
        divan::black_box(engine.tick(&input).unwrap());
    });
}

#[divan::bench(args = [100, 1000])]
fn tick_enter_and_backspace(bencher: divan::Bencher, lines: usize) {
    let mut engine = make_engine(lines);
    let enter = InputSnapshot::holding(&[EditKey::Enter]);
    let backspace = InputSnapshot::holding(&[EditKey::Backspace]);
    let idle = InputSnapshot::idle();

    bencher.bench_local(|| {
        engine.tick(&enter).unwrap();
        while engine.is_cooling() {
            engine.tick(&idle).unwrap();
        }
        engine.tick(&backspace).unwrap();
        while engine.is_cooling() {
            engine.tick(&idle).unwrap();
        }
        divan::black_box(engine.buffer().line_count());
    });
}

// ============================================================================
// Per-frame highlighting of the whole document
// ============================================================================

#[divan::bench(args = [100, 1000])]
fn highlight_document(bencher: divan::Bencher, lines: usize) {
    let engine = make_engine(lines);
    let lines = engine.buffer().lines();

    bencher.bench_local(|| {
        let segments: Vec<_> = lines.iter().map(|line| highlight_line(line)).collect();
        divan::black_box(segments);
    });
}
