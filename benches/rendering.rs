//! Benchmarks for line rendering and shaping.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use platon::editor::Editor;
use platon::layout::LayoutCache;
use platon::ui::TerminalShaper;

fn sample_text() -> String {
    (0..10_000)
        .map(|i| format!("fn item_{i}(x: u32) -> u32 {{ x * {i} }} // line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_render_window(c: &mut Criterion) {
    let editor = Editor::from_text(&sample_text());

    c.bench_function("render_window", |b| {
        b.iter(|| editor.render(black_box(5_000), black_box(5_048)))
    });
}

fn bench_cached_frame(c: &mut Criterion) {
    let editor = Editor::from_text(&sample_text());
    let mut cache = LayoutCache::new(TerminalShaper);

    c.bench_function("cached_frame", |b| {
        b.iter(|| {
            let rows = editor.render(black_box(0), black_box(48));
            let mut frame = cache.begin_frame();
            for row in &rows {
                black_box(frame.layout_for_line(editor.theme(), row));
            }
        })
    });
}

criterion_group!(benches, bench_render_window, bench_cached_frame);
criterion_main!(benches);
