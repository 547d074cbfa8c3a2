use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use canvas_native_engine::{Controller, TextRange};
use std::time::Instant;
mod common;

// An edit should cost the lines it touches, not the document size
fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller_typing");

    for sections in [10, 100, 1000] {
        let content = common::generate_document(sections);
        let controller = Controller::with_text(&content);
        let at = content.find("Paragraph").map_or(0, |i| content[..i].encode_utf16().count());

        group.bench_with_input(
            BenchmarkId::new("insert_char", sections),
            &controller,
            |b, controller| {
                b.iter_custom(|iters| {
                    let mut total_duration = std::time::Duration::new(0, 0);

                    for _ in 0..iters {
                        let mut controller = controller.clone();

                        let start = Instant::now();
                        let patch = controller.replace_characters(TextRange::new(at, 0), "X");
                        total_duration += start.elapsed();

                        std::hint::black_box(patch);
                    }

                    total_duration
                });
            },
        );
    }

    group.finish();
}

fn bench_new_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller_new_line");
    group.sample_size(20);

    let content = common::generate_document(100);
    let controller = Controller::with_text(&content);
    let end_of_title = controller.blocks()[0].range.max();

    group.bench_function("split_after_title", |b| {
        b.iter_batched(
            || controller.clone(),
            |mut controller| {
                std::hint::black_box(controller.replace_characters(TextRange::new(end_of_title, 0), "\n"))
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_typing, bench_new_line);
criterion_main!(benches);
