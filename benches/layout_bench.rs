use criterion::{black_box, criterion_group, criterion_main, Criterion};
use waterfall::layout::{arrange, column_count};
use waterfall::ImageDescriptor;

fn images(n: usize) -> Vec<ImageDescriptor> {
    (0..n)
        .map(|i| {
            let w = 200 + (i as u32 * 97) % 1800;
            let h = 200 + (i as u32 * 61) % 1400;
            ImageDescriptor::new(i.to_string(), format!("https://img/{}.jpg", i), w, h)
        })
        .collect()
}

fn bench_arrange(c: &mut Criterion) {
    let page = images(20);
    let feed = images(2000);

    c.bench_function("arrange_page_4_columns", |b| {
        b.iter(|| arrange(black_box(page.clone()), column_count(800.0, 200.0, 8), 200.0).unwrap())
    });

    c.bench_function("arrange_feed_8_columns", |b| {
        b.iter(|| arrange(black_box(feed.clone()), 8, 240.0).unwrap())
    });
}

criterion_group!(benches, bench_arrange);
criterion_main!(benches);
