//! Benchmarks for csv2docx conversion performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates semicolon-delimited text with the given shape.
///
/// Every third row is one cell short so the loader has padding to do.
fn create_test_csv(rows: usize, cols: usize) -> Vec<u8> {
    let mut content = String::new();
    for r in 0..rows {
        let width = if r % 3 == 2 { cols - 1 } else { cols };
        let cells: Vec<String> = (0..width)
            .map(|c| {
                if c == 0 {
                    format!("\"row {}; quoted\"", r)
                } else {
                    format!("value {}-{}", r, c)
                }
            })
            .collect();
        content.push_str(&cells.join(";"));
        content.push('\n');
    }
    content.into_bytes()
}

/// Benchmark input format detection.
fn bench_format_detection(c: &mut Criterion) {
    let csv_data = create_test_csv(10, 4);
    let zip_data = b"PK\x03\x04 not really an archive";

    c.bench_function("detect_text", |b| {
        b.iter(|| csv2docx::detect_format_from_bytes(black_box(&csv_data)).unwrap());
    });

    c.bench_function("detect_zip", |b| {
        b.iter(|| csv2docx::detect_format_from_bytes(black_box(zip_data)).unwrap());
    });
}

/// Benchmark CSV loading at various sizes.
fn bench_grid_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_loading");

    for rows in [10, 100, 1000].iter() {
        let data = create_test_csv(*rows, 8);

        group.bench_function(format!("{}_rows", rows), |b| {
            b.iter(|| csv2docx::load_grid_from_bytes(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark document rendering and packaging.
fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let options = csv2docx::RenderOptions::default();

    for rows in [10, 100, 1000].iter() {
        let grid = csv2docx::load_grid_from_bytes(&create_test_csv(*rows, 8)).unwrap();

        group.bench_function(format!("to_docx_{}_rows", rows), |b| {
            b.iter(|| {
                let doc = csv2docx::render_grid(black_box(&grid), &options).unwrap();
                csv2docx::render::to_docx(&doc).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark reading a generated document back.
fn bench_read_back(c: &mut Criterion) {
    let bytes = csv2docx::Csv2Docx::new()
        .load_bytes(&create_test_csv(100, 8))
        .unwrap()
        .to_bytes()
        .unwrap();

    c.bench_function("read_docx_100_rows", |b| {
        b.iter(|| {
            csv2docx::DocxReader::from_bytes(black_box(&bytes))
                .unwrap()
                .read()
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_grid_loading,
    bench_rendering,
    bench_read_back,
);
criterion_main!(benches);
