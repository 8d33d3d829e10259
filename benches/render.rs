use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qrgen::{ECLevel, OutputKind, QrEncoder, RenderSpec, SymbolRequest};

fn bench_render_kinds(c: &mut Criterion) {
    let Ok(qr) = QrEncoder::encode("https://example.com/render", ECLevel::M, None) else {
        return;
    };
    let mut group = c.benchmark_group("render");
    for kind in OutputKind::ALL {
        let spec = RenderSpec::with_kind(kind);
        group.bench_with_input(BenchmarkId::from_parameter(kind), &spec, |b, spec| {
            b.iter(|| qrgen::render::render(black_box(&qr), spec))
        });
    }
    group.finish();
}

fn bench_batch_archive(c: &mut Criterion) {
    let requests: Vec<SymbolRequest> = (0..32)
        .map(|i| SymbolRequest {
            render: RenderSpec::with_kind(OutputKind::Vector),
            ..SymbolRequest::new(format!("batch item {i}"))
        })
        .collect();
    c.bench_function("batch_32_svg", |b| {
        b.iter(|| qrgen::generate_batch(black_box(&requests)))
    });
}

criterion_group!(benches, bench_render_kinds, bench_batch_archive);
criterion_main!(benches);
