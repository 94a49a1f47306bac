use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rb_remap::{BorderMode, Interpolation, remap};
use remap_bench::{BandAccess, remap_in_bands, sine_warp_map, test_pattern_rgb};

fn bench_band_sizes(c: &mut Criterion) {
    let src = test_pattern_rgb(640, 480);
    let map = sine_warp_map(800, 600, 640, 480);
    let src_view = src.as_view();
    let map_view = map.as_view();
    let border = BorderMode::Constant(0.0);

    let mut group = c.benchmark_group("banded_remap_bilinear_800x600");
    group.bench_function("full_frame", |b| {
        b.iter(|| {
            let out = remap(
                black_box(&src_view),
                black_box(&map_view),
                Interpolation::Bilinear,
                border,
            )
            .expect("valid remap");
            black_box(out);
        });
    });

    for band_rows in [16usize, 64, 128] {
        for (name, access) in [
            ("row_range", BandAccess::RowRange),
            ("rect_region", BandAccess::RectRegion),
            ("copy_through", BandAccess::CopyThrough),
        ] {
            group.bench_with_input(
                BenchmarkId::new(name, band_rows),
                &band_rows,
                |b, &band_rows| {
                    b.iter(|| {
                        let out = remap_in_bands(
                            black_box(&src_view),
                            black_box(&map_view),
                            Interpolation::Bilinear,
                            border,
                            band_rows,
                            access,
                        )
                        .expect("valid banded remap");
                        black_box(out);
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_band_sizes);
criterion_main!(benches);
