use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dispview::core::{share, Grid, ViewBuilder};

fn bench_get_set(c: &mut Criterion) {
    let store = share(Grid::new([64, 64], 0u32));
    let mut view = ViewBuilder::<u32, 2>::new(&[32, 32])
        .start(&[16, 16])
        .alias(store)
        .build()
        .unwrap();

    c.bench_function("aliased_set_get_32x32", |b| {
        b.iter(|| {
            for local in view.indices() {
                let _ = view.set(local, black_box(1));
            }
            let _ = view.get(black_box([31, 31]));
        })
    });
}

fn bench_row_major(c: &mut Criterion) {
    let view = ViewBuilder::<u32, 3>::new(&[16, 16, 16]).build().unwrap();

    c.bench_function("row_major_get_4096", |b| {
        b.iter(|| {
            for i in 0..view.len() {
                let _ = black_box(view.row_major_get(i));
            }
        })
    });
}

fn bench_resize_in_capacity(c: &mut Criterion) {
    let mut view = ViewBuilder::<u32, 2>::new(&[128, 128])
        .fill_pointer(&[8, 8])
        .build()
        .unwrap();

    c.bench_function("private_resize_within_capacity", |b| {
        b.iter(|| {
            let _ = view.resize(black_box(&[64, 64]), None);
            let _ = view.resize(black_box(&[8, 8]), None);
        })
    });
}

fn bench_grow(c: &mut Criterion) {
    c.bench_function("private_grow_16_to_64", |b| {
        b.iter(|| {
            let mut view = ViewBuilder::<u32, 2>::new(&[16, 16]).build().unwrap();
            let _ = view.resize(black_box(&[64, 64]), None);
        })
    });
}

criterion_group!(
    benches,
    bench_get_set,
    bench_row_major,
    bench_resize_in_capacity,
    bench_grow
);
criterion_main!(benches);
