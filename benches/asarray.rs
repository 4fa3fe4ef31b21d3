//! Conversion throughput for nested lists and existing arrays.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use safe_asarray::{asarray, Array, Config, DType, Order, Value};

fn matrix(rows: usize, cols: usize) -> Value {
    Value::from(
        (0..rows)
            .map(|r| (0..cols).map(|c| (r * cols + c) as f64).collect::<Vec<_>>())
            .collect::<Vec<_>>(),
    )
}

fn bench_lists(c: &mut Criterion) {
    let config = Config::default();
    let value = matrix(64, 64);

    let mut group = c.benchmark_group("list_64x64");
    group.bench_function("int32", |b| {
        b.iter(|| asarray(black_box(&value), DType::Int32, None, &config))
    });
    group.bench_function("float32_fortran", |b| {
        b.iter(|| asarray(black_box(&value), DType::Float32, Some(Order::F), &config))
    });
    group.finish();
}

fn bench_arrays(c: &mut Criterion) {
    let config = Config::default();
    let data: Vec<i64> = (0..4096).collect();
    let value = Value::from(Array::from_shape_vec(vec![64, 64], Order::C, data).unwrap());

    let mut group = c.benchmark_group("array_64x64");
    group.bench_function("same_dtype", |b| {
        b.iter(|| asarray(black_box(&value), DType::Int64, None, &config))
    });
    group.bench_function("to_float64", |b| {
        b.iter(|| asarray(black_box(&value), DType::Float64, None, &config))
    });
    group.finish();
}

criterion_group!(benches, bench_lists, bench_arrays);
criterion_main!(benches);
