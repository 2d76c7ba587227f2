// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `knobwork_property`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Once;

use knobwork_property::{ErasedValue, PropertyStore};

/// A store shaped like a scrubber's: the value plus its configuration keys.
fn scrubber_store() -> PropertyStore {
    PropertyStore::new()
        .with("value", 5.0_f64)
        .with("min", 1.0_f64)
        .with("max", 10.0_f64)
        .with("step", 0.5_f64)
        .with("zones", 2_u32)
        .with("spring", 1.5_f64)
}

fn bench_property(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: PropertyStore={} ErasedValue={}",
            size_of::<PropertyStore>(),
            size_of::<ErasedValue>(),
        );
    });

    let mut group = c.benchmark_group("property/get");

    group.bench_function("value", |b| {
        let store = scrubber_store();
        b.iter(|| black_box(store.value::<f64>().copied()))
    });

    group.bench_function("config", |b| {
        let store = scrubber_store();
        b.iter(|| black_box(store.get_or("spring", 1.0_f64)))
    });

    group.bench_function("missing", |b| {
        let store = scrubber_store();
        b.iter(|| black_box(store.get::<f64>("speed")))
    });

    group.bench_function("wrong_type", |b| {
        let store = scrubber_store();
        b.iter(|| black_box(store.get::<u32>("value")))
    });

    group.finish();

    let mut group = c.benchmark_group("property/set");

    group.bench_function("silent", |b| {
        let mut store = scrubber_store();
        b.iter(|| black_box(store.set("step", 0.25_f64, false)))
    });

    for listeners in [0_u32, 1, 8] {
        group.bench_function(BenchmarkId::new("value_notifying", listeners), |b| {
            b.iter_batched(
                || {
                    let mut store = scrubber_store();
                    for _ in 0..listeners {
                        store.subscribe(|change| {
                            black_box(change.value_as::<f64>());
                        });
                    }
                    store
                },
                |mut store| {
                    store.set_value(7.5_f64);
                    black_box(store);
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.bench_function("insert_new_key", |b| {
        b.iter_batched(
            scrubber_store,
            |mut store| {
                store.insert("reading", 21.5_f64);
                black_box(store);
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_property);
criterion_main!(benches);
