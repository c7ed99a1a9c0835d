#![allow(unused_crate_dependencies)]
use std::collections::HashMap;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

fn create_pairs(count: usize) -> Vec<(String, Option<String>)> {
    (0..count)
        .map(|i| {
            let key = format!("key \"{i}\"");
            let value = (i % 5 != 0).then(|| format!("value\\{i} with some padding text"));
            (key, value)
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    fn bench(c: &mut Criterion, name: &str, pairs: &[(String, Option<String>)]) {
        c.bench_function(name, |b| {
            b.iter(|| serde_hstore::encode(black_box(pairs).iter().map(|(k, v)| (k, v.as_ref()))))
        });
    }

    bench(c, "encode_small", &create_pairs(8));
    bench(c, "encode_large", &create_pairs(5000));
}

fn bench_decode(c: &mut Criterion) {
    fn bench(c: &mut Criterion, name: &str, pairs: &[(String, Option<String>)]) {
        let text = serde_hstore::encode(pairs.iter().map(|(k, v)| (k, v.as_ref())));

        c.bench_function(name, |b| {
            b.iter(|| {
                serde_hstore::decode_lazy(black_box(&text))
                    .map(|pair| pair.expect("text is valid"))
                    .count()
            })
        });
    }

    bench(c, "decode_lazy_small", &create_pairs(8));
    bench(c, "decode_lazy_large", &create_pairs(5000));
}

fn bench_serde(c: &mut Criterion) {
    let pairs = create_pairs(500);
    let map: HashMap<String, Option<String>> = pairs.iter().cloned().collect();
    let text = serde_hstore::to_string(&pairs).expect("text pairs");

    c.bench_function("to_string_map", |b| {
        b.iter(|| serde_hstore::to_string(black_box(&map)).expect("text pairs"))
    });

    c.bench_function("from_str_map", |b| {
        b.iter(|| {
            serde_hstore::from_str::<HashMap<String, Option<String>>>(black_box(&text))
                .expect("text is valid")
        })
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_serde);
criterion_main!(benches);
