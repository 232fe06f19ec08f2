use std::{hint::black_box, io::Cursor};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kardia_core::{AtcReader, LeadId};

/// Контейнер с `fmt ` и шестью отведениями по `samples` выборок.
fn build_container(samples: usize) -> Vec<u8> {
    let mut raw = b"ALIVE\0\0\0\0\0\0\0".to_vec();

    raw.extend_from_slice(b"fmt \x04\x00\x00\x00\x00\x2C\x01\x00");
    raw.extend_from_slice(&[0u8; 4]);

    for lead in LeadId::all() {
        let payload: Vec<u8> = (0..samples)
            .flat_map(|i| ((i % 4096) as i16 - 2048).to_le_bytes())
            .collect();
        raw.extend_from_slice(lead.tag().as_bytes());
        raw.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        raw.extend_from_slice(&payload);
        raw.extend_from_slice(&[0u8; 4]);
    }
    raw
}

fn bench_open(c: &mut Criterion) {
    let raw = build_container(30_000);

    c.bench_function("open_and_index", |b| {
        b.iter(|| {
            let reader = AtcReader::new(Cursor::new(black_box(raw.as_slice()))).unwrap();
            black_box(reader.block_index().len())
        })
    });
}

fn bench_read_lead(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_lead");

    for samples in [1_000usize, 30_000, 300_000] {
        let raw = build_container(samples);
        let mut reader = AtcReader::new(Cursor::new(raw)).unwrap();

        group.throughput(Throughput::Elements(samples as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &samples, |b, _| {
            b.iter(|| black_box(reader.read_lead(1).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_open, bench_read_lead);
criterion_main!(benches);
