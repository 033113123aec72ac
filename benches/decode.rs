use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mpalist::convert::{ConversionConfig, ListModeConverter};
use mpalist::decoder::{decode_chunk, explore_chunk, pairs_from_bytes, ChannelOrigin};
use std::fs;
use tempfile::TempDir;

/// Synthetic body: one timer and one sync per group, `events_per_group`
/// events with three ADC values each.
fn generate_body(groups: usize, events_per_group: usize) -> Vec<u8> {
    let mut words: Vec<u16> = Vec::with_capacity(groups * (4 + events_per_group * 6));
    for g in 0..groups {
        words.extend_from_slice(&[0x0000, 0x4000, 0xFFFF, 0xFFFF]);
        for e in 0..events_per_group {
            let v = ((g * 7 + e * 13) % 0x3FFF) as u16;
            words.extend_from_slice(&[0b1011, 0x8000, 0xFFFF, v, v + 1, v / 2]);
        }
    }
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Benchmark the discovery pass scanner
fn bench_explore(c: &mut Criterion) {
    let mut group = c.benchmark_group("explore_chunk");

    for groups in [1_000, 10_000, 100_000] {
        let bytes = generate_body(groups, 4);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(groups), &bytes, |b, bytes| {
            b.iter(|| {
                let pairs = pairs_from_bytes(black_box(bytes));
                explore_chunk(&pairs)
            });
        });
    }

    group.finish();
}

/// Benchmark full sample extraction
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_chunk");

    for groups in [1_000, 10_000, 100_000] {
        let bytes = generate_body(groups, 4);
        let pairs = pairs_from_bytes(&bytes);
        group.throughput(Throughput::Elements((groups * 4) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(groups), &pairs, |b, pairs| {
            b.iter(|| decode_chunk(black_box(pairs), ChannelOrigin::Zero));
        });
    }

    group.finish();
}

/// Benchmark end-to-end conversion including the Parquet write
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    group.sample_size(10);

    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("bench.lst");
    let mut content = b"[MPA3A]\r\nrange=8192\r\n[LISTDATA]\r\n".to_vec();
    content.extend(generate_body(50_000, 4));
    fs::write(&input, &content).unwrap();
    group.throughput(Throughput::Bytes(content.len() as u64));

    for (name, config) in [
        ("balanced", ConversionConfig::balanced()),
        ("fast", ConversionConfig::fast_write()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let output = temp_dir.path().join(format!("{}.parquet", name));
                let _ = fs::remove_file(&output);
                ListModeConverter::with_config(config.clone())
                    .convert(&input, &output)
                    .expect("Conversion failed")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_explore, bench_decode, bench_convert);
criterion_main!(benches);
