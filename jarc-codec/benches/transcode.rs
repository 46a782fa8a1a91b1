use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jarc_codec::{Bump, PaddedInput, Parser};

fn flat_records(count: usize) -> String {
    let mut input = String::new();
    for i in 0..count {
        input.push_str(&format!(
            "{{\"id\":{i},\"user\":\"user{}\",\"timestamp\":{},\"value\":{},\"level\":\"{}\"}}\n",
            i % 100,
            1_600_000_000 + i,
            i * 2,
            match i % 3 {
                0 => "info",
                1 => "warn",
                _ => "error",
            },
        ));
    }
    input
}

fn nested_records(count: usize) -> String {
    let mut input = String::new();
    for i in 0..count {
        input.push_str(&format!(
            "{{\"meta\":{{\"z\":{i},\"a\":[1,2,[3,{{\"deep\":null}}]]}},\"payload\":\"a payload string that spills out of line {i}\"}}\n",
        ));
    }
    input
}

fn bench_transcode(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcode");

    for (shape, input) in [
        ("flat", flat_records(5_000)),
        ("nested", nested_records(5_000)),
    ] {
        let padded = PaddedInput::from(input.as_str());
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(shape), &padded, |b, padded| {
            let mut parser = Parser::new(1 << 20).unwrap();
            let mut output = Vec::with_capacity(input.len() * 2);
            b.iter(|| {
                output.clear();
                parser.transcode(black_box(padded), &mut output).unwrap();
                black_box(output.len());
            });
        });
    }

    group.finish();
}

fn bench_heap_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_parse");

    let input = flat_records(5_000);
    let padded = PaddedInput::from(input.as_str());
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_with_input(BenchmarkId::from_parameter("flat"), &padded, |b, padded| {
        let mut parser = Parser::new(1 << 20).unwrap();
        b.iter(|| {
            let alloc = Bump::new();
            let documents = parser.parse(black_box(padded), 0, &alloc).unwrap();
            black_box(documents.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_transcode, bench_heap_parse);
criterion_main!(benches);
