//! Benchmark for volume request building
//!
//! The request is built once per run, but large drive lists should stay cheap.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use qc_raid::volume::parse_drives;
use qc_raid::{Credentials, VolumeParams, VolumeRequest};

fn bench_build_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("volume_request");
    group.throughput(Throughput::Elements(1));

    let params = VolumeParams::new(0, "RAID5", "0,1,2,3,4,5,6,7", 1);
    let credentials = Credentials::default();

    group.bench_function("build", |b| {
        b.iter(|| VolumeRequest::build(black_box(&params), black_box(&credentials)))
    });

    group.finish();
}

fn bench_parse_drives(c: &mut Criterion) {
    let mut group = c.benchmark_group("volume_request");

    let drives = (0..240).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
    group.throughput(Throughput::Elements(240));

    group.bench_function("parse_drives_240", |b| {
        b.iter(|| parse_drives(black_box(&drives)))
    });

    group.finish();
}

criterion_group!(benches, bench_build_request, bench_parse_drives);
criterion_main!(benches);
