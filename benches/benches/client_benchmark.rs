//! Signing, planning and parsing benchmarks.
//!
//! Run with: `cargo bench --package awis-bench`

use awis_bench::history_payload;
use awis_lib::prelude::*;
use awis_lib::{parse_traffic_history, signer};
use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn signing_benchmark(c: &mut Criterion) {
    let builder = RequestBuilder::new(
        Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
        ServiceDescriptor::default(),
    );
    let now = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
    let groups = ResponseGroup::all().to_vec();
    let query = CanonicalQuery::url_info("example.com", &groups);

    let mut group = c.benchmark_group("sign");
    group.bench_function("signing_key", |b| {
        b.iter(|| signer::signing_key(black_box("secret"), "20200101", "us-west-1", "awis"));
    });
    group.bench_function("url_info_request", |b| {
        b.iter(|| builder.build(black_box(&query), now));
    });
    group.finish();
}

fn planning_benchmark(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

    let mut group = c.benchmark_group("plan");
    for range in [31_u32, 365, 1460] {
        let query = HistoryQuery::new("example.com")
            .with_range(range)
            .starting(start);
        group.bench_with_input(BenchmarkId::from_parameter(range), &query, |b, query| {
            b.iter(|| query.plan(black_box(today)));
        });
    }
    group.finish();
}

fn parsing_benchmark(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

    let mut group = c.benchmark_group("parse");
    for days in [1_u32, 31] {
        let payload = history_payload(start, days);
        group.throughput(Throughput::Elements(u64::from(days)));
        group.bench_with_input(BenchmarkId::from_parameter(days), &payload, |b, payload| {
            b.iter(|| parse_traffic_history(black_box(payload.as_bytes())));
        });
    }
    group.finish();
}

criterion_group!(benches, signing_benchmark, planning_benchmark, parsing_benchmark);
criterion_main!(benches);
