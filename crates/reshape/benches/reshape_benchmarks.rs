//! Benchmarks for scr-reshape operations.
#![allow(missing_docs)]

use chrono::{Months, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use polars::prelude::*;
use rand::Rng;
use scr_period::{ResampleConfig, resample};
use scr_primitives::{ACTIVE_PORTFOLIO, DELINQUENT_PORTFOLIO, Granularity, TableId};
use scr_reshape::{ReshapeCache, ReshapeConfig, SegmentLabels, reshape};

const STATES: [&str; 28] = [
    "AC", "AL", "AM", "AP", "BA", "CE", "DF", "ES", "GO", "MA", "MG", "MS", "MT", "PA", "PB", "PE",
    "PI", "PR", "RJ", "RN", "RO", "RR", "RS", "SC", "SE", "SP", "TO", "BR",
];

const MODALITIES: [&str; 7] = [
    "PF - Cartão de crédito",
    "PF - Empréstimo com consignação em folha",
    "PF - Empréstimo sem consignação em folha",
    "PF - Habitacional",
    "PF - Outros créditos",
    "PF - Rural e agroindustrial",
    "PF - Veículos",
];

/// Synthetic tidy table with every state and modality over `months` months.
fn random_table(months: u32) -> DataFrame {
    let mut rng = rand::thread_rng();
    let first = NaiveDate::from_ymd_opt(2012, 6, 1).unwrap();
    let rows = months as usize * STATES.len() * MODALITIES.len();

    let mut periods = Vec::with_capacity(rows);
    let mut states = Vec::with_capacity(rows);
    let mut modalities = Vec::with_capacity(rows);
    let mut active = Vec::with_capacity(rows);
    let mut delinquent = Vec::with_capacity(rows);

    for m in 0..months {
        for uf in STATES {
            for modality in MODALITIES {
                let balance = rng.r#gen::<f64>() * 1e11 + 1e8;
                periods.push(first + Months::new(m));
                states.push(uf);
                modalities.push(modality);
                active.push(balance);
                delinquent.push(balance * rng.gen_range(0.01..0.08));
            }
        }
    }

    DataFrame::new(vec![
        Column::new("ano_mes".into(), periods),
        Column::new("uf".into(), states),
        Column::new("modalidade".into(), modalities),
        Column::new(ACTIVE_PORTFOLIO.into(), active),
        Column::new(DELINQUENT_PORTFOLIO.into(), delinquent),
    ])
    .unwrap()
}

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample_quarterly");
    let config = ResampleConfig { granularity: Granularity::Quarterly, drop_incomplete_quarters: true };

    for months in [12, 60, 150] {
        let df = random_table(months);
        group.throughput(Throughput::Elements(df.height() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(months), &df, |b, df| {
            b.iter(|| {
                resample(
                    black_box(df),
                    "ano_mes",
                    &["uf", "modalidade"],
                    &[ACTIVE_PORTFOLIO, DELINQUENT_PORTFOLIO],
                    &config,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_reshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("reshape");
    group.sample_size(30);

    let df = random_table(150);
    group.throughput(Throughput::Elements(df.height() as u64));

    let scenarios = [
        ("monthly_top5", Granularity::Monthly, Some(5)),
        ("quarterly_top5", Granularity::Quarterly, Some(5)),
        ("quarterly_top15", Granularity::Quarterly, Some(15)),
        ("quarterly_all", Granularity::Quarterly, None),
    ];

    for (name, granularity, top_n_states) in scenarios {
        let config = ReshapeConfig {
            top_n_states,
            drop_nationwide: true,
            resample: ResampleConfig { granularity, drop_incomplete_quarters: true },
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("scenario", name), &config, |b, config| {
            b.iter(|| reshape(black_box(&df), black_box(config)).unwrap());
        });
    }

    let relabeled = ReshapeConfig { segment_labels: Some(SegmentLabels::acronyms()), ..Default::default() };
    group.bench_function("relabeled", |b| {
        b.iter(|| reshape(black_box(&df), black_box(&relabeled)).unwrap());
    });

    group.finish();
}

fn bench_cached_reshape(c: &mut Criterion) {
    let df = random_table(150);
    let config = ReshapeConfig::default();
    let mut cache = ReshapeCache::new();
    cache.get_or_reshape(TableId::new(0), &df, &config).unwrap();

    c.bench_function("reshape_cache_hit", |b| {
        b.iter(|| cache.get_or_reshape(TableId::new(0), black_box(&df), black_box(&config)).unwrap());
    });
}

criterion_group!(benches, bench_resample, bench_reshape, bench_cached_reshape);

criterion_main!(benches);
