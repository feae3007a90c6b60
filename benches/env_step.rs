//! Benchmarks for environment throughput.
//!
//! Run with: `cargo bench --bench env_step`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_dominion::core::EnvConfig;
use rust_dominion::env::DominionEnv;
use rust_dominion::eval::run_episode;
use rust_dominion::policy::BigMoney;

/// Single `step` calls, taking the highest legal slot.
fn benchmark_step(c: &mut Criterion) {
    let mut env = DominionEnv::new(EnvConfig::default()).unwrap();
    env.reset(Some(0)).unwrap();
    let mut seed = 0;

    c.bench_function("step", |b| {
        b.iter(|| {
            let mask = env.action_mask();
            let index = mask.iter().rposition(|&m| m == 1).unwrap_or(0);
            let result = env.step(black_box(index)).unwrap();
            if result.done() {
                seed += 1;
                env.reset(Some(seed)).unwrap();
            }
            black_box(result.reward)
        });
    });
}

/// Whole big-money episodes at several table sizes.
fn benchmark_episode(c: &mut Criterion) {
    let mut group = c.benchmark_group("Episode");

    for players in [2, 4] {
        let config = EnvConfig::default().with_player_count(players);
        let mut env = DominionEnv::new(config).unwrap();
        let mut policy = BigMoney::new();
        group.bench_with_input(BenchmarkId::new("big_money/players", players), &players, |b, _| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(run_episode(&mut env, &mut policy, seed).unwrap())
            });
        });
    }
    group.finish();
}

/// Cloning a mid-game environment.
fn benchmark_clone(c: &mut Criterion) {
    let mut env = DominionEnv::new(EnvConfig::default()).unwrap();
    env.reset(Some(3)).unwrap();
    for _ in 0..40 {
        if env.step(0).unwrap().done() {
            break;
        }
    }
    c.bench_function("clone_mid_game", |b| b.iter(|| black_box(env.clone())));
}

criterion_group!(benches, benchmark_step, benchmark_episode, benchmark_clone);
criterion_main!(benches);
