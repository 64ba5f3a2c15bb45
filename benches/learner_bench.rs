//! Benchmarks for self-play training and move selection.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nim_rl::learning::{LearnerConfig, QLearner};
use nim_rl::nim::{GameConfig, NimGame};
use nim_rl::strategy::{OptimalStrategy, Strategy};

fn single_episode_benchmark(c: &mut Criterion) {
    let mut game = NimGame::with_seed(GameConfig::new(3, 5), 42).unwrap();
    let mut learner = QLearner::new(LearnerConfig::default().with_seed(42)).unwrap();

    c.bench_function("nim_single_episode", |b| {
        b.iter(|| black_box(learner.run_episode(&mut game).unwrap()))
    });
}

fn thousand_episodes_benchmark(c: &mut Criterion) {
    c.bench_function("nim_1000_episodes", |b| {
        b.iter(|| {
            let mut game = NimGame::with_seed(GameConfig::new(5, 10), 42).unwrap();
            let mut learner = QLearner::new(LearnerConfig::default().with_seed(42)).unwrap();
            learner.train(black_box(1000), &mut game).unwrap().table_entries
        })
    });
}

fn choose_action_benchmark(c: &mut Criterion) {
    let mut game = NimGame::with_seed(GameConfig::new(5, 10), 7).unwrap();
    let mut learner = QLearner::new(LearnerConfig::default().with_seed(7)).unwrap();
    learner.train(5_000, &mut game).unwrap();
    let state = [3, 7, 2, 9, 5];

    c.bench_function("learner_choose_action", |b| {
        b.iter(|| learner.choose_action(black_box(&state), true).unwrap())
    });

    let mut optimal = OptimalStrategy::new();
    c.bench_function("optimal_choose_action", |b| {
        b.iter(|| optimal.choose_action(black_box(&state)).unwrap())
    });
}

criterion_group!(
    benches,
    single_episode_benchmark,
    thousand_episodes_benchmark,
    choose_action_benchmark
);
criterion_main!(benches);
