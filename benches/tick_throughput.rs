use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridsnake_engine::board::dimensions::Fixed;
use gridsnake_engine::engine::Engine15x15;
use gridsnake_engine::snapshot_fixture;
use gridsnake_engine::types::{Direction, TickInstruments};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
struct Instruments {}

impl TickInstruments for Instruments {
    fn observe_tick(&self, _: std::time::Duration) {}
}

fn steer_and_tick(game: &mut Engine15x15, rng: &mut SmallRng, instruments: &Instruments) {
    game.request_direction(Direction::from_index(rng.gen_range(0..4)));
    black_box(game.tick(rng, instruments));
}

fn bench_tick_from_start(c: &mut Criterion) {
    let instruments = Instruments {};
    c.bench_function("tick from start of game", |b| {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut game = Engine15x15::new(Fixed);
        b.iter(|| steer_and_tick(&mut game, &mut rng, &instruments))
    });
}

fn bench_tick_mid_game(c: &mut Criterion) {
    let snapshot = snapshot_fixture(include_str!("../fixtures/mid_game_15x15.json"));
    let instruments = Instruments {};
    c.bench_function("tick mid game", |b| {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut game = Engine15x15::from_snapshot(&snapshot).expect("the fixture is valid");
        b.iter(|| steer_and_tick(&mut game, &mut rng, &instruments))
    });
}

fn bench_snapshot_mid_game(c: &mut Criterion) {
    let snapshot = snapshot_fixture(include_str!("../fixtures/mid_game_15x15.json"));
    let game = Engine15x15::from_snapshot(&snapshot).expect("the fixture is valid");
    c.bench_function("snapshot mid game", |b| b.iter(|| black_box(game.snapshot())));
}

criterion_group!(
    benches,
    bench_tick_from_start,
    bench_tick_mid_game,
    bench_snapshot_mid_game
);
criterion_main!(benches);
