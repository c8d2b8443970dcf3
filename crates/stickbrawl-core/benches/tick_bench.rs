use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stickbrawl_core::input::ScriptedInput;
use stickbrawl_core::{InputSnapshot, MatchConfig, Simulation};

fn brawl() -> ScriptedInput {
    ScriptedInput::new()
        .at(0, &["d", "arrowleft"])
        .at(40, &["d", "arrowleft", "f"])
        .at(90, &["f", "/", "arrowdown"])
        .at(130, &["w", "f", "arrowup", "/"])
        .at(170, &["a", "arrowright", "s"])
}

fn bench_idle_tick(c: &mut Criterion) {
    let mut sim = Simulation::default();
    let keys = InputSnapshot::new();

    c.bench_function("idle_tick", |b| {
        b.iter(|| black_box(sim.step(black_box(&keys))))
    });
}

fn bench_brawl(c: &mut Criterion) {
    // 300 ticks is five seconds of play with hits, combos and sparks
    c.bench_function("brawl_300_ticks", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(MatchConfig::with_seed(42)).unwrap();
            black_box(sim.run(&mut brawl(), 300))
        })
    });
}

fn bench_snapshot_json(c: &mut Criterion) {
    let mut sim = Simulation::new(MatchConfig::with_seed(42)).unwrap();
    sim.run(&mut brawl(), 120);

    c.bench_function("snapshot_json", |b| {
        b.iter(|| black_box(sim.view().to_json()))
    });
}

criterion_group!(benches, bench_idle_tick, bench_brawl, bench_snapshot_json);
criterion_main!(benches);
