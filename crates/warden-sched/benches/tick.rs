use criterion::{black_box, criterion_group, criterion_main, Criterion};
use warden_core::{GamePhase, StateStore, TickContext};
use warden_sched::{FnTask, PhaseSet, TaskConfig, TaskPriority, TaskScheduler};

const PRIORITIES: [TaskPriority; 5] = [
    TaskPriority::Critical,
    TaskPriority::High,
    TaskPriority::Medium,
    TaskPriority::Low,
    TaskPriority::Minimal,
];

fn bench_scheduler_tick(c: &mut Criterion) {
    let mut sched = TaskScheduler::new();
    for i in 0..48u64 {
        let config = TaskConfig::new(format!("module_{i}"))
            .priority(PRIORITIES[(i % 5) as usize])
            .min_interval(1 + i % 4)
            .phases(if i % 3 == 0 {
                PhaseSet::from_phase(GamePhase::Mid)
            } else {
                PhaseSet::ALL
            })
            .predicate(move |s: &StateStore| Ok(s.resources().minerals as u64 >= i * 10));
        sched
            .register(
                config,
                Box::new(FnTask::new(|_: &TickContext, s: &mut StateStore| {
                    black_box(s.resources().supply_left());
                    Ok(())
                })),
            )
            .unwrap();
    }

    let mut store = StateStore::new();
    store.update_time(400.0);
    store.update_resources(250, 100, 40, 60);

    let mut tick: u64 = 0;
    c.bench_function("warden-sched/run_tick(tasks=48)", |b| {
        b.iter(|| {
            let ctx = TickContext::new(tick, store.time());
            let report = sched.run_tick(&ctx, &mut store);
            black_box(report.active);
            tick = tick.wrapping_add(1);
        })
    });
}

criterion_group!(benches, bench_scheduler_tick);
criterion_main!(benches);
