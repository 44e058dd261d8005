//! Тесты детерминизма guard симуляции
//!
//! Одинаковый seed → одинаковые patrol маршруты, позиции и FSM состояния

use bevy::prelude::*;
use warden_simulation::{
    create_headless_app, spawn_guard, world_snapshot, GuardBrain, GuardConfig, GuardSpawn,
    HeadlessNavigationPlugin, NoiseEvent, SimulationPlugin,
};

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const GUARD_COUNT: usize = 8;
    const TICK_COUNT: usize = 600;

    let snapshot1 = run_simulation(SEED, GUARD_COUNT, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, GUARD_COUNT, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const GUARD_COUNT: usize = 4;
    const TICK_COUNT: usize = 300;

    let snapshots: Vec<_> = (0..3)
        .map(|_| run_simulation(SEED, GUARD_COUNT, TICK_COUNT))
        .collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    let snapshot1 = run_simulation(1, 4, 300);
    let snapshot2 = run_simulation(2, 4, 300);

    // Patrol точки зависят от seed
    assert_ne!(snapshot1, snapshot2);
}

/// Запускает симуляцию и возвращает snapshot (FSM + Transform)
fn run_simulation(seed: u64, guard_count: usize, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, HeadlessNavigationPlugin));

    // Короткое ожидание, чтобы patrol точки выбирались часто
    let config = GuardConfig {
        patrol_wait_seconds: 1.0,
        ..GuardConfig::default()
    };

    for i in 0..guard_count {
        let position = Vec3::new(i as f32 * 4.0, 0.0, 0.0);
        spawn_guard(
            app.world_mut(),
            GuardSpawn::new(position, Vec3::NEG_Z).with_config(config.clone()),
        )
        .expect("valid guard config");
    }

    app.update();

    for tick in 0..tick_count {
        if tick == tick_count / 2 {
            app.world_mut()
                .send_event(NoiseEvent::knock(Vec3::new(6.0, 0.0, 6.0)));
        }
        app.update();
    }

    let world = app.world_mut();
    let mut snapshot = world_snapshot::<GuardBrain>(world);
    snapshot.extend(world_snapshot::<Transform>(world));
    snapshot
}
