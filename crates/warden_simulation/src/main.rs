//! Headless симуляция guard'а
//!
//! Один guard патрулирует, на 2-й секунде слышит knock, позже мимо проходит intruder.
//! Rapier сцены нет: vision считается на открытом поле (луч всегда доходит до цели).

use bevy::prelude::*;
use warden_simulation::ai::systems::tick_guards;
use warden_simulation::{
    create_headless_app, spawn_guard, GuardSpawn, GuardStateChanged, GuardTarget, GuardVision,
    HeadlessNavigationPlugin, NoiseEvent, PerceptionSensor, PerceptionTag, Pose, RayHit,
    SimulationPlugin,
};

/// Intruder идёт по прямой вдоль X
#[derive(Component)]
struct Intruder {
    velocity: Vec3,
}

fn move_intruders(mut intruders: Query<(&mut Transform, &Intruder)>, time: Res<Time<Fixed>>) {
    for (mut transform, intruder) in intruders.iter_mut() {
        transform.translation += intruder.velocity * time.delta_secs();
    }
}

/// Vision без физики: препятствий нет, луч упирается в саму цель
fn open_field_vision(
    mut guards: Query<(&Transform, &PerceptionSensor, &GuardTarget, &mut GuardVision)>,
    targets: Query<(&Transform, &PerceptionTag)>,
) {
    for (transform, sensor, target, mut vision) in guards.iter_mut() {
        let target = target.0.and_then(|entity| targets.get(entity).ok());
        let target_pose = target.map(|(transform, _)| Pose::from(transform));

        let world = |_origin: Vec3, direction: Vec3| {
            target.map(|(_, tag)| RayHit::tagged(direction.length(), tag.as_str()))
        };

        let visible = sensor.can_see(&Pose::from(transform), target_pose.as_ref(), &world);
        vision.sighting = target_pose.filter(|_| visible).map(|pose| pose.position);
    }
}

fn main() {
    let seed = 42;
    println!("Starting warden headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, HeadlessNavigationPlugin));
    app.add_systems(
        FixedUpdate,
        (move_intruders, open_field_vision).chain().before(tick_guards),
    );

    let intruder = app
        .world_mut()
        .spawn((
            Transform::from_xyz(-40.0, 0.0, -15.0),
            PerceptionTag::player(),
            Intruder {
                velocity: Vec3::new(2.0, 0.0, 0.0),
            },
        ))
        .id();

    let guard = match spawn_guard(
        app.world_mut(),
        GuardSpawn::new(Vec3::ZERO, Vec3::NEG_Z).with_target(intruder),
    ) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("Guard config rejected: {}", error);
            return;
        }
    };

    // Первый update — нулевой delta
    app.update();

    let mut changes = app
        .world()
        .resource::<Events<GuardStateChanged>>()
        .get_cursor();

    // 60 Hz: 1800 тиков = 30 секунд
    for tick in 1..=1800 {
        if tick == 120 {
            println!("Tick {}: knock at (6, 0, 6)", tick);
            app.world_mut()
                .send_event(NoiseEvent::knock(Vec3::new(6.0, 0.0, 6.0)));
        }

        app.update();

        let events = app.world().resource::<Events<GuardStateChanged>>();
        for change in changes.read(events) {
            if change.guard == guard {
                println!("Tick {}: guard {} → {}", tick, change.from, change.to);
            }
        }

        if tick % 300 == 0 {
            if let Some(transform) = app.world().get::<Transform>(guard) {
                println!("Tick {}: guard at {:?}", tick, transform.translation);
            }
        }
    }

    println!("Simulation complete!");
}
