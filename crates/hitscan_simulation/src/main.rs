//! Headless симуляция HITSCAN
//!
//! Firing range: стрелок с винтовкой держит спуск, перезаряжается когда пусто,
//! переводит прицел на следующую живую мишень.

use bevy::prelude::*;
use hitscan_simulation::{
    create_headless_app, log_error, log_info, set_log_level, Dead, FireIntent, Gun, Health, HitSphere, LogLevel,
    ReloadIntent, WeaponConfig, WeaponState,
};

const TICK_COUNT: usize = 1200;

fn main() {
    let mut app = create_headless_app();
    // Каждый выстрел пишется на Debug, для демо достаточно Info
    set_log_level(LogLevel::Info);
    log_info("Starting HITSCAN headless firing range");

    let config = WeaponConfig::rifle();
    if let Err(err) = config.validate() {
        log_error(&format!("Invalid weapon config: {}", err));
        return;
    }

    let shooter = app.world_mut().spawn((Gun::new(config), Transform::default())).id();

    let targets: Vec<Entity> = [Vec3::new(0.0, 0.0, -10.0), Vec3::new(4.0, 0.0, -20.0), Vec3::new(-6.0, 1.0, -35.0)]
        .into_iter()
        .map(|position| {
            app.world_mut()
                .spawn((Health::new(100), HitSphere::new(0.6), Transform::from_translation(position)))
                .id()
        })
        .collect();

    // Warm-up: delta = 0, Gun активируется на первом fixed tick
    app.update();

    for tick in 0..TICK_COUNT {
        let next_target = targets
            .iter()
            .copied()
            .find(|target| app.world().get::<Dead>(*target).is_none());

        let Some(target) = next_target else {
            log_info(&format!("Tick {}: all targets down", tick));
            break;
        };

        let aim = app.world().get::<Transform>(target).map(|transform| transform.translation);
        if let (Some(aim), Some(mut transform)) = (aim, app.world_mut().get_mut::<Transform>(shooter)) {
            transform.look_at(aim, Vec3::Y);
        }

        let Some((state, total)) = app
            .world()
            .get::<Gun>(shooter)
            .map(|gun| (gun.controller.state(), gun.controller.total_ammo()))
        else {
            log_error("Shooter lost its Gun");
            break;
        };

        if total == 0 {
            log_info(&format!("Tick {}: out of ammo", tick));
            break;
        }

        match state {
            WeaponState::Empty => {
                app.world_mut().send_event(ReloadIntent { shooter });
            }
            WeaponState::Ready => {
                app.world_mut().send_event(FireIntent { shooter });
            }
            WeaponState::Reloading => {}
        }

        app.update();

        if tick % 60 == 0 {
            if let Some(gun) = app.world().get::<Gun>(shooter) {
                let now = app.world().resource::<Time<Fixed>>().elapsed_secs_f64();
                log_info(&format!("Tick {}: {:?} ammo {}", tick, gun.controller.state(), gun.controller.readout(now)));
            }
        }
    }

    for target in targets {
        if let Some(health) = app.world().get::<Health>(target) {
            log_info(&format!("Target {:?}: {}/{} HP", target, health.current, health.max));
        }
    }

    log_info("Simulation complete!");
}
