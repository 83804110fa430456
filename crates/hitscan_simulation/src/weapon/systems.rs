//! Weapon systems (FixedUpdate)
//!
//! Порядок (chain):
//! 1. activate_spawned_guns: Added<Gun> → activate()
//! 2. process_gun_activation: GunActivation → activate/deactivate
//! 3. advance_gun_timers: истёкшие трассы, завершение reload
//! 4. process_reload_intents: ReloadIntent → attempt_reload
//! 5. process_fire_intents: FireIntent → attempt_fire (SphereWorldQuery)
//!
//! Время = `Time<Fixed>` elapsed (монотонные секунды симуляции).

use bevy::prelude::*;

use super::collaborators::{Muzzle, WorldQuery};
use super::cues::CueBuffer;
use super::events::{
    FireIntent, GunActivation, ReloadFinished, ReloadIntent, ReloadRejected, ReloadStarted, ShotFired,
    WeaponCue,
};
use super::gun::Gun;
use crate::combat::HitscanDamage;
use crate::components::{Dead, Health, HitSphere};
use crate::world_query::{SphereCollider, SphereWorldQuery};

/// Отправить накопленные cues visual layer'у
fn flush_cues(shooter: Entity, buffer: &mut CueBuffer, cues: &mut EventWriter<WeaponCue>) {
    for cue in buffer.drain() {
        cues.write(WeaponCue { shooter, cue });
    }
}

/// Выстрел одного Gun через произвольный WorldQuery
///
/// Для своих backend'ов (Godot physics, rapier): собрать WorldQuery и позвать это
/// из своей системы вместо `process_fire_intents`.
pub fn fire_gun<W: WorldQuery>(
    shooter: Entity,
    gun: &mut Gun,
    transform: &Transform,
    now: f64,
    world: &mut W,
    shots: &mut EventWriter<ShotFired>,
    cues: &mut EventWriter<WeaponCue>,
) -> bool {
    let mut buffer = CueBuffer::default();
    let muzzle = Muzzle::from_transform(transform);

    let Some(resolution) = gun.controller.attempt_fire(now, muzzle, world, &mut buffer) else {
        return false;
    };

    crate::log(&format!(
        "🔫 {:?} fired: end={:?} target={:?} ammo={}",
        shooter,
        resolution.end_point,
        resolution.target,
        gun.controller.readout(now)
    ));

    shots.write(ShotFired { shooter, resolution });
    flush_cues(shooter, &mut buffer, cues);
    true
}

/// System: новые Gun → activate (reset ammo/state)
pub fn activate_spawned_guns(mut guns: Query<(Entity, &mut Gun), Added<Gun>>) {
    for (entity, mut gun) in guns.iter_mut() {
        gun.controller.activate();
        crate::log(&format!("Gun {:?} activated ({})", entity, gun.controller.readout(0.0)));
    }
}

/// System: GunActivation events → activate/deactivate
pub fn process_gun_activation(
    mut events: EventReader<GunActivation>,
    mut guns: Query<&mut Gun>,
    mut cues: EventWriter<WeaponCue>,
) {
    for event in events.read() {
        let Ok(mut gun) = guns.get_mut(event.shooter) else {
            crate::log_warning(&format!("GunActivation: {:?} has no Gun", event.shooter));
            continue;
        };

        if event.active {
            gun.controller.activate();
        } else {
            let mut buffer = CueBuffer::default();
            gun.controller.deactivate(&mut buffer);
            flush_cues(event.shooter, &mut buffer, &mut cues);
        }

        crate::log(&format!("Gun {:?} active={}", event.shooter, event.active));
    }
}

/// System: продвинуть таймеры (трассы + reload suspension)
pub fn advance_gun_timers(
    mut guns: Query<(Entity, &mut Gun)>,
    time: Res<Time>,
    mut finished: EventWriter<ReloadFinished>,
    mut cues: EventWriter<WeaponCue>,
) {
    let now = time.elapsed_secs_f64();

    for (entity, mut gun) in guns.iter_mut() {
        let mut buffer = CueBuffer::default();

        if let Some(report) = gun.controller.update(now, &mut buffer) {
            finished.write(ReloadFinished {
                shooter: entity,
                transferred: report.transferred,
            });
            crate::log(&format!(
                "Gun {:?} reloaded +{} ({})",
                entity,
                report.transferred,
                gun.controller.readout(now)
            ));
        }

        flush_cues(entity, &mut buffer, &mut cues);
    }
}

/// System: ReloadIntent → attempt_reload
pub fn process_reload_intents(
    mut intents: EventReader<ReloadIntent>,
    mut guns: Query<&mut Gun>,
    time: Res<Time>,
    mut started: EventWriter<ReloadStarted>,
    mut rejected: EventWriter<ReloadRejected>,
    mut cues: EventWriter<WeaponCue>,
) {
    let now = time.elapsed_secs_f64();

    for intent in intents.read() {
        let Ok(mut gun) = guns.get_mut(intent.shooter) else {
            crate::log_warning(&format!("ReloadIntent: {:?} has no Gun", intent.shooter));
            continue;
        };

        if let Err(reason) = gun.controller.reload_blocker() {
            rejected.write(ReloadRejected {
                shooter: intent.shooter,
                reason,
            });
            crate::log(&format!("Gun {:?} cannot reload: {}", intent.shooter, reason));
            continue;
        }

        let mut buffer = CueBuffer::default();
        if gun.controller.attempt_reload(now, &mut buffer) {
            started.write(ReloadStarted {
                shooter: intent.shooter,
            });
            crate::log(&format!("Gun {:?} reloading...", intent.shooter));
        }
        flush_cues(intent.shooter, &mut buffer, &mut cues);
    }
}

/// System: FireIntent → attempt_fire по HitSphere коллайдерам
pub fn process_fire_intents(
    mut intents: EventReader<FireIntent>,
    mut guns: Query<(&mut Gun, &Transform)>,
    colliders: Query<(Entity, &Transform, &HitSphere, Has<Health>, Has<Dead>)>,
    time: Res<Time>,
    mut shots: EventWriter<ShotFired>,
    mut damage: EventWriter<HitscanDamage>,
    mut cues: EventWriter<WeaponCue>,
) {
    if intents.is_empty() {
        return;
    }

    let now = time.elapsed_secs_f64();
    let snapshot: Vec<SphereCollider> = colliders
        .iter()
        .map(|(entity, transform, sphere, has_health, dead)| SphereCollider {
            entity,
            center: transform.translation,
            radius: sphere.radius,
            damageable: has_health && !dead,
        })
        .collect();
    let mut world = SphereWorldQuery::new(snapshot);

    for intent in intents.read() {
        let Ok((mut gun, transform)) = guns.get_mut(intent.shooter) else {
            crate::log_warning(&format!("FireIntent: {:?} has no Gun", intent.shooter));
            continue;
        };

        world.set_shooter(intent.shooter);
        fire_gun(intent.shooter, &mut gun, transform, now, &mut world, &mut shots, &mut cues);

        for hit in world.take_damage() {
            damage.write(hit);
        }
    }
}
