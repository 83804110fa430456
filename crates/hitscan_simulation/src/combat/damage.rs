//! Damage application для hit-scan попаданий
//!
//! Flow:
//! 1. WorldQuery receiver → HitscanDamage event (weapon systems)
//! 2. apply_hitscan_damage → Health, DamageDealt / EntityDied
//! 3. mark_dead → маркер Dead

use bevy::prelude::*;
use crate::components::{Dead, Health};

/// Событие: hit-scan луч попал в damage receiver
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HitscanDamage {
    pub shooter: Entity,
    pub target: Entity,
    pub amount: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health <= 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Целочисленный урон по Health из f32 урона оружия
pub fn calculate_damage(amount: f32) -> u32 {
    if amount.is_nan() || amount <= 0.0 {
        return 0;
    }
    amount.round().min(u32::MAX as f32) as u32
}

/// Система: HitscanDamage → Health
pub fn apply_hitscan_damage(
    mut hits: EventReader<HitscanDamage>,
    mut targets: Query<&mut Health, Without<Dead>>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
) {
    for hit in hits.read() {
        if hit.shooter == hit.target {
            crate::log_warning(&format!("Hitscan self-hit ignored: {:?}", hit.shooter));
            continue;
        }

        let Ok(mut health) = targets.get_mut(hit.target) else {
            // Цель уже мертва или без Health
            continue;
        };

        // Убита раньше в этом же тике (Dead вставится только в mark_dead)
        if !health.is_alive() {
            continue;
        }

        let damage = calculate_damage(hit.amount);
        health.take_damage(damage);
        let died = !health.is_alive();

        damage_dealt_events.write(DamageDealt {
            attacker: hit.shooter,
            target: hit.target,
            damage,
            target_died: died,
        });

        crate::log(&format!(
            "💥 Hitscan {:?} → {:?} for {} damage (HP: {}/{})",
            hit.shooter, hit.target, damage, health.current, health.max
        ));

        if died {
            entity_died_events.write(EntityDied {
                entity: hit.target,
                killer: Some(hit.shooter),
            });
        }
    }
}

/// Система: EntityDied → маркер Dead
pub fn mark_dead(mut commands: Commands, mut death_events: EventReader<EntityDied>) {
    for event in death_events.read() {
        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
            crate::log_info(&format!("Entity {:?} killed by {:?}", event.entity, event.killer));
        }
    }
}
