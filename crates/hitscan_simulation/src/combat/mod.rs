//! Combat module: применение hit-scan урона
//!
//! ECS ответственность:
//! - Game state: Health, Dead
//! - Events: HitscanDamage (weapon → combat), DamageDealt, EntityDied
//!
//! Visual layer читает DamageDealt / EntityDied для эффектов.

use bevy::prelude::*;

pub mod damage;

pub use damage::{apply_hitscan_damage, calculate_damage, mark_dead, DamageDealt, EntityDied, HitscanDamage};

/// Системы combat, запускаются после weapon systems
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CombatSet;

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. apply_hitscan_damage: HitscanDamage → Health
/// 2. mark_dead: EntityDied → Dead
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HitscanDamage>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (apply_hitscan_damage, mark_dead).chain().in_set(CombatSet),
        );
    }
}
