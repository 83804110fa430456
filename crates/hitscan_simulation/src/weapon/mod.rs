//! Weapon module: hit-scan оружие
//!
//! Архитектура:
//! - config/state: WeaponConfig (ассет) + WeaponRuntime (ammo, state, last fire)
//! - controller: WeaponController (fire gate, discharge, timed reload)
//! - effects: ShotEffects (muzzle flash, трассы с таймаутом)
//! - collaborators: WorldQuery / DamageReceiver / Presentation seams
//! - gun/events/systems: ECS integration (FixedUpdate)

use bevy::prelude::*;

pub mod collaborators;
pub mod config;
pub mod controller;
pub mod cues;
pub mod effects;
pub mod events;
pub mod gun;
pub mod state;
pub mod systems;
pub mod timeline;

#[cfg(test)]
mod test_support;

pub use collaborators::{DamageReceiver, Muzzle, Presentation, RayHit, SilentPresentation, TraceId, WorldQuery};
pub use config::{AudioClip, ConfigError, EffectHandle, WeaponConfig};
pub use controller::{ReloadCompleted, ShotResolution, WeaponController};
pub use cues::{Cue, CueBuffer};
pub use effects::{ShotEffects, TRAJECTORY_DISPLAY_SECS};
pub use events::{
    FireIntent, GunActivation, ReloadFinished, ReloadIntent, ReloadRejected, ReloadStarted, ShotFired, WeaponCue,
};
pub use gun::Gun;
pub use state::{AmmoReadout, ReloadBlocked, WeaponRuntime, WeaponState};
pub use systems::{
    activate_spawned_guns, advance_gun_timers, fire_gun, process_fire_intents, process_gun_activation,
    process_reload_intents,
};
pub use timeline::Timeline;

use crate::combat::{CombatPlugin, CombatSet};

/// Weapon systems, до CombatSet (HitscanDamage обрабатывается в том же тике)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeaponSet;

/// Weapon Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. activate_spawned_guns
/// 2. process_gun_activation
/// 3. advance_gun_timers
/// 4. process_reload_intents
/// 5. process_fire_intents
pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        // HitscanDamage events регистрирует CombatPlugin
        if !app.is_plugin_added::<CombatPlugin>() {
            app.add_plugins(CombatPlugin);
        }

        app.register_type::<WeaponState>()
            .register_type::<TraceId>()
            .add_event::<FireIntent>()
            .add_event::<ReloadIntent>()
            .add_event::<GunActivation>()
            .add_event::<ShotFired>()
            .add_event::<ReloadStarted>()
            .add_event::<ReloadRejected>()
            .add_event::<ReloadFinished>()
            .add_event::<WeaponCue>();

        app.add_systems(
            FixedUpdate,
            (
                activate_spawned_guns,
                process_gun_activation,
                advance_gun_timers,
                process_reload_intents,
                process_fire_intents,
            )
                .chain()
                .in_set(WeaponSet)
                .before(CombatSet),
        );
    }
}
