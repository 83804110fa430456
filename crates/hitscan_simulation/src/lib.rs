//! HITSCAN Simulation Core
//!
//! ECS-симуляция hit-scan оружия на Bevy 0.16
//!
//! HYBRID ARCHITECTURE:
//! - ECS = game state (ammo, fire gate, reload, damage)
//! - Хост (Godot / renderer) = визуал, звук, физика через `WorldQuery`
//!
//! Хост общается с симуляцией только events'ами:
//! FireIntent / ReloadIntent / GunActivation → ShotFired / Reload* / WeaponCue / DamageDealt

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

// Публичные модули
pub mod combat;
pub mod components;
pub mod logger;
pub mod weapon;
pub mod world_query;

// Re-export базовых типов для удобства
pub use combat::{calculate_damage, CombatPlugin, CombatSet, DamageDealt, EntityDied, HitscanDamage};
pub use components::*;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, ConsoleLogger, LogLevel, LogPrinter,
};
pub use weapon::{
    fire_gun, AmmoReadout, FireIntent, Gun, GunActivation, ReloadBlocked, ReloadFinished, ReloadIntent,
    ReloadRejected, ReloadStarted, ShotFired, ShotResolution, WeaponConfig, WeaponController, WeaponCue,
    WeaponPlugin, WeaponSet, WeaponState,
};
pub use world_query::{SphereCollider, SphereWorldQuery};

/// Частота simulation tick (FixedUpdate)
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            // CombatPlugin добавляется WeaponPlugin'ом если его нет
            .add_plugins((CombatPlugin, WeaponPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт ровно на один fixed tick за `app.update()` (детерминизм).
/// Первый update: warm-up (delta = 0), FixedUpdate в нём не запускается.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
