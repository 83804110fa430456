//! Weapon runtime state: state machine + ammo ledger
//!
//! Инварианты:
//! - 0 ≤ magazine_ammo ≤ magazine_capacity
//! - state == Empty ⇔ magazine_ammo == 0 и нет перезарядки
//! - reserve + magazine только уменьшается при выстреле, reload лишь перераспределяет

use bevy::prelude::*;
use std::fmt;

use super::config::WeaponConfig;

/// Состояние оружия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WeaponState {
    /// Можно стрелять (если прошёл fire interval)
    #[default]
    Ready,
    /// Магазин пуст: нужна перезарядка
    Empty,
    /// Идёт перезарядка (timed sequence в полёте)
    Reloading,
}

/// Mutable runtime данные оружия
///
/// Принадлежит только `WeaponController`, наружу: read-only accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponRuntime {
    pub(crate) reserve_ammo: u32,
    pub(crate) magazine_ammo: u32,
    pub(crate) state: WeaponState,
    /// Секунды монотонных часов последнего выстрела
    pub(crate) last_fire_time: f64,
}

impl WeaponRuntime {
    /// Свежее состояние при активации оружия
    pub fn fresh(config: &WeaponConfig) -> Self {
        Self {
            reserve_ammo: config.starting_reserve,
            magazine_ammo: config.magazine_capacity,
            state: WeaponState::Ready,
            last_fire_time: 0.0,
        }
    }

    /// Fire-rate + state gate
    pub fn can_fire(&self, now: f64, config: &WeaponConfig) -> bool {
        self.state == WeaponState::Ready && now >= self.last_fire_time + config.min_fire_interval as f64
    }

    /// Расход одного патрона после discharge
    ///
    /// Gate гарантирует magazine > 0, поэтому dry-fire ветки нет.
    pub(crate) fn consume_round(&mut self) {
        self.magazine_ammo = self.magazine_ammo.saturating_sub(1);
        if self.magazine_ammo == 0 {
            self.state = WeaponState::Empty;
        }
    }

    /// Первая причина, по которой перезарядка невозможна
    pub fn reload_blocker(&self, config: &WeaponConfig) -> Result<(), ReloadBlocked> {
        if self.state == WeaponState::Reloading {
            return Err(ReloadBlocked::AlreadyReloading);
        }
        if self.reserve_ammo == 0 {
            return Err(ReloadBlocked::NoReserve);
        }
        if self.magazine_ammo >= config.magazine_capacity {
            return Err(ReloadBlocked::MagazineFull);
        }
        Ok(())
    }

    /// Перенос патронов из резерва в магазин (конец перезарядки)
    ///
    /// Возвращает сколько патронов перенесено. State всегда → Ready.
    pub(crate) fn transfer_from_reserve(&mut self, config: &WeaponConfig) -> u32 {
        let needed = config.magazine_capacity.saturating_sub(self.magazine_ammo);
        let transferred = needed.min(self.reserve_ammo);

        self.magazine_ammo += transferred;
        self.reserve_ammo -= transferred;
        self.state = WeaponState::Ready;

        transferred
    }

    /// Всего патронов (магазин + резерв)
    pub fn total_ammo(&self) -> u32 {
        self.reserve_ammo + self.magazine_ammo
    }
}

/// Почему `attempt_reload` отказал
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ReloadBlocked {
    /// Оружие не активировано
    Inactive,
    AlreadyReloading,
    NoReserve,
    MagazineFull,
}

impl fmt::Display for ReloadBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReloadBlocked::Inactive => write!(f, "weapon is not active"),
            ReloadBlocked::AlreadyReloading => write!(f, "already reloading"),
            ReloadBlocked::NoReserve => write!(f, "no reserve ammo"),
            ReloadBlocked::MagazineFull => write!(f, "magazine is full"),
        }
    }
}

/// HUD снимок (ammo text, reload bar)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmmoReadout {
    pub state: WeaponState,
    pub magazine: u32,
    pub capacity: u32,
    pub reserve: u32,
    /// 0.0 → 1.0 пока идёт перезарядка
    pub reload_progress: Option<f32>,
}

impl fmt::Display for AmmoReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.magazine, self.reserve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(capacity: u32, reserve: u32) -> WeaponConfig {
        WeaponConfig {
            magazine_capacity: capacity,
            starting_reserve: reserve,
            ..WeaponConfig::rifle()
        }
    }

    #[test]
    fn test_fresh_runtime() {
        let config = config(10, 100);
        let runtime = WeaponRuntime::fresh(&config);

        assert_eq!(runtime.magazine_ammo, 10);
        assert_eq!(runtime.reserve_ammo, 100);
        assert_eq!(runtime.state, WeaponState::Ready);
        assert_eq!(runtime.last_fire_time, 0.0);
    }

    #[test]
    fn test_consume_last_round_sets_empty() {
        let config = config(2, 0);
        let mut runtime = WeaponRuntime::fresh(&config);

        runtime.consume_round();
        assert_eq!(runtime.state, WeaponState::Ready);

        runtime.consume_round();
        assert_eq!(runtime.magazine_ammo, 0);
        assert_eq!(runtime.state, WeaponState::Empty);
    }

    #[test]
    fn test_transfer_limited_by_reserve() {
        let config = config(10, 2);
        let mut runtime = WeaponRuntime::fresh(&config);
        runtime.magazine_ammo = 3;
        runtime.state = WeaponState::Reloading;
        let total = runtime.total_ammo();

        let transferred = runtime.transfer_from_reserve(&config);
        assert_eq!(runtime.total_ammo(), total);

        assert_eq!(transferred, 2);
        assert_eq!(runtime.magazine_ammo, 5);
        assert_eq!(runtime.reserve_ammo, 0);
        assert_eq!(runtime.state, WeaponState::Ready);
    }

    #[test]
    fn test_reload_blocker_order() {
        let config = config(10, 0);
        let mut runtime = WeaponRuntime::fresh(&config);
        runtime.magazine_ammo = 1;

        assert_eq!(runtime.reload_blocker(&config), Err(ReloadBlocked::NoReserve));

        runtime.state = WeaponState::Reloading;
        assert_eq!(runtime.reload_blocker(&config), Err(ReloadBlocked::AlreadyReloading));

        let config = self::config(10, 5);
        let runtime = WeaponRuntime::fresh(&config);
        assert_eq!(runtime.reload_blocker(&config), Err(ReloadBlocked::MagazineFull));
    }

    #[test]
    fn test_readout_display() {
        let readout = AmmoReadout {
            state: WeaponState::Ready,
            magazine: 7,
            capacity: 25,
            reserve: 80,
            reload_progress: None,
        };
        assert_eq!(readout.to_string(), "7/80");
    }
}
