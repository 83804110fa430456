//! Компоненты мишеней: Health, HitSphere, Dead

use bevy::prelude::*;

/// Здоровье цели
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Sphere collider для headless hit-scan (`SphereWorldQuery`)
///
/// Без `Health`: просто препятствие (стена, ящик): луч останавливается, урона нет.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct HitSphere {
    /// Радиус (метры)
    pub radius: f32,
}

impl Default for HitSphere {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

impl HitSphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

/// Компонент-маркер: цель уничтожена (Health == 0)
///
/// Деспавн не автоматический: коллайдер остаётся на месте.
#[derive(Component, Debug, Clone, Copy)]
pub struct Dead;
