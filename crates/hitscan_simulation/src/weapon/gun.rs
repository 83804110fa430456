//! Gun component: WeaponController внутри ECS
//!
//! Transform entity = дуло (translation + forward).

use bevy::prelude::*;
use std::sync::Arc;

use super::config::WeaponConfig;
use super::controller::WeaponController;

/// Оружие стрелка
///
/// Активируется автоматически при добавлении (`activate_spawned_guns`).
#[derive(Component, Debug, Clone)]
#[require(Transform)]
pub struct Gun {
    pub controller: WeaponController,
}

impl Gun {
    pub fn new(config: WeaponConfig) -> Self {
        Self::shared(Arc::new(config))
    }

    /// Несколько стрелков с одним конфигом
    pub fn shared(config: Arc<WeaponConfig>) -> Self {
        Self {
            controller: WeaponController::new(config),
        }
    }

    pub fn rifle() -> Self {
        Self::new(WeaponConfig::rifle())
    }

    pub fn pistol() -> Self {
        Self::new(WeaponConfig::pistol())
    }
}

impl Default for Gun {
    fn default() -> Self {
        Self::rifle()
    }
}
