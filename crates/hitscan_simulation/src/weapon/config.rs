//! Weapon configuration (immutable value object)
//!
//! Architecture:
//! - Owner создаёт `WeaponConfig` один раз (preset или deserialize)
//! - Controller держит `Arc<WeaponConfig>` и никогда его не мутирует
//! - Asset handles (clips, effects) opaque: передаются в Presentation как есть

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle на audio clip (shot, reload)
///
/// Simulation не знает что за ним стоит: visual layer резолвит сам.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioClip(pub String);

/// Opaque handle на particle effect (muzzle flash, shell eject)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectHandle(pub String);

/// Статы ranged оружия
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Ёмкость магазина (> 0)
    pub magazine_capacity: u32,

    /// Стартовый резерв патронов при активации
    pub starting_reserve: u32,

    /// Минимальный интервал между выстрелами (секунды)
    pub min_fire_interval: f32,

    /// Длительность перезарядки (секунды)
    pub reload_duration: f32,

    /// Урон за выстрел
    pub damage: f32,

    /// Дальность hit-scan луча (метры)
    pub range: f32,

    pub shot_clip: AudioClip,
    pub reload_clip: AudioClip,
    pub muzzle_flash: EffectHandle,
    pub shell_eject: EffectHandle,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self::rifle()
    }
}

impl WeaponConfig {
    /// Автоматическая винтовка (стандартный gun asset)
    pub fn rifle() -> Self {
        Self {
            magazine_capacity: 25,
            starting_reserve: 100,
            min_fire_interval: 0.12,
            reload_duration: 1.8,
            damage: 25.0,
            range: 50.0,
            shot_clip: AudioClip("rifle_shot".into()),
            reload_clip: AudioClip("rifle_reload".into()),
            muzzle_flash: EffectHandle("muzzle_flash".into()),
            shell_eject: EffectHandle("shell_eject".into()),
        }
    }

    /// Пистолет (медленнее, меньше магазин)
    pub fn pistol() -> Self {
        Self {
            magazine_capacity: 12,
            starting_reserve: 48,
            min_fire_interval: 0.25,
            reload_duration: 1.2,
            damage: 15.0,
            range: 30.0,
            shot_clip: AudioClip("pistol_shot".into()),
            reload_clip: AudioClip("pistol_reload".into()),
            muzzle_flash: EffectHandle("muzzle_flash_small".into()),
            shell_eject: EffectHandle("shell_eject_small".into()),
        }
    }

    /// Проверка контракта конфига
    ///
    /// Controller сам не валидирует: owner вызывает это при создании.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.magazine_capacity == 0 {
            return Err(ConfigError::ZeroMagazineCapacity);
        }
        if !(self.min_fire_interval >= 0.0) {
            return Err(ConfigError::NegativeDuration {
                field: "min_fire_interval",
                value: self.min_fire_interval,
            });
        }
        if !(self.reload_duration >= 0.0) {
            return Err(ConfigError::NegativeDuration {
                field: "reload_duration",
                value: self.reload_duration,
            });
        }
        if !(self.damage >= 0.0) {
            return Err(ConfigError::NegativeDamage(self.damage));
        }
        if !(self.range > 0.0) || !self.range.is_finite() {
            return Err(ConfigError::NonPositiveRange(self.range));
        }
        Ok(())
    }
}

/// Нарушение контракта `WeaponConfig`
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroMagazineCapacity,
    NegativeDuration { field: &'static str, value: f32 },
    NegativeDamage(f32),
    NonPositiveRange(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMagazineCapacity => write!(f, "magazine capacity must be greater than zero"),
            ConfigError::NegativeDuration { field, value } => {
                write!(f, "{} must be a non-negative duration, got {}", field, value)
            }
            ConfigError::NegativeDamage(value) => write!(f, "damage must be non-negative, got {}", value),
            ConfigError::NonPositiveRange(value) => write!(f, "range must be positive and finite, got {}", value),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(WeaponConfig::rifle().validate(), Ok(()));
        assert_eq!(WeaponConfig::pistol().validate(), Ok(()));
        assert_eq!(WeaponConfig::default(), WeaponConfig::rifle());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = WeaponConfig {
            magazine_capacity: 0,
            ..WeaponConfig::rifle()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMagazineCapacity));
    }

    #[test]
    fn test_bad_numbers_rejected() {
        let config = WeaponConfig {
            reload_duration: -1.0,
            ..WeaponConfig::rifle()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeDuration { field: "reload_duration", .. })
        ));

        let config = WeaponConfig {
            range: 0.0,
            ..WeaponConfig::rifle()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveRange(0.0)));

        let config = WeaponConfig {
            damage: f32::NAN,
            ..WeaponConfig::rifle()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NegativeDamage(_))));
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let json = r#"{
            "magazine_capacity": 10,
            "starting_reserve": 100,
            "min_fire_interval": 0.1,
            "reload_duration": 2.0,
            "damage": 20.0,
            "range": 40.0,
            "shot_clip": "shot",
            "reload_clip": "reload",
            "muzzle_flash": "flash",
            "shell_eject": "shell"
        }"#;

        let config: WeaponConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.magazine_capacity, 10);
        assert_eq!(config.shot_clip, AudioClip("shot".into()));
        assert!(config.validate().is_ok());
    }
}
