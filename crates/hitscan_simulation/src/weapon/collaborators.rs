//! Collaborator interfaces для WeaponController
//!
//! - `WorldQuery`: hit-scan ray cast (rapier / sphere colliders / test mocks)
//! - `DamageReceiver`: capability, которую возвращает сам WorldQuery
//! - `Presentation`: fire-and-forget cues для visual/audio layer

use bevy::prelude::*;

use super::config::{AudioClip, EffectHandle};

/// Поза дула в момент выстрела (world space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Muzzle {
    pub position: Vec3,
    /// Normalized forward
    pub forward: Vec3,
}

impl Muzzle {
    /// `forward` не должен быть нулевым: иначе луч вырождается и промах
    /// приходится в точку дула, а не на `range`.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        let forward = forward.normalize_or_zero();
        debug_assert!(forward != Vec3::ZERO, "Muzzle forward must be non-zero");
        Self { position, forward }
    }

    /// Дуло по Transform (-Z = forward, как в Bevy)
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            forward: *transform.forward(),
        }
    }

    /// Точка на луче на дистанции `distance`
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.position + self.forward * distance
    }
}

/// Результат ray cast: точка и нормаль поверхности + опциональный damage receiver
#[derive(Debug)]
pub struct RayHit<R> {
    pub point: Vec3,
    pub normal: Vec3,
    pub receiver: Option<R>,
}

/// Объект, который может получать урон
pub trait DamageReceiver {
    /// Entity получателя (для ShotResolution / событий)
    fn target(&self) -> Entity;

    /// Нанести урон. Ответ получателя controller не читает.
    fn apply_damage(&mut self, amount: f32, point: Vec3, normal: Vec3);
}

/// Hit-scan запрос к миру
pub trait WorldQuery {
    type Receiver<'q>: DamageReceiver
    where
        Self: 'q;

    fn cast_ray(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit<Self::Receiver<'_>>>;
}

/// Visual/audio feedback (fire-and-forget, ничего не возвращает)
///
/// Backend сам глотает и логирует свои ошибки: state machine от них не зависит.
pub trait Presentation {
    fn play_muzzle_flash(&mut self, effect: &EffectHandle);
    fn play_shell_eject(&mut self, effect: &EffectHandle);
    fn play_sound(&mut self, clip: &AudioClip);
    fn show_trajectory(&mut self, trace: TraceId, from: Vec3, to: Vec3);
    fn hide_trajectory(&mut self, trace: TraceId);
}

/// ID одной трассы (trajectory indicator)
///
/// Несколько трасс могут быть видны одновременно: каждая прячется по своему ID.
/// Счётчик свой у каждого controller'а (с 0), поэтому ID уникален только в пределах
/// одного оружия. Хост с общим Presentation на несколько стрелков различает трассы
/// по паре (shooter, TraceId), см. `WeaponCue::shooter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct TraceId(pub u64);

/// Presentation, которая ничего не делает (headless без visual layer)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPresentation;

impl Presentation for SilentPresentation {
    fn play_muzzle_flash(&mut self, _effect: &EffectHandle) {}
    fn play_shell_eject(&mut self, _effect: &EffectHandle) {}
    fn play_sound(&mut self, _clip: &AudioClip) {}
    fn show_trajectory(&mut self, _trace: TraceId, _from: Vec3, _to: Vec3) {}
    fn hide_trajectory(&mut self, _trace: TraceId) {}
}
