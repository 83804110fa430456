//! Weapon controller: fire gate, hit-scan discharge, timed reload
//!
//! Architecture:
//! - Один логический поток (FixedUpdate system) владеет controller через `&mut`
//! - Gate + timestamp update в одном вызове → concurrent discharge невозможен
//! - Reload suspension = deadline, хост продвигает время через `update(now)`
//! - Effects (трассы) живут в `ShotEffects`, не трогают ammo/state
//!
//! Flow:
//! attempt_fire → gate → resolve_shot (WorldQuery) → effects.begin → consume_round
//! attempt_reload → eligibility → state = Reloading → deadline → update → transfer

use bevy::prelude::*;
use std::sync::Arc;

use super::collaborators::{DamageReceiver, Muzzle, Presentation, RayHit, TraceId, WorldQuery};
use super::config::WeaponConfig;
use super::effects::ShotEffects;
use super::state::{AmmoReadout, ReloadBlocked, WeaponRuntime, WeaponState};

/// Результат одного discharge (transient)
#[derive(Debug, Clone, PartialEq)]
pub struct ShotResolution {
    /// Откуда вылетел луч
    pub muzzle: Vec3,
    /// Hit point или точка на максимальной дальности
    pub end_point: Vec3,
    /// Нормаль поверхности (None = промах)
    pub normal: Option<Vec3>,
    /// Кто получил урон
    pub target: Option<Entity>,
    /// Сколько урона нанесено (0 если receiver'а нет)
    pub damage: f32,
    /// Трасса, запущенная для этого выстрела
    pub trace: TraceId,
}

impl ShotResolution {
    pub fn is_hit(&self) -> bool {
        self.normal.is_some()
    }
}

/// Отчёт о завершённой перезарядке
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadCompleted {
    pub transferred: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingReload {
    started_at: f64,
    completes_at: f64,
}

/// Контроллер оружия
#[derive(Debug, Clone)]
pub struct WeaponController {
    config: Arc<WeaponConfig>,
    runtime: WeaponRuntime,
    reload: Option<PendingReload>,
    effects: ShotEffects,
    active: bool,
}

impl WeaponController {
    /// Создать неактивный controller (активирует owner)
    pub fn new(config: Arc<WeaponConfig>) -> Self {
        let runtime = WeaponRuntime::fresh(&config);
        Self {
            config,
            runtime,
            reload: None,
            effects: ShotEffects::new(),
            active: false,
        }
    }

    /// Создать и сразу активировать
    pub fn activated(config: Arc<WeaponConfig>) -> Self {
        let mut controller = Self::new(config);
        controller.activate();
        controller
    }

    /// Оружие стало активным: полный reset runtime state
    pub fn activate(&mut self) {
        self.runtime = WeaponRuntime::fresh(&self.config);
        self.reload = None;
        self.active = true;
    }

    /// Оружие убрано: отменяем reload, прячем трассы, сбрасываем runtime
    pub fn deactivate(&mut self, presentation: &mut impl Presentation) {
        self.reload = None;
        self.effects.clear(presentation);
        self.runtime = WeaponRuntime::fresh(&self.config);
        self.active = false;
    }

    /// Попытка выстрела (безопасно вызывать каждый кадр)
    ///
    /// Silent no-op пока state != Ready или не прошёл `min_fire_interval`.
    pub fn attempt_fire<W, P>(
        &mut self,
        now: f64,
        muzzle: Muzzle,
        world: &mut W,
        presentation: &mut P,
    ) -> Option<ShotResolution>
    where
        W: WorldQuery,
        P: Presentation,
    {
        if !self.active || !self.runtime.can_fire(now, &self.config) {
            return None;
        }

        self.runtime.last_fire_time = now;
        Some(self.resolve_shot(now, muzzle, world, presentation))
    }

    fn resolve_shot<W, P>(&mut self, now: f64, muzzle: Muzzle, world: &mut W, presentation: &mut P) -> ShotResolution
    where
        W: WorldQuery,
        P: Presentation,
    {
        let config = &self.config;

        let (end_point, normal, target, damage) =
            match world.cast_ray(muzzle.position, muzzle.forward, config.range) {
                Some(RayHit { point, normal, receiver }) => match receiver {
                    Some(mut receiver) => {
                        receiver.apply_damage(config.damage, point, normal);
                        (point, Some(normal), Some(receiver.target()), config.damage)
                    }
                    None => (point, Some(normal), None, 0.0),
                },
                None => (muzzle.point_at(config.range), None, None, 0.0),
            };

        let trace = self.effects.begin(now, muzzle.position, end_point, config, presentation);
        self.runtime.consume_round();

        ShotResolution {
            muzzle: muzzle.position,
            end_point,
            normal,
            target,
            damage,
            trace,
        }
    }

    /// Попытка перезарядки
    ///
    /// `true` если перезарядка началась. State переключается в Reloading
    /// сразу, до планирования завершения.
    pub fn attempt_reload(&mut self, now: f64, presentation: &mut impl Presentation) -> bool {
        if self.reload_blocker().is_err() {
            return false;
        }

        self.runtime.state = WeaponState::Reloading;
        presentation.play_sound(&self.config.reload_clip);
        self.reload = Some(PendingReload {
            started_at: now,
            completes_at: now + self.config.reload_duration as f64,
        });

        true
    }

    /// Первая причина, по которой `attempt_reload` откажет
    pub fn reload_blocker(&self) -> Result<(), ReloadBlocked> {
        if !self.active {
            return Err(ReloadBlocked::Inactive);
        }
        self.runtime.reload_blocker(&self.config)
    }

    /// Продвинуть время: спрятать истёкшие трассы, завершить reload
    pub fn update(&mut self, now: f64, presentation: &mut impl Presentation) -> Option<ReloadCompleted> {
        self.effects.advance(now, presentation);

        let pending = self.reload?;
        if now < pending.completes_at {
            return None;
        }

        self.reload = None;
        let transferred = self.runtime.transfer_from_reserve(&self.config);
        Some(ReloadCompleted { transferred })
    }

    pub fn state(&self) -> WeaponState {
        self.runtime.state
    }

    pub fn reserve_ammo(&self) -> u32 {
        self.runtime.reserve_ammo
    }

    /// Магазин + резерв
    pub fn total_ammo(&self) -> u32 {
        self.runtime.total_ammo()
    }

    pub fn magazine_ammo(&self) -> u32 {
        self.runtime.magazine_ammo
    }

    pub fn last_fire_time(&self) -> f64 {
        self.runtime.last_fire_time
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_reloading(&self) -> bool {
        self.reload.is_some()
    }

    pub fn visible_traces(&self) -> usize {
        self.effects.visible_traces()
    }

    /// HUD снимок: ammo + прогресс перезарядки
    pub fn readout(&self, now: f64) -> AmmoReadout {
        let reload_progress = self.reload.map(|pending| {
            let duration = pending.completes_at - pending.started_at;
            if duration <= 0.0 {
                1.0
            } else {
                ((now - pending.started_at) / duration).clamp(0.0, 1.0) as f32
            }
        });

        AmmoReadout {
            state: self.runtime.state,
            magazine: self.runtime.magazine_ammo,
            capacity: self.config.magazine_capacity,
            reserve: self.runtime.reserve_ammo,
            reload_progress,
        }
    }

    #[cfg(test)]
    pub(crate) fn runtime_mut(&mut self) -> &mut WeaponRuntime {
        &mut self.runtime
    }
}
