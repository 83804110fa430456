//! Shot effects: fire-and-forget presentation sequence
//!
//! Flow одного выстрела:
//! 1. muzzle flash + shell eject + shot sound
//! 2. show_trajectory(muzzle → endpoint)
//! 3. через TRAJECTORY_DISPLAY_SECS → hide_trajectory
//!
//! Своё состояние (очередь трасс), никакой связи с ammo/state оружия.

use bevy::prelude::*;

use super::collaborators::{Presentation, TraceId};
use super::config::WeaponConfig;
use super::timeline::Timeline;

/// Сколько видна трасса выстрела (секунды, не зависит от конфига)
pub const TRAJECTORY_DISPLAY_SECS: f64 = 0.03;

#[derive(Debug, Clone, Default)]
pub struct ShotEffects {
    next_trace: u64,
    expiring: Timeline<TraceId>,
}

impl ShotEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Запустить sequence для одного discharge
    pub fn begin(
        &mut self,
        now: f64,
        from: Vec3,
        to: Vec3,
        config: &WeaponConfig,
        presentation: &mut impl Presentation,
    ) -> TraceId {
        let trace = TraceId(self.next_trace);
        self.next_trace = self.next_trace.wrapping_add(1);

        presentation.play_muzzle_flash(&config.muzzle_flash);
        presentation.play_shell_eject(&config.shell_eject);
        presentation.play_sound(&config.shot_clip);
        presentation.show_trajectory(trace, from, to);

        self.expiring.schedule(now + TRAJECTORY_DISPLAY_SECS, trace);
        trace
    }

    /// Спрятать трассы с истёкшим display window
    pub fn advance(&mut self, now: f64, presentation: &mut impl Presentation) {
        if self.expiring.is_empty() {
            return;
        }

        while let Some(trace) = self.expiring.pop_due(now) {
            presentation.hide_trajectory(trace);
        }
    }

    /// Спрятать всё сразу (deactivate)
    pub fn clear(&mut self, presentation: &mut impl Presentation) {
        for trace in self.expiring.drain() {
            presentation.hide_trajectory(trace);
        }
    }

    /// Сколько трасс сейчас видно
    pub fn visible_traces(&self) -> usize {
        self.expiring.len()
    }
}
