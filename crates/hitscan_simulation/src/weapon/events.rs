//! Weapon events
//!
//! Intent events (host/input/AI → sim):
//! - FireIntent, ReloadIntent, GunActivation
//!
//! Outcome events (sim → UI, AI, visual layer):
//! - ShotFired, ReloadStarted, ReloadRejected, ReloadFinished, WeaponCue

use bevy::prelude::*;

use super::controller::ShotResolution;
use super::cues::Cue;
use super::state::ReloadBlocked;

/// Event: стрелок жмёт спуск (можно слать каждый кадр)
#[derive(Event, Debug, Clone, Copy)]
pub struct FireIntent {
    pub shooter: Entity,
}

/// Event: стрелок хочет перезарядиться
#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadIntent {
    pub shooter: Entity,
}

/// Event: оружие достали (`active = true`) или убрали
#[derive(Event, Debug, Clone, Copy)]
pub struct GunActivation {
    pub shooter: Entity,
    pub active: bool,
}

/// Event: состоялся discharge
#[derive(Event, Debug, Clone)]
pub struct ShotFired {
    pub shooter: Entity,
    pub resolution: ShotResolution,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadStarted {
    pub shooter: Entity,
}

/// Event: перезарядка невозможна (для "cannot reload" cue)
#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadRejected {
    pub shooter: Entity,
    pub reason: ReloadBlocked,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadFinished {
    pub shooter: Entity,
    pub transferred: u32,
}

/// Event: команда visual/audio layer'у (fire-and-forget)
///
/// TraceId в cue уникален только вместе с `shooter`.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WeaponCue {
    pub shooter: Entity,
    pub cue: Cue,
}
