//! Presentation cues как данные
//!
//! ECS не рисует и не играет звук: он собирает cues в буфер,
//! а systems отправляют их visual layer'у как `WeaponCue` events.

use bevy::prelude::*;

use super::collaborators::{Presentation, TraceId};
use super::config::{AudioClip, EffectHandle};

/// Одна команда visual/audio layer'у
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    MuzzleFlash(EffectHandle),
    ShellEject(EffectHandle),
    Sound(AudioClip),
    ShowTrajectory(TraceId, Vec3, Vec3),
    HideTrajectory(TraceId),
}

/// Presentation, которая складывает cues в Vec
#[derive(Debug, Clone, Default)]
pub struct CueBuffer {
    pub cues: Vec<Cue>,
}

impl CueBuffer {
    /// Все спрятанные трассы (в порядке hide)
    pub fn hidden(&self) -> Vec<TraceId> {
        self.cues
            .iter()
            .filter_map(|cue| match cue {
                Cue::HideTrajectory(trace) => Some(*trace),
                _ => None,
            })
            .collect()
    }

    pub fn sounds(&self) -> Vec<&AudioClip> {
        self.cues
            .iter()
            .filter_map(|cue| match cue {
                Cue::Sound(clip) => Some(clip),
                _ => None,
            })
            .collect()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Cue> {
        self.cues.drain(..)
    }
}

impl Presentation for CueBuffer {
    fn play_muzzle_flash(&mut self, effect: &EffectHandle) {
        self.cues.push(Cue::MuzzleFlash(effect.clone()));
    }

    fn play_shell_eject(&mut self, effect: &EffectHandle) {
        self.cues.push(Cue::ShellEject(effect.clone()));
    }

    fn play_sound(&mut self, clip: &AudioClip) {
        self.cues.push(Cue::Sound(clip.clone()));
    }

    fn show_trajectory(&mut self, trace: TraceId, from: Vec3, to: Vec3) {
        self.cues.push(Cue::ShowTrajectory(trace, from, to));
    }

    fn hide_trajectory(&mut self, trace: TraceId) {
        self.cues.push(Cue::HideTrajectory(trace));
    }
}
