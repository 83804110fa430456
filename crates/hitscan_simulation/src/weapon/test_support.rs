//! Test doubles для WorldQuery

use bevy::prelude::*;

use super::collaborators::{DamageReceiver, RayHit, WorldQuery};

/// Записанный вызов apply_damage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageCall {
    pub target: Entity,
    pub amount: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Заранее заданная поверхность, в которую попадает каждый луч
#[derive(Debug, Clone, Copy)]
pub struct ScriptedSurface {
    pub point: Vec3,
    pub normal: Vec3,
    pub receiver: Option<Entity>,
}

/// WorldQuery с фиксированным ответом (None = всегда промах)
#[derive(Debug, Default)]
pub struct ScriptedWorld {
    pub surface: Option<ScriptedSurface>,
    pub casts: Vec<(Vec3, Vec3, f32)>,
    pub damage: Vec<DamageCall>,
}

impl ScriptedWorld {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn hit(point: Vec3, normal: Vec3, receiver: Option<Entity>) -> Self {
        Self {
            surface: Some(ScriptedSurface { point, normal, receiver }),
            ..default()
        }
    }
}

pub struct RecordingReceiver<'q> {
    target: Entity,
    log: &'q mut Vec<DamageCall>,
}

impl DamageReceiver for RecordingReceiver<'_> {
    fn target(&self) -> Entity {
        self.target
    }

    fn apply_damage(&mut self, amount: f32, point: Vec3, normal: Vec3) {
        self.log.push(DamageCall {
            target: self.target,
            amount,
            point,
            normal,
        });
    }
}

impl WorldQuery for ScriptedWorld {
    type Receiver<'q> = RecordingReceiver<'q>;

    fn cast_ray(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit<Self::Receiver<'_>>> {
        self.casts.push((origin, direction, max_distance));

        let surface = self.surface?;
        let log = &mut self.damage;
        Some(RayHit {
            point: surface.point,
            normal: surface.normal,
            receiver: surface.receiver.map(move |target| RecordingReceiver { target, log }),
        })
    }
}
