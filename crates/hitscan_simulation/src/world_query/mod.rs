//! WorldQuery backends
//!
//! - `SphereWorldQuery`: headless ray cast по `HitSphere` коллайдерам
//! - Свой backend (Godot physics, rapier): реализовать `WorldQuery`
//!   и звать `weapon::fire_gun` из своей системы
//!
//! Урон не применяется напрямую: receiver складывает `HitscanDamage`
//! в буфер, система потом отправляет их events'ами.

use bevy::prelude::*;

use crate::combat::HitscanDamage;
use crate::weapon::DamageReceiver;

pub mod sphere;

pub use sphere::{ray_sphere_distance, SphereCollider, SphereWorldQuery};

/// Damage receiver, который превращает попадание в `HitscanDamage`
pub struct DamageEventReceiver<'q> {
    shooter: Entity,
    target: Entity,
    sink: &'q mut Vec<HitscanDamage>,
}

impl<'q> DamageEventReceiver<'q> {
    pub fn new(shooter: Entity, target: Entity, sink: &'q mut Vec<HitscanDamage>) -> Self {
        Self { shooter, target, sink }
    }
}

impl DamageReceiver for DamageEventReceiver<'_> {
    fn target(&self) -> Entity {
        self.target
    }

    fn apply_damage(&mut self, amount: f32, point: Vec3, normal: Vec3) {
        self.sink.push(HitscanDamage {
            shooter: self.shooter,
            target: self.target,
            amount,
            point,
            normal,
        });
    }
}
