//! Headless hit-scan по sphere коллайдерам
//!
//! Используется когда физический движок не подключен (headless симуляция, тесты).
//! Коллайдер = `Transform.translation` + `HitSphere.radius`, scale и иерархия игнорируются.

use bevy::prelude::*;

use super::DamageEventReceiver;
use crate::combat::HitscanDamage;
use crate::weapon::{RayHit, WorldQuery};

/// Snapshot одного коллайдера на момент выстрела
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereCollider {
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
    /// Есть Health и цель жива
    pub damageable: bool,
}

/// WorldQuery по списку sphere коллайдеров
#[derive(Debug, Default)]
pub struct SphereWorldQuery {
    colliders: Vec<SphereCollider>,
    shooter: Option<Entity>,
    pending: Vec<HitscanDamage>,
}

impl SphereWorldQuery {
    pub fn new(colliders: Vec<SphereCollider>) -> Self {
        Self {
            colliders,
            shooter: None,
            pending: Vec::new(),
        }
    }

    /// Чей выстрел: коллайдер стрелка игнорируется, урон атрибутируется ему
    pub fn set_shooter(&mut self, shooter: Entity) {
        self.shooter = Some(shooter);
    }

    /// Забрать накопленные попадания
    pub fn take_damage(&mut self) -> Vec<HitscanDamage> {
        std::mem::take(&mut self.pending)
    }
}

impl WorldQuery for SphereWorldQuery {
    type Receiver<'q> = DamageEventReceiver<'q>;

    fn cast_ray(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit<Self::Receiver<'_>>> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let shooter = self.shooter;
        let (collider, distance) = self
            .colliders
            .iter()
            .filter(|collider| Some(collider.entity) != shooter)
            .filter_map(|collider| {
                ray_sphere_distance(origin, direction, collider.center, collider.radius)
                    .filter(|distance| *distance <= max_distance)
                    .map(|distance| (*collider, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        let point = origin + direction * distance;
        let normal = (point - collider.center).try_normalize().unwrap_or(-direction);
        let receiver = collider.damageable.then(|| {
            DamageEventReceiver::new(shooter.unwrap_or(Entity::PLACEHOLDER), collider.entity, &mut self.pending)
        });

        Some(RayHit { point, normal, receiver })
    }
}

/// Дистанция до первого пересечения луча со сферой
///
/// `direction` должен быть normalized. Луч из сферы → выход наружу.
pub fn ray_sphere_distance(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let b = offset.dot(direction);
    let c = offset.length_squared() - radius * radius;

    // Снаружи и смотрит от сферы
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        Some(near)
    } else {
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapon::DamageReceiver;

    fn sphere(index: u32, center: Vec3, radius: f32, damageable: bool) -> SphereCollider {
        SphereCollider {
            entity: Entity::from_raw(index),
            center,
            radius,
            damageable,
        }
    }

    #[test]
    fn test_ray_sphere_front_hit() {
        let distance = ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -10.0), 1.0);
        assert!((distance.unwrap() - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_sphere_miss_and_behind() {
        assert_eq!(ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(5.0, 0.0, -10.0), 1.0), None);
        assert_eq!(ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 10.0), 1.0), None);
    }

    #[test]
    fn test_ray_from_inside_exits() {
        let distance = ray_sphere_distance(Vec3::ZERO, Vec3::X, Vec3::ZERO, 2.0);
        assert!((distance.unwrap() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_collider_wins() {
        let mut world = SphereWorldQuery::new(vec![
            sphere(1, Vec3::new(0.0, 0.0, -20.0), 1.0, true),
            sphere(2, Vec3::new(0.0, 0.0, -8.0), 1.0, false),
        ]);

        let hit = world.cast_ray(Vec3::ZERO, Vec3::NEG_Z, 50.0).unwrap();
        assert!((hit.point - Vec3::new(0.0, 0.0, -7.0)).length() < 1e-4);
        assert!((hit.normal - Vec3::Z).length() < 1e-4);
        assert!(hit.receiver.is_none());
    }

    #[test]
    fn test_out_of_range_is_miss() {
        let mut world = SphereWorldQuery::new(vec![sphere(1, Vec3::new(0.0, 0.0, -60.0), 1.0, true)]);
        assert!(world.cast_ray(Vec3::ZERO, Vec3::NEG_Z, 50.0).is_none());
    }

    #[test]
    fn test_shooter_collider_ignored_and_damage_buffered() {
        let shooter = Entity::from_raw(10);
        let target = Entity::from_raw(2);
        let mut world = SphereWorldQuery::new(vec![
            SphereCollider {
                entity: shooter,
                center: Vec3::ZERO,
                radius: 0.5,
                damageable: true,
            },
            sphere(2, Vec3::new(0.0, 0.0, -5.0), 0.5, true),
        ]);
        world.set_shooter(shooter);

        {
            let hit = world.cast_ray(Vec3::ZERO, Vec3::NEG_Z, 50.0).unwrap();
            let mut receiver = hit.receiver.unwrap();
            assert_eq!(receiver.target(), target);
            receiver.apply_damage(25.0, hit.point, hit.normal);
        }

        let damage = world.take_damage();
        assert_eq!(damage.len(), 1);
        assert_eq!(damage[0].shooter, shooter);
        assert_eq!(damage[0].target, target);
        assert_eq!(damage[0].amount, 25.0);
        assert!(world.take_damage().is_empty());
    }
}
