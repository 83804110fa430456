//! ECS Components для мишеней
//!
//! - target: Health, HitSphere, Dead
//!
//! Оружие (Gun) живёт в `weapon::gun`.

pub mod target;

// Re-exports для удобного импорта
pub use target::*;
