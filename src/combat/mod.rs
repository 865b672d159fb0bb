//! Combat module - weapons, hitboxes, damage, and death.

mod components;
mod plugin;
mod projectile;
mod systems;
mod viewmodel;

pub use components::*;
pub use plugin::CombatPlugin;
pub use projectile::{expire_projectiles, spawn_projectile, ProjectileAssets, ProjectileLaunch};
pub use systems::{
    apply_damage, detect_weapon_hits, handle_deaths, sync_hitbox_colliders,
    tick_attack_animations, tick_hit_guards, CombatSet,
};
pub use viewmodel::{spawn_hand, HandGlow, HandViewmodel};
