//! Combat plugin - weapons, hitboxes, damage and death.

use bevy::prelude::*;

use super::projectile::setup_projectile_assets;
use super::systems;
use super::viewmodel;

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_projectile_assets);

        // Setup combat systems
        systems::setup_combat_systems(app);

        // Setup viewmodel systems
        viewmodel::setup_viewmodel_systems(app);
    }
}
