//! UI module - HUD, menus and the death screen.

mod hud;
mod menus;
mod plugin;
mod widgets;

pub use hud::{
    update_clock_readout, update_health_bar, ClockReadout, HealthBar, HealthReadout, HudRoot,
};
pub use menus::{FinalTime, GameOverUi, MainMenuUi, MenuCamera, PauseMenuUi};
pub use plugin::UiPlugin;
pub use widgets::{MenuButton, VolumeButton, VolumeReadout};
