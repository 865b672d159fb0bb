//! Volume sliders and their conversion to mixer gain.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Highest slider value (+6 dB).
pub const SLIDER_MAX: f32 = 2.0;

/// Gain used for a slider at zero, effectively silence.
pub const SILENT_DB: f32 = -80.0;

/// Slider steps of the menu's -/+ buttons.
pub const SLIDER_STEP: f32 = 0.1;

/// One of the three mixer groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeChannel {
    Master,
    Music,
    Sfx,
}

impl VolumeChannel {
    pub const ALL: [VolumeChannel; 3] = [Self::Master, Self::Music, Self::Sfx];

    pub fn label(self) -> &'static str {
        match self {
            Self::Master => "Master",
            Self::Music => "Music",
            Self::Sfx => "Effects",
        }
    }
}

/// Slider value in `[0, 2]` to decibels.
pub fn slider_to_decibels(slider: f32) -> f32 {
    if slider <= 0.0 {
        SILENT_DB
    } else {
        slider.log10() * 20.0
    }
}

/// Decibels to a linear amplitude factor.
pub fn decibels_to_amplitude(decibels: f32) -> f64 {
    if decibels <= SILENT_DB {
        return 0.0;
    }
    10f64.powf(decibels as f64 / 20.0)
}

/// Volume slider positions, as shown in the menus.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeSettings {
    pub master: f32,
    pub music: f32,
    pub sfx: f32,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            master: 1.0,
            music: 1.0,
            sfx: 1.0,
        }
    }
}

impl VolumeSettings {
    pub fn slider(&self, channel: VolumeChannel) -> f32 {
        match channel {
            VolumeChannel::Master => self.master,
            VolumeChannel::Music => self.music,
            VolumeChannel::Sfx => self.sfx,
        }
    }

    /// Set a slider, clamped to its range.
    pub fn set(&mut self, channel: VolumeChannel, value: f32) {
        let value = value.clamp(0.0, SLIDER_MAX);
        match channel {
            VolumeChannel::Master => self.master = value,
            VolumeChannel::Music => self.music = value,
            VolumeChannel::Sfx => self.sfx = value,
        }
    }

    /// Move a slider by `delta`, snapping to the step grid.
    pub fn step(&mut self, channel: VolumeChannel, delta: f32) {
        let stepped = ((self.slider(channel) + delta) / SLIDER_STEP).round() * SLIDER_STEP;
        self.set(channel, stepped);
    }

    /// Effective gain of a channel in decibels.
    ///
    /// Music and effects sit under master, so their gains add up. A muted
    /// master mutes everything under it.
    pub fn decibels(&self, channel: VolumeChannel) -> f32 {
        if self.master <= 0.0 {
            return SILENT_DB;
        }
        let master = slider_to_decibels(self.master);
        match channel {
            VolumeChannel::Master => master,
            other => (master + slider_to_decibels(self.slider(other))).max(SILENT_DB),
        }
    }

    /// Effective linear amplitude of a channel.
    pub fn amplitude(&self, channel: VolumeChannel) -> f64 {
        decibels_to_amplitude(self.decibels(channel))
    }

    /// Slider position as a percentage for display.
    pub fn percent(&self, channel: VolumeChannel) -> u32 {
        (self.slider(channel) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_sliders_are_silent() {
        assert_eq!(slider_to_decibels(0.0), SILENT_DB);
        assert_eq!(slider_to_decibels(-1.0), SILENT_DB);
        assert_eq!(decibels_to_amplitude(SILENT_DB), 0.0);
    }

    #[test]
    fn slider_maps_logarithmically() {
        assert!(slider_to_decibels(1.0).abs() < 1e-5);
        assert!((slider_to_decibels(0.1) + 20.0).abs() < 1e-4);
        assert!((slider_to_decibels(2.0) - 6.0206).abs() < 1e-3);
    }

    #[test]
    fn unity_gain_is_full_amplitude() {
        assert!((decibels_to_amplitude(0.0) - 1.0).abs() < 1e-9);
        assert!((decibels_to_amplitude(-20.0) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn channels_are_nested_under_master() {
        let settings = VolumeSettings {
            master: 0.1,
            music: 0.1,
            sfx: 1.0,
        };
        assert!((settings.decibels(VolumeChannel::Music) + 40.0).abs() < 1e-3);
        assert!((settings.decibels(VolumeChannel::Sfx) + 20.0).abs() < 1e-3);
    }

    #[test]
    fn silent_master_mutes_everything() {
        let settings = VolumeSettings {
            master: 0.0,
            music: 2.0,
            sfx: 2.0,
        };
        assert_eq!(settings.amplitude(VolumeChannel::Music), 0.0);
        assert_eq!(settings.amplitude(VolumeChannel::Sfx), 0.0);
    }

    #[test]
    fn quiet_master_still_lets_loud_channels_through() {
        let settings = VolumeSettings {
            master: 0.01,
            music: 2.0,
            sfx: 0.0,
        };
        // -40 dB + 6 dB
        assert!((settings.decibels(VolumeChannel::Music) + 33.98).abs() < 1e-2);
        assert!(settings.amplitude(VolumeChannel::Music) > 0.0);
        assert_eq!(settings.amplitude(VolumeChannel::Sfx), 0.0);
    }

    #[test]
    fn set_clamps_to_slider_range() {
        let mut settings = VolumeSettings::default();
        settings.set(VolumeChannel::Music, 5.0);
        assert_eq!(settings.music, SLIDER_MAX);
        settings.set(VolumeChannel::Music, -1.0);
        assert_eq!(settings.music, 0.0);
    }

    #[test]
    fn step_snaps_to_grid() {
        let mut settings = VolumeSettings::default();
        settings.step(VolumeChannel::Sfx, -SLIDER_STEP);
        assert_eq!(settings.percent(VolumeChannel::Sfx), 90);

        for _ in 0..30 {
            settings.step(VolumeChannel::Sfx, SLIDER_STEP);
        }
        assert_eq!(settings.sfx, SLIDER_MAX);
    }
}
