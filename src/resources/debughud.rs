//! Developer overlay state.
//!
//! The presence of [`DebugHud`] enables the overlay systems: a smoothed frame
//! rate and a short game readout. Remove the resource to turn it all off.

use std::fmt;

use bevy_ecs::prelude::Resource;

/// Weight of the newest frame in the smoothed delta.
pub const FPS_SMOOTHING: f32 = 0.1;
/// Seconds between readout log lines.
pub const REPORT_INTERVAL: f32 = 1.0;

/// Colour band of the frame rate readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpsBand {
    /// 50 fps and above.
    Good,
    /// 30 to 50 fps.
    Fair,
    Poor,
}

/// Snapshot of the numbers the overlay shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugReadout {
    pub score: i32,
    /// Player health as (current, max); `None` when no player is alive.
    pub health: Option<(f32, f32)>,
    pub game_time: f32,
    pub time_scale: f32,
}

impl fmt::Display for DebugReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        match self.health {
            Some((current, max)) => writeln!(f, "Health: {}/{}", current, max)?,
            None => writeln!(f, "Health: -")?,
        }
        writeln!(f, "Time: {:.1}s", self.game_time)?;
        write!(f, "TimeScale: {:.2}", self.time_scale)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct DebugHud {
    pub visible: bool,
    smoothed_delta: f32,
    since_report: f32,
    readout: DebugReadout,
}

impl Default for DebugHud {
    fn default() -> Self {
        Self {
            visible: true,
            smoothed_delta: 0.0,
            since_report: 0.0,
            readout: DebugReadout::default(),
        }
    }
}

impl DebugHud {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Default::default()
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Fold one unscaled frame delta into the smoothed delta.
    pub fn sample(&mut self, unscaled_dt: f32) {
        self.smoothed_delta += (unscaled_dt - self.smoothed_delta) * FPS_SMOOTHING;
    }

    pub fn fps(&self) -> f32 {
        if self.smoothed_delta <= 0.0 {
            0.0
        } else {
            1.0 / self.smoothed_delta
        }
    }

    pub fn fps_band(&self) -> FpsBand {
        let fps = self.fps();
        if fps >= 50.0 {
            FpsBand::Good
        } else if fps >= 30.0 {
            FpsBand::Fair
        } else {
            FpsBand::Poor
        }
    }

    pub fn readout(&self) -> &DebugReadout {
        &self.readout
    }

    pub fn set_readout(&mut self, readout: DebugReadout) {
        self.readout = readout;
    }

    /// Advance the report timer; true once every [`REPORT_INTERVAL`].
    pub fn report_due(&mut self, unscaled_dt: f32) -> bool {
        self.since_report += unscaled_dt;
        if self.since_report >= REPORT_INTERVAL {
            self.since_report -= REPORT_INTERVAL;
            true
        } else {
            false
        }
    }
}
