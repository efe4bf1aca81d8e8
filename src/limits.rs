use crate::constants::*;
use crate::error::InvalidRange;
use crate::types::{Axis, Position};
use serde::Deserialize;
use std::ops::RangeInclusive;
use strum::IntoEnumIterator;

/// Mechanical envelope of one PTU model.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct MotionLimits {
    pub max_pan: i32,
    pub tilt_min: i32,
    pub tilt_max: i32,
}

impl Default for MotionLimits {
    fn default() -> Self {
        MotionLimits {
            max_pan: MAX_PAN,
            tilt_min: TILT_MIN,
            tilt_max: TILT_MAX,
        }
    }
}

impl MotionLimits {
    /// Allowed range per axis, never wider than the 16-bit wire field.
    pub fn bounds(&self, axis: Axis) -> RangeInclusive<i32> {
        let field = i32::from(u16::MAX);
        match axis {
            Axis::Pan => 0..=self.max_pan.min(field),
            Axis::Tilt => self.tilt_min.max(0)..=self.tilt_max.min(field),
        }
    }

    /// Gate for every absolute target before it is encoded. Pan is checked
    /// before tilt.
    pub fn check(&self, pan: i32, tilt: i32) -> Result<Position, InvalidRange> {
        let target = Position::new(pan, tilt);
        for axis in Axis::iter() {
            let requested = target.get(axis);
            let bounds = self.bounds(axis);
            if !bounds.contains(&requested) {
                return Err(InvalidRange {
                    axis,
                    requested,
                    bounds,
                });
            }
        }
        Ok(target)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.check(position.pan, position.tilt).is_ok()
    }
}
