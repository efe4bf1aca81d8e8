use serde::Deserialize;
use std::fmt;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Display, EnumIter, Clone, Copy, Eq, PartialEq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    Pan,
    Tilt,
}

#[derive(Debug, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub pan: i32,
    pub tilt: i32,
}

impl Position {
    pub const fn new(pan: i32, tilt: i32) -> Self {
        Position { pan, tilt }
    }

    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Pan => self.pan,
            Axis::Tilt => self.tilt,
        }
    }

    pub(crate) fn offset(&self, dpan: i32, dtilt: i32) -> Self {
        Position {
            pan: self.pan.saturating_add(dpan),
            tilt: self.tilt.saturating_add(dtilt),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(pan {}, tilt {})", self.pan, self.tilt)
    }
}

#[derive(Debug, Display, Clone, Copy, Default, Eq, PartialEq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Believed absolute position of the unit.
///
/// `None` means the position has not been anchored by an absolute move since
/// the last connect.
#[derive(Debug, Clone)]
pub struct PositionState {
    current: Option<Position>,
    origin: Position,
}

impl PositionState {
    pub fn new(origin: Position) -> Self {
        PositionState {
            current: None,
            origin,
        }
    }

    pub fn current(&self) -> Option<Position> {
        self.current
    }

    pub fn set(&mut self, position: Position) {
        self.current = Some(position);
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn forget(&mut self) {
        self.current = None;
    }
}

/// Snapshot of controller state, rendered the way an operator reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtuStatus {
    pub state: ConnectionState,
    pub position: Option<Position>,
    pub send_rate_ms: u64,
}

impl fmt::Display for PtuStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----PTU State----")?;
        writeln!(f, "Connected: {}", self.state == ConnectionState::Connected)?;
        match self.position {
            Some(position) => {
                writeln!(f, "Pan Position: {}", position.pan)?;
                writeln!(f, "Tilt Position: {}", position.tilt)?;
            }
            None => writeln!(f, "Position: unknown")?,
        }
        writeln!(f, "Send Rate: {}ms", self.send_rate_ms)?;
        write!(f, "-----------------")
    }
}
