mod config;
mod constants;
mod controller;
mod error;
mod limits;
mod protocol;
mod transport;
mod types;

pub use config::{LinkConfig, PtuConfig};
pub use controller::Controller;
pub use error::{
    ConfigError, ConnectError, InvalidRange, MoveError, OpenError, TransmitError, TransportError,
};
pub use limits::MotionLimits;
pub use protocol::{to_two_bytes, CommandPacket};
pub use transport::{SerialTransport, Transport};
pub use types::{Axis, ConnectionState, Position, PositionState, PtuStatus};

// Re-export commonly used items
pub use constants::{
    CMD_MOVE_ABSOLUTE, DEFAULT_BAUD_RATE, DEFAULT_PORT, MAX_PAN, ORIGIN_PAN, ORIGIN_TILT,
    PACKET_SIZE, TILT_MAX, TILT_MIN,
};
