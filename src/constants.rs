// Serial link defaults
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD_RATE: u32 = 38400;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

// Frame layout
pub const PACKET_SIZE: usize = 8;
pub const HEADER: u8 = 0xFF;
pub const BUTTON: u8 = 0x00;

// Command constants
pub const CMD_MOVE_ABSOLUTE: u8 = 0x08;

// Motion envelope of the reference unit
pub const MAX_PAN: i32 = 3600;
pub const TILT_MIN: i32 = 510;
pub const TILT_MAX: i32 = 610;
pub const ORIGIN_PAN: i32 = 1800;
pub const ORIGIN_TILT: i32 = 560;

// Timing
pub const DEFAULT_SEND_RATE_MS: u64 = 100;
pub const SETTLE_DELAY_MS: u64 = 2000;
