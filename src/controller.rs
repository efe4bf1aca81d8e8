use crate::{
    config::PtuConfig,
    constants::PACKET_SIZE,
    error::{ConfigError, ConnectError, MoveError, OpenError, TransmitError},
    protocol::CommandPacket,
    transport::{SerialTransport, Transport},
    types::{ConnectionState, Position, PositionState, PtuStatus},
};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct Controller<T: Transport = SerialTransport> {
    transport: T,
    config: PtuConfig,
    state: ConnectionState,
    position: PositionState,
    send_rate: Duration,
}

impl<T: Transport> Controller<T> {
    /// Rejects configs whose envelope does not fit the 16-bit wire fields.
    pub fn new(config: PtuConfig, transport: T) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Controller {
            transport,
            position: PositionState::new(config.origin),
            send_rate: config.send_rate(),
            state: ConnectionState::Disconnected,
            config,
        })
    }

    /// Connects and moves to the origin so the position is known.
    pub async fn open_at_origin(config: PtuConfig, transport: T) -> Result<Self, OpenError> {
        let origin = config.origin;
        Self::open_at(config, transport, origin.pan, origin.tilt).await
    }

    pub async fn open_at(
        config: PtuConfig,
        transport: T,
        pan: i32,
        tilt: i32,
    ) -> Result<Self, OpenError> {
        let mut controller = Controller::new(config, transport)?;
        controller.connect().await?;
        controller.move_absolute(pan, tilt).await?;
        Ok(controller)
    }

    pub async fn connect(&mut self) -> Result<(), ConnectError> {
        if self.is_connected() {
            debug!("Already connected to {}", self.config.link.port);
            return Ok(());
        }

        let path = self.config.link.port.clone();
        if let Err(source) = self.transport.open(&path).await {
            return Err(ConnectError::LinkUnavailable { path, source });
        }
        if let Err(source) = self.transport.configure(&self.config.link) {
            self.transport.close();
            return Err(ConnectError::ConfigurationFailed { path, source });
        }

        self.state = ConnectionState::Connected;
        self.position.forget();

        // The unit ignores bytes for a while after the line is initialised.
        tokio::time::sleep(self.config.settle_delay()).await;
        info!("PTU Controller ready on {}", path);
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if self.is_connected() {
            self.transport.close();
            self.state = ConnectionState::Disconnected;
            info!("Disconnected from {}", self.config.link.port);
        }
    }

    pub async fn move_absolute(&mut self, pan: i32, tilt: i32) -> Result<(), MoveError> {
        if !self.is_connected() {
            warn!("PTU not connected; dropping move to ({}, {})", pan, tilt);
            return Err(MoveError::NotConnected);
        }

        let target = self.config.limits.check(pan, tilt).inspect_err(|e| warn!("{}", e))?;
        let packet = CommandPacket::move_absolute(target).inspect_err(|e| warn!("{}", e))?;

        self.send(&packet).await.inspect_err(|e| warn!("{}", e))?;
        self.position.set(target);
        debug!("Moved to {}", target);
        Ok(())
    }

    pub async fn move_to_origin(&mut self) -> Result<(), MoveError> {
        let origin = self.position.origin();
        self.move_absolute(origin.pan, origin.tilt).await
    }

    pub async fn pan_absolute(&mut self, pan: i32) -> Result<(), MoveError> {
        let current = self.anchored()?;
        self.move_absolute(pan, current.tilt).await
    }

    pub async fn tilt_absolute(&mut self, tilt: i32) -> Result<(), MoveError> {
        let current = self.anchored()?;
        self.move_absolute(current.pan, tilt).await
    }

    pub async fn pan_relative(&mut self, delta: i32) -> Result<(), MoveError> {
        self.move_relative(delta, 0).await
    }

    pub async fn tilt_relative(&mut self, delta: i32) -> Result<(), MoveError> {
        self.move_relative(0, delta).await
    }

    pub async fn move_relative(&mut self, dpan: i32, dtilt: i32) -> Result<(), MoveError> {
        let target = self.anchored()?.offset(dpan, dtilt);
        self.move_absolute(target.pan, target.tilt).await
    }

    pub fn set_send_rate(&mut self, ms: u64) {
        self.send_rate = Duration::from_millis(ms);
    }

    pub fn send_rate(&self) -> Duration {
        self.send_rate
    }

    pub fn current_position(&self) -> Option<Position> {
        self.position.current()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn config(&self) -> &PtuConfig {
        &self.config
    }

    pub fn status(&self) -> PtuStatus {
        PtuStatus {
            state: self.state,
            position: self.current_position(),
            send_rate_ms: self.send_rate.as_millis() as u64,
        }
    }

    fn anchored(&self) -> Result<Position, MoveError> {
        if !self.is_connected() {
            return Err(MoveError::NotConnected);
        }
        self.position.current().ok_or(MoveError::PositionUnknown)
    }

    async fn send(&mut self, packet: &CommandPacket) -> Result<(), TransmitError> {
        let result = self.transport.write(packet.as_bytes()).await;

        // Pacing applies once bytes may have left, whatever the outcome.
        tokio::time::sleep(self.send_rate).await;

        let written = result?;
        if written < PACKET_SIZE {
            return Err(TransmitError::ShortWrite {
                expected: PACKET_SIZE,
                written,
            });
        }
        Ok(())
    }
}

impl<T: Transport> Drop for Controller<T> {
    fn drop(&mut self) {
        self.disconnect();
    }
}
