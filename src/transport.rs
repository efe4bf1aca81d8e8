use crate::config::LinkConfig;
use crate::error::TransportError;
use parking_lot::Mutex;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// Byte link to the PTU.
///
/// Implementations own the physical link exclusively while open. `write`
/// reports how many bytes reached the device; the controller treats anything
/// short of the full frame as a failed send.
pub trait Transport: Send {
    fn open(&mut self, path: &str) -> impl Future<Output = Result<(), TransportError>> + Send;

    fn configure(&mut self, settings: &LinkConfig) -> Result<(), TransportError>;

    fn write(&mut self, bytes: &[u8]) -> impl Future<Output = Result<usize, TransportError>> + Send;

    /// Safe to call when already closed.
    fn close(&mut self);
}

#[derive(Default)]
pub struct SerialTransport {
    port: Option<Arc<Mutex<Box<dyn SerialPort>>>>,
}

impl SerialTransport {
    pub fn new() -> Self {
        SerialTransport { port: None }
    }

    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    #[cfg(unix)]
    fn open_port(path: &str) -> Result<Box<dyn SerialPort>, TransportError> {
        // Baud is applied again in configure(); the builder just needs a value.
        let mut port = serialport::new(path, crate::constants::DEFAULT_BAUD_RATE).open_native()?;
        port.set_exclusive(true)?;
        Ok(Box::new(port))
    }

    #[cfg(not(unix))]
    fn open_port(path: &str) -> Result<Box<dyn SerialPort>, TransportError> {
        Ok(serialport::new(path, crate::constants::DEFAULT_BAUD_RATE).open()?)
    }
}

impl Transport for SerialTransport {
    async fn open(&mut self, path: &str) -> Result<(), TransportError> {
        let path = path.to_string();
        let port = tokio::task::spawn_blocking(move || Self::open_port(&path)).await??;
        self.port = Some(Arc::new(Mutex::new(port)));
        Ok(())
    }

    fn configure(&mut self, settings: &LinkConfig) -> Result<(), TransportError> {
        let port = self.port.as_ref().ok_or(TransportError::NotOpen)?;
        let mut port = port.lock();
        port.set_baud_rate(settings.baud_rate)?;
        port.set_data_bits(DataBits::Eight)?;
        port.set_parity(Parity::None)?;
        port.set_stop_bits(StopBits::One)?;
        port.set_flow_control(FlowControl::None)?;
        port.set_timeout(settings.read_timeout())?;
        info!(
            "Configured {} at {} baud, 8N1, no flow control",
            settings.port, settings.baud_rate
        );
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
        let port = Arc::clone(self.port.as_ref().ok_or(TransportError::NotOpen)?);
        let data = bytes.to_vec();

        let written = tokio::task::spawn_blocking(move || -> Result<usize, TransportError> {
            let mut port = port.lock();
            let written = port.write(&data)?;
            port.flush()?;
            Ok(written)
        })
        .await??;

        debug!("Wrote {} of {} bytes: {:02x?}", written, bytes.len(), bytes);
        Ok(written)
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            info!("Serial link closed");
        }
    }
}
