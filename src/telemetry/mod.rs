//! Motion sensor telemetry
//!
//! A background reader pulls newline-delimited `ax,ay,az[,btn]` text from the
//! sensor link into a bounded buffer; the main loop polls the newest line once
//! per frame and never waits for data.

pub mod channel;
pub mod ring;
pub mod sample;
pub mod serial;

pub use channel::{LineSplitter, TelemetryChannel};
pub use ring::{LineConsumer, LineProducer, bounded};
pub use sample::{SensorSample, parse_line};

/// Failure opening the sensor link. It never reaches the game loop; the channel
/// logs it and carries on without data.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("couldn't open serial port {endpoint}: {source}")]
    Open {
        endpoint: String,
        #[source]
        source: serialport::Error,
    },
}
