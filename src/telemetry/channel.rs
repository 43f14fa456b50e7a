//! Background telemetry reader
//!
//! The reader thread owns the connection and the producer half of the line
//! buffer. The main loop owns the `TelemetryChannel` (consumer half plus the stop
//! signal). No other state crosses the thread boundary.

use std::io::{ErrorKind, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::TelemetryError;
use super::ring::{self, LineConsumer, LineProducer};
use super::sample::{SensorSample, parse_line};
use crate::consts::{READER_ERROR_BACKOFF_MS, READER_IDLE_MS, TELEMETRY_CAPACITY};
use crate::settings::SerialSettings;

/// Longest partial line kept while waiting for a terminator
const MAX_PENDING_BYTES: usize = 4096;

/// Splits a byte stream into trimmed text lines.
///
/// Undecodable bytes are dropped rather than rejecting the line.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    /// Feed raw bytes, returning every complete non-empty line
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in bytes {
            if byte == b'\n' {
                let raw = std::mem::take(&mut self.pending);
                let text = String::from_utf8_lossy(&raw).replace(char::REPLACEMENT_CHARACTER, "");
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    lines.push(trimmed.to_string());
                }
            } else {
                if self.pending.len() >= MAX_PENDING_BYTES {
                    // Runaway line with no terminator
                    self.pending.clear();
                }
                self.pending.push(byte);
            }
        }
        lines
    }
}

/// Handle to the background reader
pub struct TelemetryChannel {
    latest: LineConsumer,
    running: Arc<AtomicBool>,
    connected: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TelemetryChannel {
    /// Start a reader on the configured serial port. Failure to open is logged,
    /// never returned: the channel then simply yields no data.
    pub fn open_serial(settings: &SerialSettings) -> Self {
        if !settings.enabled {
            log::info!("[telemetry] Serial input disabled, keyboard only");
            return Self::disconnected();
        }
        let serial = settings.clone();
        Self::spawn(
            move || super::serial::open(&serial),
            Duration::from_millis(settings.settle_ms),
        )
    }

    /// A channel with no reader behind it
    pub fn disconnected() -> Self {
        let (_, latest) = ring::bounded(TELEMETRY_CAPACITY);
        Self {
            latest,
            running: Arc::new(AtomicBool::new(false)),
            connected: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Start a reader over any byte source. `open` runs on the reader thread,
    /// followed by `settle` (device reset time) before the first read.
    pub fn spawn<F, R>(open: F, settle: Duration) -> Self
    where
        F: FnOnce() -> Result<R, TelemetryError> + Send + 'static,
        R: Read + Send + 'static,
    {
        let (producer, latest) = ring::bounded(TELEMETRY_CAPACITY);
        let running = Arc::new(AtomicBool::new(true));
        let connected = Arc::new(AtomicBool::new(false));

        let thread_running = Arc::clone(&running);
        let thread_connected = Arc::clone(&connected);
        let spawned = thread::Builder::new()
            .name("telemetry-reader".into())
            .spawn(move || {
                let reader = match open() {
                    Ok(reader) => reader,
                    Err(e) => {
                        log::warn!("[telemetry] {e}; continuing without sensor data");
                        return;
                    }
                };
                if !sleep_while_running(settle, &thread_running) {
                    return;
                }
                thread_connected.store(true, Ordering::Release);
                log::info!("[telemetry] Connected");
                read_lines(reader, &producer, &thread_running);
                thread_connected.store(false, Ordering::Release);
                log::info!("[telemetry] Reader stopped");
            });

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("[telemetry] Couldn't start reader thread: {e}");
                running.store(false, Ordering::Release);
                None
            }
        };

        Self {
            latest,
            running,
            connected,
            handle,
        }
    }

    /// Take the newest line, discarding nothing else. Returns immediately.
    pub fn get_latest(&self) -> Option<String> {
        self.latest.pop_latest()
    }

    /// Take the newest line and parse it; malformed lines yield `None`
    pub fn latest_sample(&self) -> Option<SensorSample> {
        self.get_latest().as_deref().and_then(parse_line)
    }

    /// Whether the reader currently holds an open connection
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Signal the reader to exit. A connected reader is joined, which is bounded
    /// by the link's read timeout. A reader not yet connected is left to
    /// exit on its own once `open` returns. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return;
        };
        if !self.is_connected() && !handle.is_finished() {
            log::debug!("[telemetry] Reader not connected yet; not waiting for it");
            return;
        }
        if handle.join().is_err() {
            log::warn!("[telemetry] Reader thread panicked");
        }
    }
}

impl Drop for TelemetryChannel {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sleep in short slices so a stop request cuts the settle delay short.
/// Returns false if stopped.
fn sleep_while_running(total: Duration, running: &AtomicBool) -> bool {
    let slice = Duration::from_millis(10);
    let mut remaining = total;
    while !remaining.is_zero() {
        if !running.load(Ordering::Acquire) {
            return false;
        }
        let step = remaining.min(slice);
        thread::sleep(step);
        remaining -= step;
    }
    running.load(Ordering::Acquire)
}

fn read_lines<R: Read>(mut reader: R, producer: &LineProducer, running: &AtomicBool) {
    let idle = Duration::from_millis(READER_IDLE_MS);
    let backoff = Duration::from_millis(READER_ERROR_BACKOFF_MS);
    let mut splitter = LineSplitter::default();
    let mut buf = [0u8; 256];

    while running.load(Ordering::Acquire) {
        match reader.read(&mut buf) {
            Ok(0) => thread::sleep(idle),
            Ok(n) => {
                for line in splitter.feed(&buf[..n]) {
                    producer.push(line);
                }
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                thread::sleep(idle)
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                log::warn!("[telemetry] Read error: {e}");
                thread::sleep(backoff);
            }
        }
    }
}
