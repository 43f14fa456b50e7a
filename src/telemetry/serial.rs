//! Opening the configured serial endpoint

use std::time::Duration;

use serialport::SerialPort;

use super::TelemetryError;
use crate::settings::SerialSettings;

/// Open the sensor's serial port with the configured bit rate and read timeout
pub fn open(settings: &SerialSettings) -> Result<Box<dyn SerialPort>, TelemetryError> {
    serialport::new(settings.port.as_str(), settings.baud_rate)
        .timeout(Duration::from_millis(settings.timeout_ms))
        .open()
        .map_err(|source| TelemetryError::Open {
            endpoint: settings.port.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_port_is_an_error() {
        let settings = SerialSettings {
            port: "/definitely/not/a/serial/port".into(),
            ..SerialSettings::default()
        };
        let err = open(&settings).err().unwrap();
        assert!(matches!(
            err,
            TelemetryError::Open { ref endpoint, .. } if endpoint == "/definitely/not/a/serial/port"
        ));
        assert!(err.to_string().contains("couldn't open serial port"));
    }
}
