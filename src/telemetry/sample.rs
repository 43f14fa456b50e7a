//! Sensor samples and the telemetry line parser
//!
//! Wire format: `ax,ay,az[,btn]`, signed decimal integers separated by commas.

/// One accelerometer reading from the motion sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSample {
    pub ax: i32,
    pub ay: i32,
    pub az: i32,
    /// Button flag, absent when not sent or not a number
    pub button: Option<i32>,
}

impl SensorSample {
    pub fn new(ax: i32, ay: i32, az: i32) -> Self {
        Self {
            ax,
            ay,
            az,
            button: None,
        }
    }

    pub fn with_button(mut self, button: i32) -> Self {
        self.button = Some(button);
        self
    }
}

/// Parse a telemetry line into a sample.
///
/// Empty tokens are skipped. Returns `None` when fewer than three tokens remain
/// or any of the first three is not an integer. A fourth token that fails to
/// parse leaves `button` empty instead of rejecting the line; anything after the
/// fourth token is ignored.
pub fn parse_line(line: &str) -> Option<SensorSample> {
    let mut tokens = line.split(',').map(str::trim).filter(|t| !t.is_empty());

    let ax = tokens.next()?.parse().ok()?;
    let ay = tokens.next()?.parse().ok()?;
    let az = tokens.next()?.parse().ok()?;
    let button = tokens.next().and_then(|t| t.parse().ok());

    Some(SensorSample { ax, ay, az, button })
}
