use glam::Vec3;
use std::fmt;
use std::time::Duration;

/// One of the eight compass points. North is world +Z, east is world +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompassLabel {
    #[default]
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassLabel {
    const ORDER: [CompassLabel; 8] = [
        CompassLabel::N,
        CompassLabel::NE,
        CompassLabel::E,
        CompassLabel::SE,
        CompassLabel::S,
        CompassLabel::SW,
        CompassLabel::W,
        CompassLabel::NW,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassLabel::N => "N",
            CompassLabel::NE => "NE",
            CompassLabel::E => "E",
            CompassLabel::SE => "SE",
            CompassLabel::S => "S",
            CompassLabel::SW => "SW",
            CompassLabel::W => "W",
            CompassLabel::NW => "NW",
        }
    }
}

impl fmt::Display for CompassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Maps a facing vector to a compass point.
pub struct CompassReporter;

impl CompassReporter {
    /// Heading of `forward` in degrees, clockwise from north: `atan2(x, z)`.
    pub fn heading_degrees(forward: Vec3) -> f32 {
        forward.x.atan2(forward.z).to_degrees()
    }

    /// Nearest of the eight points; halfway headings round toward the next
    /// point clockwise.
    pub fn sample(forward: Vec3) -> CompassLabel {
        let sector = (Self::heading_degrees(forward) / 45.0 + 0.5).floor() as i32;
        let index = ((sector % 8) + 8) % 8;
        CompassLabel::ORDER[index as usize]
    }
}

/// Samples the compass on a fixed interval of accumulated frame time.
#[derive(Debug, Clone)]
pub struct CompassSampler {
    interval: Duration,
    since_last: Duration,
    last: Option<CompassLabel>,
}

impl CompassSampler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            since_last: Duration::ZERO,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Most recent sample, if the timer has fired at least once.
    pub fn last(&self) -> Option<CompassLabel> {
        self.last
    }

    /// Advance the timer by `elapsed`. Returns a fresh label whenever the
    /// interval has run out; a long stall yields one sample, not a burst.
    pub fn poll(&mut self, elapsed: Duration, forward: Vec3) -> Option<CompassLabel> {
        self.since_last += elapsed;
        if self.since_last < self.interval {
            return None;
        }
        self.since_last = if self.interval.is_zero() {
            Duration::ZERO
        } else {
            Duration::from_nanos((self.since_last.as_nanos() % self.interval.as_nanos()) as u64)
        };

        let label = CompassReporter::sample(forward);
        if self.last != Some(label) {
            tracing::debug!(%label, "compass heading changed");
        }
        self.last = Some(label);
        Some(label)
    }
}
