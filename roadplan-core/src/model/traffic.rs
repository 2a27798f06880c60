//! Time-of-day congestion schedule

use serde::{Deserialize, Serialize};

use crate::{Error, Minutes, wrap_clock};

const HOURS_PER_DAY: usize = 24;

/// Half-open band `[start_hour, end_hour)` with its congestion factor.
/// Lower factors mean slower traffic, `1.0` is free flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficBand {
    pub start_hour: u8,
    pub end_hour: u8,
    pub factor: f64,
}

impl TrafficBand {
    pub const fn new(start_hour: u8, end_hour: u8, factor: f64) -> Self {
        Self {
            start_hour,
            end_hour,
            factor,
        }
    }
}

/// Congestion bands covering every hour of the day exactly once.
///
/// Wrap-around periods are written as two bands (`21-24` and `0-7`).
/// Lookups use the hour component of the clock only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TrafficBand>", into = "Vec<TrafficBand>")]
pub struct TrafficSchedule {
    bands: Vec<TrafficBand>,
    by_hour: [f64; HOURS_PER_DAY],
}

impl TrafficSchedule {
    /// Validates the bands and builds the hourly lookup table.
    ///
    /// # Errors
    ///
    /// Fails when a band is malformed, when two bands overlap or when an hour
    /// is left uncovered.
    pub fn new(bands: Vec<TrafficBand>) -> Result<Self, Error> {
        let mut by_hour = [None; HOURS_PER_DAY];

        for band in &bands {
            let invalid = |reason| Error::InvalidTrafficBand {
                start_hour: band.start_hour,
                end_hour: band.end_hour,
                reason,
            };
            if band.start_hour >= band.end_hour {
                return Err(invalid("start must precede end"));
            }
            if usize::from(band.end_hour) > HOURS_PER_DAY {
                return Err(invalid("end hour must not exceed 24"));
            }
            if !band.factor.is_finite() || band.factor < 0.0 {
                return Err(invalid("factor must be a non-negative number"));
            }

            for hour in band.start_hour..band.end_hour {
                let slot = &mut by_hour[usize::from(hour)];
                if slot.is_some() {
                    return Err(Error::TrafficScheduleOverlap { hour });
                }
                *slot = Some(band.factor);
            }
        }

        let mut table = [0.0; HOURS_PER_DAY];
        for (hour, (slot, factor)) in table.iter_mut().zip(by_hour).enumerate() {
            *slot = factor.ok_or(Error::TrafficScheduleGap {
                hour: u8::try_from(hour).unwrap_or(u8::MAX),
            })?;
        }

        Ok(Self {
            bands,
            by_hour: table,
        })
    }

    /// Schedule without any congestion
    pub fn free_flow() -> Self {
        Self {
            bands: vec![TrafficBand::new(0, 24, 1.0)],
            by_hour: [1.0; HOURS_PER_DAY],
        }
    }

    pub fn bands(&self) -> &[TrafficBand] {
        &self.bands
    }

    /// Congestion factor for the hour containing `clock` (minutes since
    /// midnight, wrapped into the day)
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn congestion_at(&self, clock: Minutes) -> f64 {
        let hour = (wrap_clock(clock) / 60.0).floor() as usize;
        self.by_hour[hour.min(HOURS_PER_DAY - 1)]
    }
}

impl Default for TrafficSchedule {
    fn default() -> Self {
        Self {
            bands: vec![
                TrafficBand::new(7, 9, 0.4),
                TrafficBand::new(9, 12, 0.8),
                TrafficBand::new(12, 14, 0.9),
                TrafficBand::new(14, 16, 0.7),
                TrafficBand::new(16, 19, 0.3),
                TrafficBand::new(19, 21, 0.6),
                TrafficBand::new(21, 24, 1.0),
                TrafficBand::new(0, 7, 1.0),
            ],
            by_hour: [
                1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, // 00-07
                0.4, 0.4, // 07-09
                0.8, 0.8, 0.8, // 09-12
                0.9, 0.9, // 12-14
                0.7, 0.7, // 14-16
                0.3, 0.3, 0.3, // 16-19
                0.6, 0.6, // 19-21
                1.0, 1.0, 1.0, // 21-24
            ],
        }
    }
}

impl TryFrom<Vec<TrafficBand>> for TrafficSchedule {
    type Error = Error;

    fn try_from(bands: Vec<TrafficBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<TrafficSchedule> for Vec<TrafficBand> {
    fn from(schedule: TrafficSchedule) -> Self {
        schedule.bands
    }
}
