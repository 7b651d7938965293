//! Hardcoded demo series shown on the dashboard.
//!
//! There is no acquisition pipeline behind these numbers; they are fixed
//! literals that live for the whole program.

/// Samples per series
pub const SAMPLE_COUNT: usize = 7;

/// X-axis labels, one per sample
pub const SAMPLE_LABELS: [&str; SAMPLE_COUNT] = ["T1", "T2", "T3", "T4", "T5", "T6", "T7"];

/// Number of dashboard series
pub const SERIES_COUNT: usize = 4;

/// One metric shown as a chart card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSeries {
    /// Card title, including the unit
    pub title: &'static str,
    pub samples: [f32; SAMPLE_COUNT],
}

impl SensorSeries {
    /// Most recent sample
    pub fn latest(&self) -> f32 {
        self.samples[SAMPLE_COUNT - 1]
    }
}

/// The four dashboard metrics, in display order
pub static SENSOR_SERIES: [SensorSeries; SERIES_COUNT] = [
    SensorSeries {
        title: "Sensor 1 · Force (N)",
        samples: [10.0, 14.0, 13.0, 18.0, 20.0, 22.0, 21.0],
    },
    SensorSeries {
        title: "Sensor 2 · Position (mm)",
        samples: [30.0, 28.0, 32.0, 35.0, 34.0, 36.0, 39.0],
    },
    SensorSeries {
        title: "Sensor 3 · Angle (°)",
        samples: [5.0, 7.0, 6.0, 8.0, 9.0, 7.0, 10.0],
    },
    SensorSeries {
        title: "Sensor 4 · Load (%)",
        samples: [60.0, 62.0, 61.0, 65.0, 67.0, 66.0, 70.0],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_is_last_sample() {
        let latest: [f32; 4] = SENSOR_SERIES.map(|series| series.latest());
        assert_eq!(latest, [21.0, 39.0, 10.0, 70.0]);
    }
}
