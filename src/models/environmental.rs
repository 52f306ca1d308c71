use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;
pub const DEFAULT_HUMIDITY_PCT: f64 = 60.0;
pub const DEFAULT_WIND_KMH: f64 = 5.0;

/// Ambient conditions at the time of application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_kmh: f64,
}

impl EnvironmentalReading {
    pub fn new(temperature_c: f64, humidity_pct: f64, wind_kmh: f64) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            wind_kmh,
        }
    }

    /// Build a reading from optional inputs, filling gaps with 25°C / 60% / 5 km/h.
    pub fn from_inputs(
        temperature_c: Option<f64>,
        humidity_pct: Option<f64>,
        wind_kmh: Option<f64>,
    ) -> Self {
        Self {
            temperature_c: temperature_c.unwrap_or(DEFAULT_TEMPERATURE_C),
            humidity_pct: humidity_pct.unwrap_or(DEFAULT_HUMIDITY_PCT),
            wind_kmh: wind_kmh.unwrap_or(DEFAULT_WIND_KMH),
        }
    }

    /// Returns the name of the first non-numeric field, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("temperature", self.temperature_c),
            ("humidity", self.humidity_pct),
            ("wind speed", self.wind_kmh),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

impl Default for EnvironmentalReading {
    fn default() -> Self {
        Self::from_inputs(None, None, None)
    }
}
