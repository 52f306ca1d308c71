use super::brackets::{Bound, BracketTable};
use crate::models::EnvironmentalReading;

/// Cooler conditions need more product; heat favours evaporation losses.
pub const TEMPERATURE_FACTORS: BracketTable = BracketTable::new(
    &[
        (Bound::Below(10.0), 1.3),
        (Bound::AtMost(15.0), 1.2),
        (Bound::AtMost(20.0), 1.1),
        (Bound::AtMost(25.0), 1.0),
        (Bound::AtMost(30.0), 0.9),
        (Bound::AtMost(35.0), 0.8),
    ],
    0.6,
);

pub const HUMIDITY_FACTORS: BracketTable = BracketTable::new(
    &[
        (Bound::Below(40.0), 1.2),
        (Bound::AtMost(60.0), 1.1),
        (Bound::AtMost(80.0), 1.0),
        (Bound::AtMost(85.0), 0.9),
    ],
    0.8,
);

/// Wind above 15 km/h is a hard stop: the factor drops to zero.
pub const WIND_FACTORS: BracketTable = BracketTable::new(
    &[
        (Bound::Below(5.0), 1.0),
        (Bound::AtMost(10.0), 0.9),
        (Bound::AtMost(15.0), 0.7),
    ],
    0.0,
);

pub fn temperature_factor(temperature_c: f64) -> f64 {
    TEMPERATURE_FACTORS.lookup(temperature_c)
}

pub fn humidity_factor(humidity_pct: f64) -> f64 {
    HUMIDITY_FACTORS.lookup(humidity_pct)
}

pub fn wind_factor(wind_kmh: f64) -> f64 {
    WIND_FACTORS.lookup(wind_kmh)
}

/// Product of the temperature, humidity and wind sub-factors.
///
/// A result of `0.0` means "do not apply" and must propagate into the dose.
pub fn environmental_factor(temperature_c: f64, humidity_pct: f64, wind_kmh: f64) -> f64 {
    let mut factor = 1.0;
    factor *= temperature_factor(temperature_c);
    factor *= humidity_factor(humidity_pct);
    factor *= wind_factor(wind_kmh);
    factor
}

pub fn factor_for(reading: &EnvironmentalReading) -> f64 {
    environmental_factor(reading.temperature_c, reading.humidity_pct, reading.wind_kmh)
}
