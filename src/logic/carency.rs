use crate::models::{CropCategory, ToxicityClass};

/// Heat above 30°C stretches the interval; above 35°C the second multiplier
/// compounds with the first.
const HEAT_MULTIPLIERS: &[(f64, f64)] = &[(30.0, 1.1), (35.0, 1.2)];

const CEIL_TOLERANCE: f64 = 1e-9;

pub fn category_factor(category: &CropCategory) -> f64 {
    match category {
        CropCategory::Hortaliza => 1.2,
        CropCategory::Grano => 1.0,
        CropCategory::Frutal => 1.5,
        CropCategory::Tuberculo => 1.3,
        CropCategory::Other(_) => 1.0,
    }
}

/// Minimum pre-harvest interval in days for each toxicity class.
pub fn minimum_days(toxicity: ToxicityClass) -> u32 {
    match toxicity {
        ToxicityClass::Alta => 21,
        ToxicityClass::Media => 14,
        ToxicityClass::Baja => 7,
    }
}

/// Final pre-harvest interval in whole days.
///
/// Always rounded up and never below the floor for `toxicity`.
pub fn final_carency(
    base_carency_days: u32,
    category: &CropCategory,
    temperature_c: f64,
    toxicity: ToxicityClass,
) -> u32 {
    let mut carency = f64::from(base_carency_days);
    carency *= category_factor(category);

    for &(threshold, multiplier) in HEAT_MULTIPLIERS {
        if temperature_c > threshold {
            carency *= multiplier;
        }
    }

    carency = carency.max(f64::from(minimum_days(toxicity)));
    // Products like 50 * 1.1 land a hair above the whole day in binary
    (carency - CEIL_TOLERANCE).ceil() as u32
}
