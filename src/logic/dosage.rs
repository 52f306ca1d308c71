use super::{carency, compatibility, environmental_factor};
use crate::error::{AgroDoseError, Result};
use crate::models::{
    ApplicationPlan, CompatibilityResult, CropRecord, EnvironmentalReading, PesticideRecord,
};
use chrono::{Days, Local, NaiveDate, Utc};

/// Combines the environmental and carency models into an application plan.
///
/// Stateless; the caller owns whatever "current plan" it keeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct DosageEngine;

impl DosageEngine {
    pub fn new() -> Self {
        Self
    }

    /// Advisory pairing check; never blocks `compute_plan`.
    pub fn compatibility(
        &self,
        pesticide: &PesticideRecord,
        crop: &CropRecord,
    ) -> CompatibilityResult {
        compatibility::check(pesticide, crop)
    }

    pub fn compute_plan(
        &self,
        pesticide: &PesticideRecord,
        crop: &CropRecord,
        area_ha: f64,
        reading: &EnvironmentalReading,
    ) -> Result<ApplicationPlan> {
        self.compute_plan_on(pesticide, crop, area_ha, reading, Local::now().date_naive())
    }

    /// Same as [`compute_plan`](Self::compute_plan) with an explicit calendar date for "today".
    pub fn compute_plan_on(
        &self,
        pesticide: &PesticideRecord,
        crop: &CropRecord,
        area_ha: f64,
        reading: &EnvironmentalReading,
        today: NaiveDate,
    ) -> Result<ApplicationPlan> {
        validate_area(area_ha)?;
        validate_reading(reading)?;
        pesticide.validate().map_err(AgroDoseError::Validation)?;
        crop.validate().map_err(AgroDoseError::Validation)?;

        let base_adjusted = pesticide.base_dose_rate * crop.dose_factor;
        let factor = environmental_factor::factor_for(reading);
        let adjusted_dose = base_adjusted * factor;
        let total_quantity = adjusted_dose * area_ha;

        let final_carency_days = carency::final_carency(
            pesticide.base_carency_days,
            &crop.category,
            reading.temperature_c,
            pesticide.toxicity,
        );

        let next_application = today
            .checked_add_days(Days::new(u64::from(final_carency_days)))
            .ok_or_else(|| {
                AgroDoseError::Validation(format!(
                    "next application date out of range ({} + {} days)",
                    today, final_carency_days
                ))
            })?;

        if factor == 0.0 {
            tracing::warn!(
                wind_kmh = reading.wind_kmh,
                "Environmental factor is zero - do not apply under current wind"
            );
        }

        tracing::debug!(
            pesticide = %pesticide.name,
            crop = %crop.name,
            area_ha,
            factor,
            adjusted_dose,
            total_quantity,
            final_carency_days,
            "Computed application plan"
        );

        Ok(ApplicationPlan {
            pesticide: pesticide.clone(),
            crop: crop.clone(),
            area_ha,
            environmental_factor: factor,
            adjusted_dose,
            total_quantity,
            final_carency_days,
            next_application,
            conditions: *reading,
            created_at: Utc::now(),
        })
    }
}

pub fn validate_area(area_ha: f64) -> Result<()> {
    if !area_ha.is_finite() || area_ha <= 0.0 {
        return Err(AgroDoseError::Validation(format!(
            "area must be a positive number of hectares, got {}",
            area_ha
        )));
    }
    Ok(())
}

pub fn validate_reading(reading: &EnvironmentalReading) -> Result<()> {
    if let Some(field) = reading.first_non_finite() {
        return Err(AgroDoseError::Validation(format!(
            "{} reading is not a number",
            field
        )));
    }
    Ok(())
}
