use super::{CropRecord, EnvironmentalReading, PesticideRecord};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Result of one dosage calculation. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPlan {
    pub pesticide: PesticideRecord,
    pub crop: CropRecord,
    pub area_ha: f64,
    pub environmental_factor: f64,
    pub adjusted_dose: f64,
    pub total_quantity: f64,
    pub final_carency_days: u32,
    pub next_application: NaiveDate,
    pub conditions: EnvironmentalReading,
    pub created_at: DateTime<Utc>,
}

impl ApplicationPlan {
    /// A zero factor means conditions forbid spraying, not a calculation error.
    pub fn application_suppressed(&self) -> bool {
        self.environmental_factor == 0.0
    }

    pub fn dose_display(&self) -> String {
        format!("{:.3} {}", self.adjusted_dose, self.pesticide.dose_unit)
    }

    pub fn total_display(&self) -> String {
        format!(
            "{:.3} {}",
            self.total_quantity,
            self.pesticide.quantity_unit()
        )
    }

    pub fn carency_display(&self) -> String {
        format!("{} días", self.final_carency_days)
    }

    pub fn next_application_display(&self, date_format: &str) -> String {
        self.next_application.format(date_format).to_string()
    }

    /// Compares every field except `created_at`.
    pub fn same_outcome(&self, other: &ApplicationPlan) -> bool {
        self.pesticide == other.pesticide
            && self.crop == other.crop
            && self.area_ha == other.area_ha
            && self.environmental_factor == other.environmental_factor
            && self.adjusted_dose == other.adjusted_dose
            && self.total_quantity == other.total_quantity
            && self.final_carency_days == other.final_carency_days
            && self.next_application == other.next_application
            && self.conditions == other.conditions
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub pesticide_id: u32,
    pub crop_id: u32,
    pub compatible: bool,
}

/// A plan confirmed by the operator, ready to hand to a record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub plan: ApplicationPlan,
    pub applied_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl ApplicationRecord {
    pub fn new(plan: ApplicationPlan) -> Self {
        Self {
            plan,
            applied_at: Utc::now(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        let trimmed = notes.trim();
        if !trimmed.is_empty() {
            self.notes = Some(trimmed.to_string());
        }
        self
    }

    pub fn summary(&self) -> String {
        format!(
            "Aplicación registrada para {} con {}",
            self.plan.crop.name, self.plan.pesticide.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropCategory, ToxicityClass};

    fn sample_plan() -> ApplicationPlan {
        ApplicationPlan {
            pesticide: PesticideRecord::new(1, "Glifosato", "Herbicida", ToxicityClass::Media)
                .with_dose(2.0, "L/ha"),
            crop: CropRecord::new(1, "Maíz", CropCategory::Grano),
            area_ha: 3.0,
            environmental_factor: 1.0,
            adjusted_dose: 2.0,
            total_quantity: 6.0,
            final_carency_days: 14,
            next_application: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            conditions: EnvironmentalReading::new(25.0, 70.0, 3.0),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn display_helpers() {
        let plan = sample_plan();
        assert_eq!(plan.dose_display(), "2.000 L/ha");
        assert_eq!(plan.total_display(), "6.000 L");
        assert_eq!(plan.carency_display(), "14 días");
        assert_eq!(
            plan.next_application_display(DEFAULT_DATE_FORMAT),
            "15/03/2024"
        );
    }

    #[test]
    fn same_outcome_ignores_timestamp() {
        let a = sample_plan();
        let mut b = a.clone();
        b.created_at = a.created_at + chrono::Duration::seconds(5);
        assert!(a.same_outcome(&b));
        assert_ne!(a, b);

        b.total_quantity = 7.0;
        assert!(!a.same_outcome(&b));
    }

    #[test]
    fn suppressed_only_on_zero_factor() {
        let mut plan = sample_plan();
        assert!(!plan.application_suppressed());
        plan.environmental_factor = 0.0;
        assert!(plan.application_suppressed());
    }

    #[test]
    fn record_notes_are_trimmed() {
        let record = ApplicationRecord::new(sample_plan()).with_notes("  lote norte ");
        assert_eq!(record.notes.as_deref(), Some("lote norte"));

        let record = ApplicationRecord::new(sample_plan()).with_notes("   ");
        assert!(record.notes.is_none());
        assert_eq!(record.summary(), "Aplicación registrada para Maíz con Glifosato");
    }
}
