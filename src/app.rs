use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{AgroDoseError, Result};
use crate::logic::{dosage, safety, DosageEngine, WeatherAdvice};
use crate::models::{
    ApplicationPlan, ApplicationRecord, CompatibilityResult, CropRecord, EnvironmentalReading,
    EquipmentId, PesticideRecord,
};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Caller-owned state of one calculation form.
///
/// Holds the selections, the acknowledged protective equipment and the last
/// computed plan. Each successful `calculate` replaces `current_plan`.
pub struct App {
    pub catalog: Catalog,
    pub config: Config,
    engine: DosageEngine,
    pub pesticide_id: Option<u32>,
    pub crop_id: Option<u32>,
    pub area_ha: Option<f64>,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub wind_kmh: Option<f64>,
    pub acknowledged: BTreeSet<EquipmentId>,
    current_plan: Option<ApplicationPlan>,
}

impl App {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let area = config.default_area_ha;
        Self {
            catalog,
            config,
            engine: DosageEngine::new(),
            pesticide_id: None,
            crop_id: None,
            area_ha: Some(area),
            temperature_c: None,
            humidity_pct: None,
            wind_kmh: None,
            acknowledged: BTreeSet::new(),
            current_plan: None,
        }
    }

    pub fn select_pesticide(&mut self, id: u32) -> Result<&PesticideRecord> {
        let pesticide = self.catalog.pesticide(id)?;
        self.pesticide_id = Some(id);
        Ok(pesticide)
    }

    pub fn select_crop(&mut self, id: u32) -> Result<&CropRecord> {
        let crop = self.catalog.crop(id)?;
        self.crop_id = Some(id);
        Ok(crop)
    }

    /// Select a crop from a scanned lot label and take its area.
    pub fn apply_lot_scan(&mut self, crop_name: &str, area_ha: f64) -> Result<&CropRecord> {
        let crop = self
            .catalog
            .find_crop_by_name(crop_name)
            .ok_or_else(|| AgroDoseError::NotFound(format!("crop '{}'", crop_name)))?;
        self.crop_id = Some(crop.id);
        self.area_ha = Some(area_ha);
        Ok(crop)
    }

    pub fn acknowledge(&mut self, item: impl Into<EquipmentId>) {
        self.acknowledged.insert(item.into());
    }

    pub fn reading(&self) -> EnvironmentalReading {
        EnvironmentalReading::from_inputs(self.temperature_c, self.humidity_pct, self.wind_kmh)
    }

    pub fn weather_advice(&self) -> WeatherAdvice {
        WeatherAdvice::assess(&self.reading())
    }

    fn selected_pesticide(&self) -> Option<&PesticideRecord> {
        self.pesticide_id
            .and_then(|id| self.catalog.find_pesticide_by_id(id))
    }

    fn selected_crop(&self) -> Option<&CropRecord> {
        self.crop_id.and_then(|id| self.catalog.find_crop_by_id(id))
    }

    /// `None` until both a pesticide and a crop resolve.
    pub fn compatibility(&self) -> Option<CompatibilityResult> {
        let pesticide = self.selected_pesticide()?;
        let crop = self.selected_crop()?;
        Some(self.engine.compatibility(pesticide, crop))
    }

    /// Required equipment not yet acknowledged for the selected pesticide.
    pub fn missing_equipment(&self) -> BTreeSet<EquipmentId> {
        match self.selected_pesticide() {
            Some(pesticide) => safety::missing_equipment(pesticide, &self.acknowledged),
            None => BTreeSet::new(),
        }
    }

    pub fn calculate<F>(&mut self, confirm_override: F) -> Result<Option<&ApplicationPlan>>
    where
        F: FnOnce(&CompatibilityResult) -> bool,
    {
        let today = chrono::Local::now().date_naive();
        self.calculate_on(today, confirm_override)
    }

    /// Run the dosage engine on the current form.
    ///
    /// An incompatible pairing asks `confirm_override`; a declined override
    /// returns `Ok(None)` and leaves the current plan untouched.
    pub fn calculate_on<F>(
        &mut self,
        today: NaiveDate,
        confirm_override: F,
    ) -> Result<Option<&ApplicationPlan>>
    where
        F: FnOnce(&CompatibilityResult) -> bool,
    {
        let (pesticide_id, crop_id, area_ha) = match (self.pesticide_id, self.crop_id, self.area_ha)
        {
            (Some(p), Some(c), Some(a)) => (p, c, a),
            _ => {
                return Err(AgroDoseError::Validation(
                    "Complete all required fields: pesticide, crop and area".into(),
                ))
            }
        };

        // Input errors halt the calculation before any override prompt
        let reading = self.reading();
        dosage::validate_area(area_ha)?;
        dosage::validate_reading(&reading)?;

        let pesticide = self.catalog.pesticide(pesticide_id)?;
        let crop = self.catalog.crop(crop_id)?;

        let compatibility = self.engine.compatibility(pesticide, crop);
        if !compatibility.compatible && !confirm_override(&compatibility) {
            tracing::info!(
                pesticide = %pesticide.name,
                crop = %crop.name,
                "Calculation cancelled after compatibility warning"
            );
            return Ok(None);
        }

        let plan = self
            .engine
            .compute_plan_on(pesticide, crop, area_ha, &reading, today)?;

        self.current_plan = Some(plan);
        Ok(self.current_plan.as_ref())
    }

    pub fn current_plan(&self) -> Option<&ApplicationPlan> {
        self.current_plan.as_ref()
    }

    /// Turn the current plan into an application record and reset the form.
    pub fn register(&mut self, notes: &str) -> Result<ApplicationRecord> {
        let plan = self.current_plan.take().ok_or_else(|| {
            AgroDoseError::Validation("Run a calculation before registering".into())
        })?;

        let record = ApplicationRecord::new(plan).with_notes(notes);
        tracing::info!(
            pesticide = %record.plan.pesticide.name,
            crop = %record.plan.crop.name,
            total = record.plan.total_quantity,
            "Application registered"
        );

        self.clear();
        Ok(record)
    }

    pub fn clear(&mut self) {
        self.pesticide_id = None;
        self.crop_id = None;
        self.area_ha = Some(self.config.default_area_ha);
        self.temperature_c = None;
        self.humidity_pct = None;
        self.wind_kmh = None;
        self.acknowledged.clear();
        self.current_plan = None;
    }
}
