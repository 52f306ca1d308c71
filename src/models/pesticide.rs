use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a protective-equipment item (e.g. "guantes", "mascarilla").
pub type EquipmentId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToxicityClass {
    #[serde(alias = "High", alias = "alta")]
    Alta,
    #[serde(alias = "Medium", alias = "media")]
    Media,
    #[serde(alias = "Low", alias = "baja")]
    Baja,
}

impl ToxicityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToxicityClass::Alta => "Alta",
            ToxicityClass::Media => "Media",
            ToxicityClass::Baja => "Baja",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "alta" | "high" => Some(ToxicityClass::Alta),
            "media" | "medium" => Some(ToxicityClass::Media),
            "baja" | "low" => Some(ToxicityClass::Baja),
            _ => None,
        }
    }

    pub fn all() -> &'static [ToxicityClass] {
        &[ToxicityClass::Alta, ToxicityClass::Media, ToxicityClass::Baja]
    }
}

impl std::fmt::Display for ToxicityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PesticideRecord {
    pub id: u32,
    pub name: String,
    /// Product category, e.g. "Herbicida", "Insecticida", "Fungicida".
    #[serde(rename = "type")]
    pub pesticide_type: String,
    /// Chemical class shown alongside the product.
    #[serde(default)]
    pub class: Option<String>,
    pub toxicity: ToxicityClass,
    pub base_dose_rate: f64,
    /// Dose unit per area, e.g. "L/ha" or "kg/ha".
    pub dose_unit: String,
    pub base_carency_days: u32,
    #[serde(default)]
    pub permitted_crops: BTreeSet<u32>,
    #[serde(default)]
    pub required_equipment: BTreeSet<EquipmentId>,
    #[serde(default)]
    pub uses: Vec<String>,
}

impl PesticideRecord {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        pesticide_type: impl Into<String>,
        toxicity: ToxicityClass,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            pesticide_type: pesticide_type.into(),
            class: None,
            toxicity,
            base_dose_rate: 0.0,
            dose_unit: "L/ha".to_string(),
            base_carency_days: 0,
            permitted_crops: BTreeSet::new(),
            required_equipment: BTreeSet::new(),
            uses: Vec::new(),
        }
    }

    pub fn with_dose(mut self, rate: f64, unit: &str) -> Self {
        self.base_dose_rate = rate;
        self.dose_unit = unit.to_string();
        self
    }

    pub fn with_carency(mut self, days: u32) -> Self {
        self.base_carency_days = days;
        self
    }

    pub fn with_permitted_crops(mut self, crops: impl IntoIterator<Item = u32>) -> Self {
        self.permitted_crops.extend(crops);
        self
    }

    pub fn with_equipment<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EquipmentId>,
    {
        self.required_equipment
            .extend(items.into_iter().map(Into::into));
        self
    }

    /// Unit of the total quantity: the numerator of the dose unit ("L/ha" -> "L").
    pub fn quantity_unit(&self) -> &str {
        self.dose_unit
            .split('/')
            .next()
            .unwrap_or(self.dose_unit.as_str())
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !self.base_dose_rate.is_finite() || self.base_dose_rate < 0.0 {
            return Err(format!(
                "pesticide {} has invalid base dose rate {}",
                self.id, self.base_dose_rate
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toxicity_from_str_valid() {
        assert_eq!(ToxicityClass::from_str("Alta"), Some(ToxicityClass::Alta));
        assert_eq!(ToxicityClass::from_str("media"), Some(ToxicityClass::Media));
        assert_eq!(ToxicityClass::from_str("LOW"), Some(ToxicityClass::Baja));
        assert_eq!(ToxicityClass::from_str(" high "), Some(ToxicityClass::Alta));
    }

    #[test]
    fn toxicity_from_str_invalid() {
        assert_eq!(ToxicityClass::from_str(""), None);
        assert_eq!(ToxicityClass::from_str("extrema"), None);
    }

    #[test]
    fn toxicity_display_matches_from_str() {
        for class in ToxicityClass::all() {
            assert_eq!(ToxicityClass::from_str(&class.to_string()), Some(*class));
        }
    }

    #[test]
    fn toxicity_rejects_unknown_class_in_yaml() {
        let parsed: std::result::Result<ToxicityClass, _> = serde_yaml::from_str("Extrema");
        assert!(parsed.is_err());
        let parsed: ToxicityClass = serde_yaml::from_str("High").unwrap();
        assert_eq!(parsed, ToxicityClass::Alta);
    }

    #[test]
    fn quantity_unit_uses_numerator() {
        let p = PesticideRecord::new(1, "Glifosato", "Herbicida", ToxicityClass::Media)
            .with_dose(2.0, "L/ha");
        assert_eq!(p.quantity_unit(), "L");

        let p = p.with_dose(1.5, "kg");
        assert_eq!(p.quantity_unit(), "kg");
    }

    #[test]
    fn builder_collects_sets() {
        let p = PesticideRecord::new(7, "Mancozeb", "Fungicida", ToxicityClass::Baja)
            .with_permitted_crops([3, 1, 3])
            .with_equipment(["guantes", "botas", "guantes"]);

        assert_eq!(p.permitted_crops.len(), 2);
        assert!(p.permitted_crops.contains(&1));
        assert_eq!(p.required_equipment.len(), 2);
        assert!(p.required_equipment.contains("botas"));
    }

    #[test]
    fn validate_rejects_negative_dose() {
        let p = PesticideRecord::new(1, "X", "Herbicida", ToxicityClass::Baja)
            .with_dose(-1.0, "L/ha");
        assert!(p.validate().is_err());
        let p = p.with_dose(f64::NAN, "L/ha");
        assert!(p.validate().is_err());
        let p = p.with_dose(0.0, "L/ha");
        assert!(p.validate().is_ok());
    }
}
