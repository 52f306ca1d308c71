use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CropCategory {
    Hortaliza,
    Grano,
    Frutal,
    Tuberculo,
    /// Any category outside the four known ones; carries the raw label.
    Other(String),
}

impl CropCategory {
    pub fn as_str(&self) -> &str {
        match self {
            CropCategory::Hortaliza => "Hortaliza",
            CropCategory::Grano => "Grano",
            CropCategory::Frutal => "Frutal",
            CropCategory::Tuberculo => "Tubérculo",
            CropCategory::Other(label) => label.as_str(),
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hortaliza" | "vegetable" => CropCategory::Hortaliza,
            "grano" | "grain" => CropCategory::Grano,
            "frutal" | "fruit" | "fruit tree" => CropCategory::Frutal,
            "tubérculo" | "tuberculo" | "tuber" | "root" => CropCategory::Tuberculo,
            _ => CropCategory::Other(s.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CropCategory::Other(_))
    }
}

impl From<String> for CropCategory {
    fn from(s: String) -> Self {
        CropCategory::parse(&s)
    }
}

impl From<CropCategory> for String {
    fn from(c: CropCategory) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for CropCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    pub id: u32,
    pub name: String,
    pub family: String,
    pub category: CropCategory,
    pub dose_factor: f64,
    pub cycle_days: u32,
}

impl CropRecord {
    pub fn new(id: u32, name: impl Into<String>, category: CropCategory) -> Self {
        Self {
            id,
            name: name.into(),
            family: String::new(),
            category,
            dose_factor: 1.0,
            cycle_days: 0,
        }
    }

    pub fn with_family(mut self, family: &str) -> Self {
        self.family = family.to_string();
        self
    }

    pub fn with_dose_factor(mut self, factor: f64) -> Self {
        self.dose_factor = factor;
        self
    }

    pub fn with_cycle(mut self, days: u32) -> Self {
        self.cycle_days = days;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !self.dose_factor.is_finite() || self.dose_factor < 0.0 {
            return Err(format!(
                "crop {} has invalid dose factor {}",
                self.id, self.dose_factor
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_known() {
        assert_eq!(CropCategory::parse("Hortaliza"), CropCategory::Hortaliza);
        assert_eq!(CropCategory::parse("grano"), CropCategory::Grano);
        assert_eq!(CropCategory::parse("FRUTAL"), CropCategory::Frutal);
        assert_eq!(CropCategory::parse("Tubérculo"), CropCategory::Tuberculo);
        assert_eq!(CropCategory::parse("Tuberculo"), CropCategory::Tuberculo);
    }

    #[test]
    fn category_parse_unknown_keeps_label() {
        let c = CropCategory::parse("Forraje");
        assert_eq!(c, CropCategory::Other("Forraje".to_string()));
        assert!(!c.is_known());
        assert_eq!(c.as_str(), "Forraje");
    }

    #[test]
    fn category_serde_uses_display_label() {
        let json = serde_json::to_string(&CropCategory::Tuberculo).unwrap();
        assert_eq!(json, "\"Tubérculo\"");
        let back: CropCategory = serde_yaml::from_str("Tubérculo").unwrap();
        assert_eq!(back, CropCategory::Tuberculo);
    }

    #[test]
    fn crop_builder_pattern() {
        let crop = CropRecord::new(4, "Tomate", CropCategory::Hortaliza)
            .with_family("Solanaceae")
            .with_dose_factor(1.2)
            .with_cycle(120);

        assert_eq!(crop.family, "Solanaceae");
        assert_eq!(crop.dose_factor, 1.2);
        assert_eq!(crop.cycle_days, 120);
        assert!(crop.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_factor() {
        let crop = CropRecord::new(1, "Maíz", CropCategory::Grano).with_dose_factor(-0.5);
        assert!(crop.validate().is_err());
    }
}
