use crate::error::{AgroDoseError, Result};
use crate::models::{CropRecord, PesticideRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.yaml");

/// Static pesticide and crop reference data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub pesticides: Vec<PesticideRecord>,
    #[serde(default)]
    pub crops: Vec<CropRecord>,
}

impl Catalog {
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AgroDoseError::Config(format!("Failed to read catalog {:?}: {}", path, e))
        })?;
        let catalog = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            pesticides = catalog.pesticides.len(),
            crops = catalog.crops.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let catalog: Catalog = serde_yaml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for p in &self.pesticides {
            if !seen.insert(p.id) {
                return Err(AgroDoseError::InvalidCatalog(format!(
                    "duplicate pesticide id {}",
                    p.id
                )));
            }
            p.validate().map_err(AgroDoseError::InvalidCatalog)?;
        }

        seen.clear();
        for c in &self.crops {
            if !seen.insert(c.id) {
                return Err(AgroDoseError::InvalidCatalog(format!(
                    "duplicate crop id {}",
                    c.id
                )));
            }
            c.validate().map_err(AgroDoseError::InvalidCatalog)?;
            if !c.category.is_known() {
                tracing::warn!(
                    crop = %c.name,
                    category = %c.category,
                    "Unknown crop category, using carency factor 1.0"
                );
            }
        }

        for p in &self.pesticides {
            for crop_id in &p.permitted_crops {
                if !seen.contains(crop_id) {
                    tracing::warn!(
                        pesticide = %p.name,
                        crop_id,
                        "Permitted crop id not present in catalog"
                    );
                }
            }
        }
        Ok(())
    }

    pub fn find_pesticide_by_id(&self, id: u32) -> Option<&PesticideRecord> {
        self.pesticides.iter().find(|p| p.id == id)
    }

    pub fn find_crop_by_id(&self, id: u32) -> Option<&CropRecord> {
        self.crops.iter().find(|c| c.id == id)
    }

    /// Case-insensitive exact name match, as produced by a field lot scan.
    pub fn find_crop_by_name(&self, name: &str) -> Option<&CropRecord> {
        let wanted = name.trim().to_lowercase();
        self.crops.iter().find(|c| c.name.to_lowercase() == wanted)
    }

    pub fn pesticide(&self, id: u32) -> Result<&PesticideRecord> {
        self.find_pesticide_by_id(id)
            .ok_or_else(|| AgroDoseError::NotFound(format!("pesticide {}", id)))
    }

    pub fn crop(&self, id: u32) -> Result<&CropRecord> {
        self.find_crop_by_id(id)
            .ok_or_else(|| AgroDoseError::NotFound(format!("crop {}", id)))
    }

    pub fn pesticides_by_type(&self, pesticide_type: &str) -> Vec<&PesticideRecord> {
        self.pesticides
            .iter()
            .filter(|p| p.pesticide_type.eq_ignore_ascii_case(pesticide_type))
            .collect()
    }

    /// Like [`pesticides_by_type`](Self::pesticides_by_type), but an empty
    /// match is `NotFound` naming the types the catalog does carry.
    pub fn require_pesticides_of_type(
        &self,
        pesticide_type: &str,
    ) -> Result<Vec<&PesticideRecord>> {
        let found = self.pesticides_by_type(pesticide_type);
        if found.is_empty() {
            return Err(AgroDoseError::NotFound(format!(
                "pesticides of type '{}' (available: {})",
                pesticide_type,
                self.pesticide_types().join(", ")
            )));
        }
        Ok(found)
    }

    /// Distinct pesticide types in catalog order.
    pub fn pesticide_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for p in &self.pesticides {
            if !types.contains(&p.pesticide_type.as_str()) {
                types.push(p.pesticide_type.as_str());
            }
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropCategory, ToxicityClass};

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.pesticides.is_empty());
        assert!(!catalog.crops.is_empty());

        let papa = catalog.find_crop_by_id(5).unwrap();
        assert_eq!(papa.category, CropCategory::Tuberculo);

        let clorpirifos = catalog.find_pesticide_by_id(2).unwrap();
        assert_eq!(clorpirifos.toxicity, ToxicityClass::Alta);
        assert!(clorpirifos.required_equipment.contains("traje"));
    }

    #[test]
    fn lookups_by_id() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.find_pesticide_by_id(999).is_none());
        assert!(catalog.find_crop_by_id(0).is_none());
        assert!(matches!(
            catalog.pesticide(999),
            Err(AgroDoseError::NotFound(_))
        ));
        assert!(matches!(catalog.crop(999), Err(AgroDoseError::NotFound(_))));
        assert_eq!(catalog.crop(1).unwrap().name, "Maíz");
    }

    #[test]
    fn crop_by_name_ignores_case() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.find_crop_by_name("tomate").unwrap().id, 4);
        assert_eq!(catalog.find_crop_by_name(" MAÍZ ").unwrap().id, 1);
        assert!(catalog.find_crop_by_name("Arroz").is_none());
    }

    #[test]
    fn filter_by_type() {
        let catalog = Catalog::builtin().unwrap();
        let fungicides = catalog.pesticides_by_type("fungicida");
        assert!(!fungicides.is_empty());
        assert!(fungicides.iter().all(|p| p.pesticide_type == "Fungicida"));
        assert!(catalog.pesticides_by_type("Nematicida").is_empty());

        let types = catalog.pesticide_types();
        assert_eq!(types, vec!["Herbicida", "Insecticida", "Fungicida"]);
    }

    #[test]
    fn missing_type_names_available_types() {
        let catalog = Catalog::builtin().unwrap();
        let fungicides = catalog.require_pesticides_of_type("fungicida").unwrap();
        assert_eq!(fungicides.len(), catalog.pesticides_by_type("Fungicida").len());

        match catalog.require_pesticides_of_type("Acaricida") {
            Err(AgroDoseError::NotFound(msg)) => {
                assert!(msg.contains("Acaricida"));
                assert!(msg.contains("Herbicida, Insecticida, Fungicida"));
            }
            other => panic!("expected NotFound, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let yaml = r#"
crops:
  - { id: 1, name: A, family: F, category: Grano, dose_factor: 1.0, cycle_days: 10 }
  - { id: 1, name: B, family: F, category: Grano, dose_factor: 1.0, cycle_days: 10 }
"#;
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(AgroDoseError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn rejects_unknown_toxicity() {
        let yaml = r#"
pesticides:
  - id: 1
    name: X
    type: Herbicida
    toxicity: Extrema
    base_dose_rate: 1.0
    dose_unit: L/ha
    base_carency_days: 7
"#;
        assert!(matches!(Catalog::from_yaml(yaml), Err(AgroDoseError::Yaml(_))));
    }

    #[test]
    fn unknown_category_is_kept() {
        let yaml = r#"
crops:
  - { id: 9, name: Alfalfa, family: Fabaceae, category: Forraje, dose_factor: 1.0, cycle_days: 30 }
"#;
        let catalog = Catalog::from_yaml(yaml).unwrap();
        assert_eq!(
            catalog.crops[0].category,
            CropCategory::Other("Forraje".to_string())
        );
        assert!(!catalog.crops[0].category.is_known());
    }
}
