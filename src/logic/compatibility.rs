use crate::models::{CompatibilityResult, CropRecord, PesticideRecord};

/// True iff the crop is listed among the pesticide's permitted crops.
///
/// Advisory only: callers decide whether an incompatible pairing may proceed.
pub fn is_compatible(pesticide: &PesticideRecord, crop: &CropRecord) -> bool {
    pesticide.permitted_crops.contains(&crop.id)
}

pub fn check(pesticide: &PesticideRecord, crop: &CropRecord) -> CompatibilityResult {
    let compatible = is_compatible(pesticide, crop);
    if !compatible {
        tracing::warn!(
            pesticide = %pesticide.name,
            crop = %crop.name,
            "Pesticide is not registered for this crop"
        );
    }
    CompatibilityResult {
        pesticide_id: pesticide.id,
        crop_id: crop.id,
        compatible,
    }
}

pub fn describe(
    result: &CompatibilityResult,
    pesticide: &PesticideRecord,
    crop: &CropRecord,
) -> String {
    if result.compatible {
        format!("Compatible: {} puede usarse en {}", pesticide.name, crop.name)
    } else {
        format!(
            "Incompatible: {} NO está recomendado para {}",
            pesticide.name, crop.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropCategory, ToxicityClass};

    fn crops() -> Vec<CropRecord> {
        (1..=6)
            .map(|id| CropRecord::new(id, format!("Cultivo {}", id), CropCategory::Grano))
            .collect()
    }

    #[test]
    fn matches_set_membership() {
        let permitted_sets: [&[u32]; 4] = [&[], &[1], &[2, 4, 6], &[1, 2, 3, 4, 5, 6]];
        for permitted in permitted_sets {
            let pesticide = PesticideRecord::new(1, "P", "Herbicida", ToxicityClass::Baja)
                .with_permitted_crops(permitted.iter().copied());
            for crop in crops() {
                assert_eq!(
                    is_compatible(&pesticide, &crop),
                    permitted.contains(&crop.id)
                );
            }
        }
    }

    #[test]
    fn empty_permitted_set_is_never_compatible() {
        let pesticide = PesticideRecord::new(1, "P", "Herbicida", ToxicityClass::Baja);
        assert!(crops().iter().all(|c| !is_compatible(&pesticide, c)));
    }

    #[test]
    fn check_records_pair() {
        let pesticide = PesticideRecord::new(9, "Clorpirifos", "Insecticida", ToxicityClass::Alta)
            .with_permitted_crops([2]);
        let crop = CropRecord::new(2, "Trigo", CropCategory::Grano);
        let result = check(&pesticide, &crop);
        assert_eq!(
            result,
            CompatibilityResult {
                pesticide_id: 9,
                crop_id: 2,
                compatible: true
            }
        );
        assert!(describe(&result, &pesticide, &crop).starts_with("Compatible"));

        let other = CropRecord::new(3, "Tomate", CropCategory::Hortaliza);
        let result = check(&pesticide, &other);
        assert!(!result.compatible);
        assert!(describe(&result, &pesticide, &other).contains("NO está recomendado"));
    }
}
