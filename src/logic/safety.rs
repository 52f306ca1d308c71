use crate::models::{EquipmentId, PesticideRecord};
use std::collections::BTreeSet;

/// Required protective equipment the operator has not acknowledged.
pub fn missing_equipment(
    pesticide: &PesticideRecord,
    acknowledged: &BTreeSet<EquipmentId>,
) -> BTreeSet<EquipmentId> {
    let missing: BTreeSet<EquipmentId> = pesticide
        .required_equipment
        .difference(acknowledged)
        .cloned()
        .collect();

    if !missing.is_empty() {
        tracing::warn!(
            pesticide = %pesticide.name,
            missing = ?missing,
            "Required protective equipment not acknowledged"
        );
    }
    missing
}

pub fn warning_message(missing: &BTreeSet<EquipmentId>) -> Option<String> {
    if missing.is_empty() {
        return None;
    }
    let items: Vec<&str> = missing.iter().map(String::as_str).collect();
    Some(format!("EPI requerido no marcado: {}", items.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToxicityClass;

    fn acks(items: &[&str]) -> BTreeSet<EquipmentId> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_requirement_yields_empty_result() {
        let pesticide = PesticideRecord::new(1, "P", "Fungicida", ToxicityClass::Baja);
        assert!(missing_equipment(&pesticide, &acks(&[])).is_empty());
        assert!(missing_equipment(&pesticide, &acks(&["guantes", "botas"])).is_empty());
    }

    #[test]
    fn reports_set_difference() {
        let pesticide = PesticideRecord::new(1, "P", "Insecticida", ToxicityClass::Alta)
            .with_equipment(["guantes", "mascarilla", "gafas"]);

        let missing = missing_equipment(&pesticide, &acks(&["guantes", "botas"]));
        assert_eq!(missing, acks(&["gafas", "mascarilla"]));

        let missing = missing_equipment(&pesticide, &acks(&["gafas", "guantes", "mascarilla"]));
        assert!(missing.is_empty());

        let missing = missing_equipment(&pesticide, &acks(&[]));
        assert_eq!(missing.len(), 3);
    }

    #[test]
    fn warning_lists_items() {
        assert_eq!(warning_message(&acks(&[])), None);
        assert_eq!(
            warning_message(&acks(&["mascarilla", "gafas"])).as_deref(),
            Some("EPI requerido no marcado: gafas, mascarilla")
        );
    }
}
