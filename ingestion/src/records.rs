use serde::Deserialize;

/// One entry of symptoms.json. The source data may carry a subtype string
/// ("Emergency-Symptom" and friends); all symptoms load as the same node
/// kind, so only the id matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct SymptomRecord {
    pub id: String,
}

/// One entry of diseases.json.
#[derive(Debug, Clone, Deserialize)]
pub struct DiseaseRecord {
    pub id: String,
    pub associated_symptom: String,
    pub required_specialty: String,
}

/// One entry of doctors.json. Optional attributes fall back to the same
/// defaults the scorer assumes: fee 100, origin location, no insurance.
#[derive(Debug, Clone, Deserialize)]
pub struct DoctorRecord {
    pub name: String,
    #[serde(default = "default_fee")]
    pub fee: f64,
    pub specialty: String,
    #[serde(default)]
    pub location: (f64, f64),
    #[serde(default)]
    pub insurance: Vec<String>,
}

fn default_fee() -> f64 {
    100.0
}

/// Parsed contents of a data directory.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeRecords {
    pub symptoms: Vec<SymptomRecord>,
    pub diseases: Vec<DiseaseRecord>,
    pub doctors: Vec<DoctorRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_record_applies_defaults() {
        let doc: DoctorRecord =
            serde_json::from_str(r#"{"name": "Dr. X", "specialty": "General"}"#).unwrap();
        assert_eq!(doc.fee, 100.0);
        assert_eq!(doc.location, (0.0, 0.0));
        assert!(doc.insurance.is_empty());
    }

    #[test]
    fn doctor_record_reads_full_attributes() {
        let doc: DoctorRecord = serde_json::from_str(
            r#"{
                "name": "Dr. A",
                "fee": 50,
                "specialty": "General",
                "location": [10.0, 20.0],
                "insurance": ["Basic", "Gold"]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.fee, 50.0);
        assert_eq!(doc.location, (10.0, 20.0));
        assert_eq!(doc.insurance, vec!["Basic", "Gold"]);
    }

    #[test]
    fn symptom_record_ignores_subtype_field() {
        let symptom: SymptomRecord =
            serde_json::from_str(r#"{"id": "High Fever (Child)", "type": "Emergency-Symptom"}"#)
                .unwrap();
        assert_eq!(symptom.id, "High Fever (Child)");
    }
}
