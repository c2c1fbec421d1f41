use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_TOP_K: usize = 50;

/// Sentinel insurance plan meaning "no insurance constraint".
pub const INSURANCE_NONE: &str = "None";

/// User-supplied constraints for a recommendation query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub budget: f64,
    pub location: (f64, f64),
    pub insurance: String,
}

impl Constraints {
    /// Whether the insurance factor participates in scoring.
    pub fn insurance_applies(&self) -> bool {
        self.insurance != INSURANCE_NONE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub symptom: String,
    pub constraints: Constraints,
    /// Size of the ranked list; falls back to the configured default.
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestValidationError {
    #[error("symptom must not be empty")]
    EmptySymptom,
    #[error("top_k must be between 1 and {0}")]
    InvalidTopK(usize),
    #[error("budget must be a finite, non-negative number")]
    InvalidBudget,
    #[error("location coordinates must be finite")]
    InvalidLocation,
    #[error("insurance must not be empty (use \"None\" to disable the filter)")]
    EmptyInsurance,
}

impl RecommendRequest {
    pub fn parse_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if self.symptom.trim().is_empty() {
            return Err(RequestValidationError::EmptySymptom);
        }
        if let Some(top_k) = self.top_k {
            if top_k == 0 || top_k > MAX_TOP_K {
                return Err(RequestValidationError::InvalidTopK(MAX_TOP_K));
            }
        }
        if !self.constraints.budget.is_finite() || self.constraints.budget < 0.0 {
            return Err(RequestValidationError::InvalidBudget);
        }
        let (x, y) = self.constraints.location;
        if !x.is_finite() || !y.is_finite() {
            return Err(RequestValidationError::InvalidLocation);
        }
        if self.constraints.insurance.trim().is_empty() {
            return Err(RequestValidationError::EmptyInsurance);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecommendRequest {
        RecommendRequest {
            symptom: "Fever".to_string(),
            constraints: Constraints {
                budget: 100.0,
                location: (0.0, 0.0),
                insurance: "Basic".to_string(),
            },
            top_k: None,
        }
    }

    #[test]
    fn parse_json_applies_defaults() {
        let parsed = RecommendRequest::parse_json(
            r#"{
                "symptom": "Fever",
                "constraints": {"budget": 100, "location": [0.0, 0.0], "insurance": "Basic"}
            }"#,
        )
        .unwrap();
        assert_eq!(parsed, request());
    }

    #[test]
    fn validate_accepts_reasonable_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_symptom() {
        let mut req = request();
        req.symptom = "  ".to_string();
        assert_eq!(req.validate(), Err(RequestValidationError::EmptySymptom));
    }

    #[test]
    fn validate_rejects_top_k_out_of_range() {
        let mut req = request();
        req.top_k = Some(0);
        assert_eq!(
            req.validate(),
            Err(RequestValidationError::InvalidTopK(MAX_TOP_K))
        );
    }

    #[test]
    fn validate_rejects_negative_budget() {
        let mut req = request();
        req.constraints.budget = -5.0;
        assert_eq!(req.validate(), Err(RequestValidationError::InvalidBudget));
    }

    #[test]
    fn validate_rejects_non_finite_location() {
        let mut req = request();
        req.constraints.location = (f64::NAN, 0.0);
        assert_eq!(req.validate(), Err(RequestValidationError::InvalidLocation));
    }

    #[test]
    fn none_sentinel_disables_insurance() {
        let mut req = request();
        req.constraints.insurance = INSURANCE_NONE.to_string();
        assert!(!req.constraints.insurance_applies());
        assert!(req.validate().is_ok());
    }
}
