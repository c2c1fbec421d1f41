use serde::{Deserialize, Serialize};

/// Relation labels used on knowledge-graph edges.
pub mod relation {
    pub const ASSOCIATED_WITH: &str = "associated_with";
    pub const REQUIRES_SPECIALTY: &str = "requires_specialty";
    pub const HAS_DOCTOR: &str = "has_doctor";
}

/// Attributes carried by a doctor node.
///
/// Every field is materialized at ingestion time, so downstream scoring never
/// deals with missing attributes: absent fee defaults to 100, absent location
/// to the origin, absent insurance to an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub fee: f64,
    pub specialty: String,
    pub location: (f64, f64),
    pub insurance: Vec<String>,
}

impl Default for DoctorProfile {
    fn default() -> Self {
        Self {
            fee: 100.0,
            specialty: String::new(),
            location: (0.0, 0.0),
            insurance: Vec::new(),
        }
    }
}

/// Closed set of node kinds in the knowledge graph.
///
/// Only doctors carry attributes; the remaining kinds are pure graph
/// structure identified by their key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Symptom,
    Disease,
    Specialty,
    Doctor(DoctorProfile),
}

/// Kind discriminant, used as the search target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeTag {
    Symptom,
    Disease,
    Specialty,
    Doctor,
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Symptom => NodeTag::Symptom,
            NodeKind::Disease => NodeTag::Disease,
            NodeKind::Specialty => NodeTag::Specialty,
            NodeKind::Doctor(_) => NodeTag::Doctor,
        }
    }

    pub fn as_doctor(&self) -> Option<&DoctorProfile> {
        match self {
            NodeKind::Doctor(profile) => Some(profile),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NodeTag::Symptom => "Symptom",
            NodeTag::Disease => "Disease",
            NodeTag::Specialty => "Specialty",
            NodeTag::Doctor => "Doctor",
        };
        write!(f, "{}", s)
    }
}
