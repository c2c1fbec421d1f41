use crate::records::{DiseaseRecord, DoctorRecord, KnowledgeRecords, SymptomRecord};
use carepath_core::error::{CarepathError, ErrorCode};
use carepath_core::model::{relation, DoctorProfile, NodeKind};
use std::fs;
use std::path::Path;
use storage::KnowledgeGraph;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("data file missing: {0}")]
    MissingFile(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CarepathError for LoadError {
    fn error_code(&self) -> ErrorCode {
        match self {
            LoadError::MissingFile(_) => ErrorCode::NotFound,
            LoadError::Io { .. } => ErrorCode::Internal,
            LoadError::Parse { .. } => ErrorCode::InvalidArgument,
        }
    }
}

/// Load symptoms.json / diseases.json / doctors.json from a data directory
/// and assemble the knowledge graph.
pub fn load_dir(data_dir: impl AsRef<Path>) -> Result<KnowledgeGraph, LoadError> {
    let data_dir = data_dir.as_ref();
    let symptoms: Vec<SymptomRecord> = read_json(&data_dir.join("symptoms.json"))?;
    let diseases: Vec<DiseaseRecord> = read_json(&data_dir.join("diseases.json"))?;
    let doctors: Vec<DoctorRecord> = read_json(&data_dir.join("doctors.json"))?;

    Ok(build_graph(KnowledgeRecords {
        symptoms,
        diseases,
        doctors,
    }))
}

/// Wire parsed records into a graph:
/// symptom -[associated_with]-> disease -[requires_specialty]-> specialty
/// -[has_doctor]-> doctor.
///
/// Symptoms and specialties referenced by other records but not declared
/// themselves are inserted with their proper kind.
pub fn build_graph(records: KnowledgeRecords) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::new();

    for symptom in &records.symptoms {
        graph.insert_node(symptom.id.clone(), NodeKind::Symptom);
    }

    for disease in &records.diseases {
        graph.insert_node(disease.id.clone(), NodeKind::Disease);
        ensure_node(&mut graph, &disease.associated_symptom, NodeKind::Symptom);
        ensure_node(&mut graph, &disease.required_specialty, NodeKind::Specialty);
        graph.insert_edge(
            disease.associated_symptom.clone(),
            disease.id.clone(),
            relation::ASSOCIATED_WITH,
        );
        graph.insert_edge(
            disease.id.clone(),
            disease.required_specialty.clone(),
            relation::REQUIRES_SPECIALTY,
        );
    }

    for doctor in &records.doctors {
        ensure_node(&mut graph, &doctor.specialty, NodeKind::Specialty);
        graph.insert_node(
            doctor.name.clone(),
            NodeKind::Doctor(DoctorProfile {
                fee: doctor.fee,
                specialty: doctor.specialty.clone(),
                location: doctor.location,
                insurance: doctor.insurance.clone(),
            }),
        );
        graph.insert_edge(
            doctor.specialty.clone(),
            doctor.name.clone(),
            relation::HAS_DOCTOR,
        );
    }

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "knowledge graph constructed"
    );

    graph
}

fn ensure_node(graph: &mut KnowledgeGraph, key: &str, kind: NodeKind) {
    if !graph.contains(key) {
        graph.insert_node(key.to_string(), kind);
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingFile(path.display().to_string()));
    }
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}
