//! High-level facade: load a data directory, run recommendations, format
//! explanations. Presentation lives here; the reasoning core never prints.

use carepath_core::config::AppConfig;
use ingestion::{load_dir, LoadError};
use query::constraint::travel_distance_km;
use query::{Constraints, RecommendEngine, RecommendError, RecommendRequest, RecommendResponse};
use std::path::Path;
use std::sync::Arc;
use storage::KnowledgeGraph;

pub struct Recommender {
    graph: Arc<KnowledgeGraph>,
    engine: RecommendEngine,
}

impl Recommender {
    /// Build from symptoms.json / diseases.json / doctors.json in `data_dir`.
    pub fn from_data_dir(
        data_dir: impl AsRef<Path>,
        config: &AppConfig,
    ) -> Result<Self, LoadError> {
        Ok(Self::from_graph(load_dir(data_dir)?, config))
    }

    pub fn from_graph(graph: KnowledgeGraph, config: &AppConfig) -> Self {
        let graph = Arc::new(graph);
        let engine = RecommendEngine::new(graph.clone(), config);
        Self { graph, engine }
    }

    pub fn recommend(
        &mut self,
        request: RecommendRequest,
    ) -> Result<RecommendResponse, RecommendError> {
        self.engine.recommend(request)
    }

    /// Human-readable justification for a recommended doctor, built from the
    /// provenance path and the doctor's attributes. Returns `None` when the
    /// key does not name a doctor.
    pub fn explain(
        &self,
        doctor: &str,
        path: &[String],
        constraints: &Constraints,
    ) -> Option<String> {
        let profile = self.graph.kind(doctor).ok()?.as_doctor()?;

        let symptom = path.first().map(String::as_str).unwrap_or(doctor);
        let disease = path.get(1).map(String::as_str).unwrap_or("Unknown Condition");
        let distance = travel_distance_km(constraints.location, profile.location);

        let insurance_line = if !constraints.insurance_applies() {
            "no insurance constraint".to_string()
        } else if profile.insurance.iter().any(|p| *p == constraints.insurance) {
            format!("{} accepted", constraints.insurance)
        } else {
            format!("{} not accepted", constraints.insurance)
        };

        Some(format!(
            "Recommendation: {doctor} ({specialty})\n\
             Clinical logic: reported '{symptom}' -> linked to '{disease}' -> requires {specialty}\n\
             Cost: fee ${fee} (budget ${budget})\n\
             Location: approx. {distance:.1} km away\n\
             Insurance: {insurance_line}",
            specialty = profile.specialty,
            fee = profile.fee,
            budget = constraints.budget,
        ))
    }
}
