use crate::beam::{beam_search, FrontierPolicy, Path, ShuffleSample};
use crate::constraint::constraint_score;
use crate::dsl::{RecommendRequest, RequestValidationError};
use crate::embedding::EmbeddingTable;
use crate::energy::PathEnergy;
use carepath_core::config::{AppConfig, SearchConfig};
use carepath_core::error::{CarepathError, ErrorCode};
use carepath_core::model::NodeTag;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use storage::{GraphError, KnowledgeGraph};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestValidationError),
    #[error("symptom not found: {0}")]
    SymptomNotFound(String),
}

impl CarepathError for RecommendError {
    fn error_code(&self) -> ErrorCode {
        match self {
            RecommendError::InvalidRequest(_) => ErrorCode::InvalidArgument,
            RecommendError::SymptomNotFound(_) => ErrorCode::NotFound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDoctor {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// At most top_k doctors, best first.
    pub ranked: Vec<RankedDoctor>,
    /// Every doctor reached during search, mapped to the last path that
    /// reached it. Not limited to the ranked slice.
    pub provenance: HashMap<String, Path>,
    pub latency_ms: u64,
}

/// Search, score and rank doctors for a reported symptom.
///
/// Holds the immutable embedding table and an owned frontier policy; the
/// policy's generator state advances across calls, which is why `recommend`
/// takes `&mut self`. Two freshly built engines with the same graph and
/// configuration produce identical responses.
pub struct RecommendEngine {
    graph: Arc<KnowledgeGraph>,
    energy: PathEnergy,
    policy: Box<dyn FrontierPolicy>,
    search: SearchConfig,
}

impl RecommendEngine {
    pub fn new(graph: Arc<KnowledgeGraph>, config: &AppConfig) -> Self {
        let table = Arc::new(EmbeddingTable::new(&graph, &config.embedding));
        Self {
            graph,
            energy: PathEnergy::new(table),
            policy: Box::new(ShuffleSample::seeded(config.embedding.seed)),
            search: config.search.clone(),
        }
    }

    /// Swap the frontier policy (e.g. for deterministic ranked pruning).
    pub fn with_policy(mut self, policy: Box<dyn FrontierPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Scorer over this engine's embedding table, for policies that rank by
    /// partial-path energy.
    pub fn path_energy(&self) -> PathEnergy {
        self.energy.clone()
    }

    pub fn recommend(
        &mut self,
        request: RecommendRequest,
    ) -> Result<RecommendResponse, RecommendError> {
        let start = Instant::now();

        request.validate()?;
        let top_k = request.top_k.unwrap_or(self.search.top_k);

        let paths = beam_search(
            &self.graph,
            &request.symptom,
            NodeTag::Doctor,
            self.search.beam_width,
            self.search.max_depth,
            self.policy.as_mut(),
        )
        .map_err(|err| match err {
            GraphError::NodeNotFound(key) => RecommendError::SymptomNotFound(key),
        })?;
        let path_count = paths.len();

        let mut scores: HashMap<String, f64> = HashMap::new();
        let mut provenance: HashMap<String, Path> = HashMap::new();

        for path in paths {
            let Some(doctor) = path.last().cloned() else {
                continue;
            };
            let Ok(kind) = self.graph.kind(&doctor) else {
                continue;
            };
            let Some(profile) = kind.as_doctor() else {
                continue;
            };

            let semantic = self.energy.energy(&path).exp();
            let psi = constraint_score(profile, &request.constraints);

            *scores.entry(doctor.clone()).or_insert(0.0) += psi * semantic;
            // Last path wins; provenance is a witness, not the best route.
            provenance.insert(doctor, path);
        }

        let mut ranked: Vec<RankedDoctor> = scores
            .into_iter()
            .map(|(name, score)| RankedDoctor { name, score })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked.truncate(top_k);

        tracing::debug!(
            symptom = %request.symptom,
            paths = path_count,
            doctors = provenance.len(),
            "recommendation computed"
        );

        Ok(RecommendResponse {
            ranked,
            provenance,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::EnergyRanked;
    use crate::dsl::Constraints;
    use carepath_core::model::{DoctorProfile, NodeKind};

    fn doctor(fee: f64, insurance: &[&str]) -> NodeKind {
        NodeKind::Doctor(DoctorProfile {
            fee,
            specialty: "General".to_string(),
            location: (0.0, 0.0),
            insurance: insurance.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn base_nodes(graph: &mut KnowledgeGraph) {
        graph.insert_node("Fever", NodeKind::Symptom);
        graph.insert_node("Flu", NodeKind::Disease);
        graph.insert_node("Cold", NodeKind::Disease);
        graph.insert_node("General", NodeKind::Specialty);
        graph.insert_node("Dr. A", doctor(50.0, &["Basic"]));
    }

    fn single_route_graph() -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();
        base_nodes(&mut graph);
        graph.insert_edge("Fever", "Flu", "associated_with");
        graph.insert_edge("Flu", "General", "requires_specialty");
        graph.insert_edge("General", "Dr. A", "has_doctor");
        graph
    }

    fn double_route_graph() -> KnowledgeGraph {
        let mut graph = single_route_graph();
        graph.insert_edge("Fever", "Cold", "associated_with");
        graph.insert_edge("Cold", "General", "requires_specialty");
        graph
    }

    fn request(symptom: &str) -> RecommendRequest {
        RecommendRequest {
            symptom: symptom.to_string(),
            constraints: Constraints {
                budget: 100.0,
                location: (0.0, 0.0),
                insurance: "Basic".to_string(),
            },
            top_k: None,
        }
    }

    fn engine(graph: KnowledgeGraph) -> RecommendEngine {
        RecommendEngine::new(Arc::new(graph), &AppConfig::default())
    }

    fn deterministic_engine(graph: KnowledgeGraph) -> RecommendEngine {
        let engine = engine(graph);
        let energy = engine.path_energy();
        engine.with_policy(Box::new(EnergyRanked::new(energy)))
    }

    #[test]
    fn reachable_doctor_gets_positive_score() {
        let mut engine = engine(single_route_graph());
        let response = engine.recommend(request("Fever")).unwrap();

        assert_eq!(response.ranked.len(), 1);
        assert_eq!(response.ranked[0].name, "Dr. A");
        assert!(response.ranked[0].score > 0.0);
        assert_eq!(
            response.provenance["Dr. A"],
            vec!["Fever", "Flu", "General", "Dr. A"]
        );
    }

    #[test]
    fn unknown_symptom_is_not_found() {
        let mut engine = engine(single_route_graph());
        let err = engine.recommend(request("Toothache")).unwrap_err();
        assert!(matches!(err, RecommendError::SymptomNotFound(key) if key == "Toothache"));
    }

    #[test]
    fn invalid_request_is_rejected_before_search() {
        let mut engine = engine(single_route_graph());
        let mut req = request("Fever");
        req.constraints.budget = -1.0;
        let err = engine.recommend(req).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn isolated_symptom_yields_empty_result() {
        let mut graph = single_route_graph();
        graph.insert_node("Rash", NodeKind::Symptom);
        let mut engine = engine(graph);

        let response = engine.recommend(request("Rash")).unwrap();
        assert!(response.ranked.is_empty());
        assert!(response.provenance.is_empty());
    }

    #[test]
    fn multiple_routes_accumulate_into_a_higher_score() {
        // Same node set in both graphs, so both engines assign identical
        // embeddings; only the extra route differs.
        let mut single = deterministic_engine(single_route_graph());
        let mut double = deterministic_engine(double_route_graph());

        let one = single.recommend(request("Fever")).unwrap();
        let two = double.recommend(request("Fever")).unwrap();

        assert!(two.ranked[0].score > one.ranked[0].score);
    }

    #[test]
    fn provenance_holds_a_valid_route() {
        let mut engine = deterministic_engine(double_route_graph());
        let response = engine.recommend(request("Fever")).unwrap();

        let path = &response.provenance["Dr. A"];
        let by_flu = vec!["Fever", "Flu", "General", "Dr. A"];
        let by_cold = vec!["Fever", "Cold", "General", "Dr. A"];
        assert!(path == &by_flu || path == &by_cold);
    }

    #[test]
    fn fresh_engines_with_the_same_seed_agree() {
        let first = engine(single_route_graph()).recommend(request("Fever")).unwrap();
        let second = engine(single_route_graph()).recommend(request("Fever")).unwrap();

        assert_eq!(first.ranked, second.ranked);
        assert_eq!(first.provenance, second.provenance);
    }

    #[test]
    fn top_k_truncates_the_ranked_list() {
        let mut graph = single_route_graph();
        graph.insert_node("Dr. B", doctor(80.0, &[]));
        graph.insert_edge("General", "Dr. B", "has_doctor");
        let mut engine = engine(graph);

        let mut req = request("Fever");
        req.top_k = Some(1);
        let response = engine.recommend(req).unwrap();

        assert_eq!(response.ranked.len(), 1);
        // Both doctors keep their provenance even when ranked out.
        assert_eq!(response.provenance.len(), 2);
    }
}
