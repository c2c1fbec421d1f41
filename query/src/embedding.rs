use carepath_core::config::EmbeddingConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use std::collections::HashMap;
use storage::KnowledgeGraph;

/// Fixed table of node and relation vectors.
///
/// Vectors are drawn once from a seeded standard-normal generator, in sorted
/// node-key order, and never change afterwards. Rebuilding with the same
/// graph and seed reproduces the table exactly.
pub struct EmbeddingTable {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
    relations: Vec<Vec<f32>>,
    zero: Vec<f32>,
}

impl EmbeddingTable {
    pub fn new(graph: &KnowledgeGraph, cfg: &EmbeddingConfig) -> Self {
        let dim = cfg.dim.max(1);
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        let vectors = graph
            .node_keys()
            .map(|key| (key.to_string(), sample_vector(&mut rng, dim)))
            .collect();

        let relations = (0..cfg.relation_slots.max(1))
            .map(|_| sample_vector(&mut rng, dim))
            .collect();

        Self {
            dim,
            vectors,
            relations,
            zero: vec![0.0; dim],
        }
    }

    /// Vector for a node key. Unknown keys map to the zero vector.
    pub fn embedding_of(&self, key: &str) -> &[f32] {
        self.vectors
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&self.zero)
    }

    pub fn relation_slot(&self, slot: usize) -> &[f32] {
        &self.relations[slot]
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

fn sample_vector(rng: &mut StdRng, dim: usize) -> Vec<f32> {
    (0..dim)
        .map(|_| StandardNormal.sample(rng))
        .collect()
}
