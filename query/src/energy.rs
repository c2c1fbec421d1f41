use crate::embedding::EmbeddingTable;
use std::sync::Arc;

/// Relation slot applied to every hop. The reference scorer never looks at
/// the traversed edge's label; a per-label lookup would replace
/// `hop_relation` only, leaving the summation untouched.
const FIXED_RELATION_SLOT: usize = 0;

/// Translation-style path plausibility score.
///
/// Each hop (h, t) contributes `-|h + r - t|`; the path energy is the sum
/// over all hops. Less negative means the hop sits closer to the relation
/// translation in embedding space.
#[derive(Clone)]
pub struct PathEnergy {
    table: Arc<EmbeddingTable>,
}

impl PathEnergy {
    pub fn new(table: Arc<EmbeddingTable>) -> Self {
        Self { table }
    }

    pub fn energy(&self, path: &[String]) -> f64 {
        path.windows(2)
            .map(|hop| {
                let head = self.table.embedding_of(&hop[0]);
                let tail = self.table.embedding_of(&hop[1]);
                -translation_distance(head, self.hop_relation(), tail)
            })
            .sum()
    }

    fn hop_relation(&self) -> &[f32] {
        self.table.relation_slot(FIXED_RELATION_SLOT)
    }
}

fn translation_distance(head: &[f32], relation: &[f32], tail: &[f32]) -> f64 {
    head.iter()
        .zip(relation.iter())
        .zip(tail.iter())
        .map(|((h, r), t)| {
            let d = (h + r - t) as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}
