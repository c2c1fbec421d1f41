use crate::energy::PathEnergy;
use carepath_core::model::NodeTag;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Ordering;
use storage::{GraphError, KnowledgeGraph};

/// Ordered node keys from the query symptom to a target-typed node.
pub type Path = Vec<String>;

/// A frontier entry: (current node, path so far).
pub type PathCandidate = (String, Path);

/// Frontier pruning strategy applied once per expansion round.
///
/// Implementations must leave at most `width` candidates; which ones survive
/// is the policy's choice.
pub trait FrontierPolicy {
    fn prune(&mut self, candidates: &mut Vec<PathCandidate>, width: usize);
}

/// Reference behavior: shuffle the round's candidates, keep the first
/// `width`. The beam is a random sample, not a score-ranked top-K; the owned
/// generator keeps repeated searches reproducible for a fixed seed.
pub struct ShuffleSample {
    rng: StdRng,
}

impl ShuffleSample {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl FrontierPolicy for ShuffleSample {
    fn prune(&mut self, candidates: &mut Vec<PathCandidate>, width: usize) {
        candidates.shuffle(&mut self.rng);
        candidates.truncate(width);
    }
}

/// Deterministic alternative: keep the `width` candidates with the highest
/// partial-path energy, ties broken by path order.
pub struct EnergyRanked {
    energy: PathEnergy,
}

impl EnergyRanked {
    pub fn new(energy: PathEnergy) -> Self {
        Self { energy }
    }
}

impl FrontierPolicy for EnergyRanked {
    fn prune(&mut self, candidates: &mut Vec<PathCandidate>, width: usize) {
        let mut scored: Vec<(f64, PathCandidate)> = candidates
            .drain(..)
            .map(|candidate| (self.energy.energy(&candidate.1), candidate))
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1 .1.cmp(&b.1 .1))
        });
        candidates.extend(scored.into_iter().take(width).map(|(_, c)| c));
    }
}

/// Bounded breadth expansion from `start` toward nodes tagged `target`.
///
/// Runs exactly `max_depth` rounds. Frontier entries already at a target
/// node are recorded and retired; the rest expand to every neighbor not yet
/// on their path, and the round's candidates are pruned to `beam_width`.
/// Entries still on the frontier after the last round are recorded if they
/// sit on a target node. Returned paths contain no repeated node and at most
/// `max_depth + 1` entries.
///
/// A missing `start` surfaces as `GraphError::NodeNotFound`; an unreachable
/// target yields an empty list.
pub fn beam_search(
    graph: &KnowledgeGraph,
    start: &str,
    target: NodeTag,
    beam_width: usize,
    max_depth: usize,
    policy: &mut dyn FrontierPolicy,
) -> Result<Vec<Path>, GraphError> {
    let mut frontier: Vec<PathCandidate> = vec![(start.to_string(), vec![start.to_string()])];
    let mut completed = Vec::new();

    for _ in 0..max_depth {
        let mut candidates = Vec::new();
        for (node, path) in frontier.drain(..) {
            if graph.kind(&node)?.tag() == target {
                completed.push(path);
                continue;
            }
            for (neighbor, _relation) in graph.neighbors(&node)? {
                if !path.iter().any(|seen| seen == neighbor) {
                    let mut extended = path.clone();
                    extended.push(neighbor.clone());
                    candidates.push((neighbor.clone(), extended));
                }
            }
        }
        policy.prune(&mut candidates, beam_width);
        frontier = candidates;
    }

    for (node, path) in frontier {
        if graph.kind(&node)?.tag() == target {
            completed.push(path);
        }
    }

    Ok(completed)
}
