pub mod beam;
pub mod constraint;
pub mod dsl;
pub mod embedding;
pub mod energy;
pub mod engine;

pub use beam::{beam_search, EnergyRanked, FrontierPolicy, Path, ShuffleSample};
pub use dsl::{Constraints, RecommendRequest, INSURANCE_NONE};
pub use engine::{RankedDoctor, RecommendEngine, RecommendError, RecommendResponse};
