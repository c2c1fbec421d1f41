use crate::dsl::Constraints;
use carepath_core::model::DoctorProfile;

/// Sensitivity of the sigmoid cost decay.
const COST_ALPHA: f64 = 0.1;
/// Width of the Gaussian distance decay, in model kilometers.
const GEO_SIGMA_KM: f64 = 20.0;
/// Coordinate units times this factor approximate kilometers.
const DISTANCE_SCALE: f64 = 2.0;
/// Score retained when the user's plan is not accepted; mismatched doctors
/// rank low instead of disappearing.
const INSURANCE_MISMATCH_PENALTY: f64 = 0.1;

/// Straight-line distance between two coordinate pairs, in model km.
pub fn travel_distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    (dx * dx + dy * dy).sqrt() * DISTANCE_SCALE
}

/// Multiplicative constraint-satisfaction score for one doctor.
///
/// Cost and geo factors live in (0, 1); the insurance factor is 1.0 or the
/// mismatch penalty, so the product is always positive.
pub fn constraint_score(profile: &DoctorProfile, constraints: &Constraints) -> f64 {
    cost_factor(profile.fee, constraints.budget)
        * geo_factor(constraints.location, profile.location)
        * insurance_factor(profile, constraints)
}

fn cost_factor(fee: f64, budget: f64) -> f64 {
    1.0 / (1.0 + (COST_ALPHA * (fee - budget)).exp())
}

fn geo_factor(user: (f64, f64), doctor: (f64, f64)) -> f64 {
    let distance = travel_distance_km(user, doctor);
    (-(distance * distance) / (2.0 * GEO_SIGMA_KM * GEO_SIGMA_KM)).exp()
}

fn insurance_factor(profile: &DoctorProfile, constraints: &Constraints) -> f64 {
    if !constraints.insurance_applies()
        || profile.insurance.iter().any(|plan| *plan == constraints.insurance)
    {
        1.0
    } else {
        INSURANCE_MISMATCH_PENALTY
    }
}
