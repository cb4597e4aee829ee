//! Degree-of-success resolution.
//!
//! [`resolve`] rolls and evaluates in one step. [`evaluate`] is the pure
//! half: given a request and an already-rolled [`RollResult`] it always
//! produces the same [`RollOutcome`], which is how tests pin the dice.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::dice::RollResult;
use crate::error::{EngineError, EngineResult};
use crate::outcome::{RollOutcome, SuccessLevel};
use crate::percentile::roll_percentile;
use crate::request::RollRequest;

/// Convert a margin of success into whole success levels.
///
/// Positive margins round down and negative margins round up, i.e. the
/// division truncates toward zero: `25 -> 2`, `-1 -> 0`, `-25 -> -2`.
pub fn success_level(margin_of_success: i32) -> i32 {
    margin_of_success / 10
}

/// Evaluate a request against dice that have already been rolled.
///
/// Fails if `roll` has no kept die.
pub fn evaluate(request: &RollRequest, roll: RollResult) -> EngineResult<RollOutcome> {
    let kept = roll
        .kept_value()
        .ok_or_else(|| EngineError::InvalidRoll("no kept die".to_string()))?;
    let dice_kept = i32::try_from(kept)
        .map_err(|_| EngineError::InvalidRoll(format!("die value {kept} out of range")))?;

    let margin_of_success = request
        .target_value
        .saturating_sub(dice_kept)
        .saturating_add(request.luck_applied);
    let degree_of_success =
        success_level(margin_of_success).saturating_add(request.success_level_modifier);

    let is_success = degree_of_success >= 0;
    let is_critical = dice_kept <= request.critical_success_threshold
        || dice_kept >= request.critical_fumble_threshold;

    let advantage = request.advantage();
    let signed_level = SuccessLevel {
        degree: degree_of_success,
        margin: margin_of_success,
    }
    .to_string();
    Ok(RollOutcome {
        formula: advantage.formula(),
        net_advantage: advantage.net(),
        roll,
        target_value: request.target_value,
        dice_kept,
        margin_of_success,
        degree_of_success,
        signed_level,
        is_success,
        is_critical,
        is_critical_success: is_success && is_critical,
        is_fumble: is_critical && !is_success,
    })
}

/// Validate a request, roll its percentile dice, and evaluate the result.
pub fn resolve(request: &RollRequest, rng: &mut StdRng) -> EngineResult<RollOutcome> {
    request.validate()?;
    let roll = roll_percentile(request.net_advantage(), rng);
    let outcome = evaluate(request, roll)?;
    tracing::debug!(
        formula = outcome.formula(),
        target = request.target_value,
        dice = outcome.dice_kept(),
        margin = outcome.margin_of_success(),
        level = %outcome.success_level(),
        kind = %outcome.kind(),
        "resolved roll"
    );
    Ok(outcome)
}

/// Resolve independent requests in parallel.
///
/// Request `i` rolls with its own RNG seeded from `seed + i`, so the result
/// depends only on `seed` and the request order, never on scheduling.
/// Outcomes are returned in request order; any invalid request fails the
/// whole batch.
pub fn resolve_batch(requests: &[RollRequest], seed: u64) -> EngineResult<Vec<RollOutcome>> {
    tracing::debug!(count = requests.len(), seed, "resolving batch");
    requests
        .par_iter()
        .enumerate()
        .map(|(index, request)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            resolve(request, &mut rng)
        })
        .collect()
}
