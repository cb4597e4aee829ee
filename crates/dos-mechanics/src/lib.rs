//! Percentile degree-of-success roll engine.
//!
//! Rolls d100 against a target with stacking advantage and disadvantage,
//! turns the margin into a signed degree of success, and flags critical
//! successes and fumbles. Also rolls secondary effect formulas (damage and
//! the like), doubling their dice on a critical success.
//!
//! ```
//! use dos_mechanics::{RollConfig, RollModifiers, build_request, resolve};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let request = build_request(
//!     &RollConfig::default(),
//!     60,
//!     &RollModifiers::default().with_advantage(1, 0),
//! )
//! .unwrap();
//! let outcome = resolve(&request, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!(outcome.roll().count(), 2);
//! assert_eq!(outcome.margin_of_success(), 60 - outcome.dice_kept());
//! ```

pub mod config;
pub mod dice;
pub mod effect;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod percentile;
pub mod request;

pub use config::{RollConfig, RollModifiers, build_request};
pub use dice::{DicePool, Die, DieResult, RollResult};
pub use effect::{DiceFormula, EffectRoll, Term, roll_effect};
pub use engine::{evaluate, resolve, resolve_batch, success_level};
pub use error::{EngineError, EngineResult};
pub use outcome::{OutcomeKind, RollOutcome, SuccessLevel};
pub use percentile::{Advantage, KeepRule, roll_percentile};
pub use request::RollRequest;
