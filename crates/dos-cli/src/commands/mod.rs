pub mod batch;
pub mod effect;
pub mod roll;

use colored::{ColoredString, Colorize};
use rand::SeedableRng;
use rand::rngs::StdRng;

use dos_mechanics::{OutcomeKind, RollOutcome};

/// Seeded RNG when a seed is given, OS entropy otherwise.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Outcome label colored by kind.
fn kind_label(kind: OutcomeKind) -> ColoredString {
    let label = kind.to_string();
    match kind {
        OutcomeKind::CriticalSuccess => label.green().bold(),
        OutcomeKind::Success => label.green(),
        OutcomeKind::Failure => label.red(),
        OutcomeKind::Fumble => label.red().bold(),
    }
}

/// Print one outcome as an aligned block.
fn print_outcome(outcome: &RollOutcome) {
    println!(
        "  {} {} vs {}",
        "Roll".bold(),
        outcome.formula(),
        outcome.target_value()
    );
    println!("  {:<8} {}", "Dice", outcome.roll());
    println!("  {:<8} {}", "Kept", outcome.dice_kept());
    println!("  {:<8} {}", "Margin", outcome.margin_of_success());
    println!("  {:<8} {}", "SL", outcome.success_level());
    println!("  {:<8} {}", "Result", kind_label(outcome.kind()));
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("failed to encode JSON: {e}"))
}
