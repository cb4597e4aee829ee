use colored::Colorize;

use dos_mechanics::{DiceFormula, roll_effect};

pub fn run(formula: &str, critical: bool, seed: Option<u64>, json: bool) -> Result<(), String> {
    let formula = DiceFormula::parse(formula).map_err(|e| e.to_string())?;
    let mut rng = super::make_rng(seed);
    let effect = roll_effect(&formula, critical, &mut rng);

    if json {
        println!("{}", super::to_json(&effect)?);
        return Ok(());
    }

    let header = if critical {
        format!("{} (critical)", effect.formula).yellow().to_string()
    } else {
        effect.formula.clone()
    };
    println!("  {} {header}", "Effect".bold());
    println!("  {:<8} {}", "Dice", effect.roll);
    println!("  {:<8} {}", "Total", effect.total.to_string().bold());

    Ok(())
}
