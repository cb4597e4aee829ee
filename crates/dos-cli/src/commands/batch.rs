use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use dos_mechanics::{RollRequest, resolve_batch};

pub fn run(file: &Path, seed: Option<u64>, json: bool) -> Result<(), String> {
    let source = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let requests = RollRequest::list_from_json(&source).map_err(|e| e.to_string())?;

    if requests.is_empty() {
        println!("  No requests found. Nothing to roll.");
        return Ok(());
    }

    let seed = seed.unwrap_or_else(rand::random);
    let outcomes = resolve_batch(&requests, seed).map_err(|e| e.to_string())?;

    if json {
        println!("{}", super::to_json(&outcomes)?);
        return Ok(());
    }

    println!(
        "  {} {} {}",
        "Batch".bold(),
        file.display(),
        format!("({} rolls, seed={seed})", outcomes.len()).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Target", "Formula", "Dice", "Margin", "SL", "Result"]);
    for (i, outcome) in outcomes.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            outcome.target_value().to_string(),
            outcome.formula().to_string(),
            outcome.roll().to_string(),
            outcome.margin_of_success().to_string(),
            outcome.success_level().to_string(),
            outcome.kind().to_string(),
        ]);
    }
    println!("{table}");

    let successes = outcomes.iter().filter(|o| o.is_success()).count();
    println!("  {successes} of {} succeeded", outcomes.len());

    Ok(())
}
