use std::path::Path;

use dos_mechanics::{RollConfig, RollModifiers, build_request, resolve};

pub fn run(
    target: i32,
    modifiers: &RollModifiers,
    config: Option<&Path>,
    seed: Option<u64>,
    json: bool,
) -> Result<(), String> {
    let config = match config {
        Some(path) => RollConfig::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => RollConfig::default(),
    };

    let request = build_request(&config, target, modifiers).map_err(|e| e.to_string())?;
    let mut rng = super::make_rng(seed);
    let outcome = resolve(&request, &mut rng).map_err(|e| e.to_string())?;

    if json {
        println!("{}", super::to_json(&outcome)?);
    } else {
        super::print_outcome(&outcome);
    }

    Ok(())
}
