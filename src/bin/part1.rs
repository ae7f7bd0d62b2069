use anyhow::{Context, Result};
use clap::Parser;
use keypad_chain::{CLIArgs, ChainSolver};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let door_codes = keypad_chain::read_door_codes(&args.input_path).with_context(|| {
        format!(
            "Failed to read door codes from given file({}).",
            args.input_path.display()
        )
    })?;

    let mut solver = ChainSolver::for_standard_pads()?;
    let mut sum_of_complexities = 0;
    for code in &door_codes {
        let min_keys_n = solver
            .min_keys_n(code.text(), 2)
            .with_context(|| format!("Failed to solve door code({}).", code.text()))?;
        sum_of_complexities += min_keys_n * code.number();
    }

    println!(
        "The sum of complexities of given door codes is {}.",
        sum_of_complexities
    );

    Ok(())
}
