// Interactive stdin gates between pipeline stages.
use std::io::{self, Write};

use anyhow::{anyhow, Result};

/// Prints a message and reads one trimmed line from stdin.
/// A closed stdin is an error rather than an empty answer.
pub fn prompt_line(message: &str) -> Result<String> {
    println!("{}", message);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin().read_line(&mut input)?;
    if read == 0 {
        return Err(anyhow!("stdin closed while waiting for input"));
    }
    Ok(input.trim().to_string())
}

/// Asks for `count` whitespace-separated index numbers below `max`,
/// re-prompting until the answer is valid.
pub fn prompt_species_indices(count: usize, max: usize) -> Result<Vec<usize>> {
    loop {
        let answer = prompt_line(&format!(
            "Enter {} index numbers (from the list) separated by space to download their corresponding FASTA files:",
            count
        ))?;
        let parsed: Result<Vec<usize>, _> =
            answer.split_whitespace().map(|tok| tok.parse()).collect();
        match parsed {
            Ok(indices) if indices.len() == count && indices.iter().all(|&i| i < max) => {
                return Ok(indices);
            }
            _ => println!(
                "Invalid input. Please enter {} valid index numbers below {}.",
                count, max
            ),
        }
    }
}

/// Asks for a file name until the user names one that exists.
pub fn prompt_existing_file(missing: &str) -> Result<String> {
    loop {
        let answer = prompt_line(&format!(
            "File '{}' not found. Input the TSV file name:",
            missing
        ))?;
        if std::path::Path::new(&answer).exists() {
            return Ok(answer);
        }
        println!("File '{}' not found either.", answer);
    }
}

/// Blocks until the user confirms the cluster outputs are in place.
pub fn wait_for_outputs() -> Result<()> {
    loop {
        let answer = prompt_line(
            "Please type 'y' once you have generated the HMMer outputs:",
        )?
        .to_lowercase();
        if answer == "y" {
            return Ok(());
        }
        println!("Invalid input. Please type 'y'.");
    }
}
