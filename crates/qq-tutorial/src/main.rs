//! QubitQuest interactive terminal.
//!
//! ```text
//!        ✨ Q U B I T Q U E S T ✨
//!     Gate-by-Gate Quantum Tutorial
//!   real particles, real math, real code
//! ```
//!
//! A single-learner request/response loop: pick a lesson, study the theory
//! panel, populate the editor with the reference snippet, edit, and run on
//! the local simulator or the IonQ device.

use std::io::{self, Write as _};

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use qq_tutorial::{
    BackendChoice, DEFAULT_SHOTS, MAX_SHOTS, MIN_SHOTS, RunResult, Session, lessons,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .init();

    let mut session = Session::new();
    landing_page();

    prompt("Press Enter to begin QubitQuest ")?;
    session.begin();

    loop {
        println!();
        println!("{}", style("QubitQuest: Gate-by-Gate Tutorial").bold());
        let Some(lesson_name) = lesson_menu()? else {
            println!("Goodbye!");
            return Ok(());
        };

        let entry = match session.select_lesson(lesson_name) {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("{} {}", style("Error:").red().bold(), e);
                continue;
            }
        };

        // Theory panel
        println!();
        println!("{}", style(entry.name).cyan().bold());
        println!("  {}", entry.description);
        println!("  {}", style(entry.operator).dim());

        // Reference snippet
        let snippet = session.snippet()?;
        println!();
        println!("{}", style("Example code:").bold());
        for line in snippet.lines() {
            println!("  {}", style(line).green());
        }

        let answer = prompt("\nPopulate editor with example code? [Y/n] ")?;
        if !answer.eq_ignore_ascii_case("n") {
            session.populate_editor()?;
        }

        // Editor
        println!();
        println!(
            "{}",
            style("Your build() routine (finish with a blank line; leave empty to keep the populated code):")
                .bold()
        );
        let typed = read_block()?;
        if !typed.trim().is_empty() {
            session.set_editor(typed);
        }
        if session.editor().trim().is_empty() {
            eprintln!("{} editor is empty, nothing to run", style("Error:").red().bold());
            continue;
        }

        // Backend and shots
        let backend = choose_backend()?;
        let shots = choose_shots()?;

        // Run
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
        spinner.set_message(format!("Running on {}...", backend.label()));
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));

        let outcome = session.run(backend, shots).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(result) => print_results(&result),
            Err(failure) => {
                // Show what would have run, even though it failed.
                if let Some(preview) = &failure.preview {
                    println!();
                    for line in preview.lines() {
                        println!("  {}", style(line).dim());
                    }
                }
                eprintln!("{} {}", style("Error:").red().bold(), failure.error);
            }
        }
    }
}

fn landing_page() {
    println!("{}", style("Welcome to QubitQuest ✨").bold());
    println!();
    println!("Enter the quantum realm where real particles, real math, and real");
    println!("code power your quest for fundamental understanding.");
    println!();
    println!("Each lesson integrates theory, code, and hardware:");
    println!("  📝 Theory   — the mathematics behind gates and measurement");
    println!("  💻 Code     — write build() routines for real circuits");
    println!("  ⚛️  Hardware — run on IonQ trapped-ion systems or a local simulator");
    println!();
}

/// Show the numbered lesson menu; `None` means quit.
fn lesson_menu() -> Result<Option<&'static str>> {
    let names = lessons::names();
    println!("Select a gate to explore:");
    for (i, name) in names.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }
    loop {
        let answer = prompt("Lesson number (or q to quit): ")?;
        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=names.len()).contains(&n) => return Ok(Some(names[n - 1])),
            _ => println!("Please enter a number between 1 and {}", names.len()),
        }
    }
}

fn choose_backend() -> Result<BackendChoice> {
    println!();
    println!("Run on:");
    println!("  1. 🚀 Simulator");
    println!("  2. ⚛️  IonQ QPU");
    loop {
        let answer = prompt("Backend [1]: ")?;
        match answer.as_str() {
            "" | "1" => return Ok(BackendChoice::Simulator),
            "2" => return Ok(BackendChoice::IonqDevice),
            _ => println!("Please enter 1 or 2"),
        }
    }
}

fn choose_shots() -> Result<u32> {
    loop {
        let answer = prompt(&format!(
            "Shots ({MIN_SHOTS}-{MAX_SHOTS}) [{DEFAULT_SHOTS}]: "
        ))?;
        if answer.is_empty() {
            return Ok(DEFAULT_SHOTS);
        }
        match answer.parse::<u32>() {
            Ok(n) if (MIN_SHOTS..=MAX_SHOTS).contains(&n) => return Ok(n),
            _ => println!("Please enter a number between {MIN_SHOTS} and {MAX_SHOTS}"),
        }
    }
}

/// Print the circuit preview and a count histogram.
fn print_results(result: &RunResult) {
    println!();
    for line in result.preview.lines() {
        println!("  {}", style(line).dim());
    }

    println!(
        "\n{} Results ({}, {} shots):",
        style("✓").green().bold(),
        result.backend_label,
        result.shots
    );

    let sorted = result.counts.sorted();
    let total = result.counts.total_shots() as f64;

    for (bitstring, count) in &sorted {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if let Some(time_ms) = result.execution_time_ms {
        println!("\n  Execution time: {} ms", style(time_ms).yellow());
    }
}

/// Prompt for one trimmed line.
fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Read lines until the first blank one.
fn read_block() -> Result<String> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let n = io::stdin().read_line(&mut line)?;
        let line = line.trim_end_matches(['\n', '\r']);
        if n == 0 || line.trim().is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines.join("\n"))
}
