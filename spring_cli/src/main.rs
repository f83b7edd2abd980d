//! # Helix CLI Application
//!
//! Terminal front end for the spring selection engine. Collects a handful
//! of geometric inputs, sweeps the full material catalog over a stock list
//! of wire diameters, and prints the winning design as text and JSON.
//!
//! All domain logic lives in `spring_core`; this binary only gathers input
//! and formats output.

use std::io::{self, BufRead, Write};

use spring_core::calculations::search::{select_best, MaterialSelector, SearchInput};
use spring_core::calculations::spring::{EvaluationConstants, SpringParameters};
use spring_core::design_tables::{EndCondition, EndType};

/// Stock wire diameters offered by the demo (mm)
const STOCK_DIAMETERS_MM: [f64; 7] = [0.5, 0.8, 1.0, 1.2, 1.5, 2.0, 3.0];

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("Helix CLI - Compression Spring Selector");
    println!("=======================================");
    println!();

    let mean_diameter_mm = prompt_f64("Mean coil diameter D (mm) [15.0]: ", 15.0);
    let total_coils = prompt_f64("Total coils NT [10.0]: ", 10.0);
    let free_length_mm = prompt_f64("Free length L0 (mm) [25.0]: ", 25.0);

    println!();
    println!(
        "Sweeping all catalog materials over d = {:?} mm...",
        STOCK_DIAMETERS_MM
    );
    println!();

    let input = SearchInput {
        label: "CLI-Demo".to_string(),
        wire_diameters_mm: STOCK_DIAMETERS_MM.to_vec(),
        material: MaterialSelector::All,
        parameters: SpringParameters {
            mean_diameter_mm,
            total_coils,
            free_length_mm,
            end_type: EndType::PlainGround,
            end_condition: EndCondition::FixedFixed,
            fatigue: None,
            max_free_length_mm: None,
            max_solid_length_mm: None,
        },
    };

    match select_best(&input, &EvaluationConstants::default()) {
        Ok(outcome) => match &outcome.best {
            Some(best) => {
                let figures = best.figures.as_ref().expect("best design has figures");

                println!("═══════════════════════════════════════");
                println!("  BEST SPRING SELECTED");
                println!("═══════════════════════════════════════");
                println!();
                println!("Material:          {}", best.material);
                println!("Wire diameter d:   {} mm", best.wire_diameter_mm);
                println!("Spring index C:    {:.2}", figures.spring_index_c);
                println!("Active coils Na:   {:.2}", figures.active_coils);
                println!("Solid length Ls:   {:.2} mm", figures.solid_length_mm);
                println!("Spring rate k:     {:.2} N/mm", figures.spring_rate_n_per_mm);
                println!("Closure force Fs:  {:.1} N", figures.solid_force_n);
                if best.fatigue_mode {
                    println!("Fatigue factor nf: {:.2}", figures.fatigue_safety_factor);
                } else {
                    println!("Fatigue:           not evaluated (static service)");
                }
                println!("Static factor ns:  {:.3}", figures.static_safety_factor);
                println!("Figure of merit:   {:.4}", figures.figure_of_merit);
                println!();
                println!(
                    "NOTE: redesign if the working frequency exceeds {:.1} Hz.",
                    figures.redesign_frequency_hz()
                );
                println!();
                println!(
                    "Valid candidates: {}/{}",
                    outcome.valid_count(),
                    outcome.designs.len()
                );

                println!();
                println!("JSON Output (for LLM/API use):");
                if let Ok(json) = serde_json::to_string_pretty(best) {
                    println!("{}", json);
                }
            }
            None => {
                println!("No valid spring found. First rejections:");
                for diagnostic in &outcome.diagnostics {
                    println!(
                        "  {} d={} mm: {}",
                        diagnostic.material.astm(),
                        diagnostic.wire_diameter_mm,
                        diagnostic.violations.join(", ")
                    );
                }
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}
