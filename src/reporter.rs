use crate::bench::{BenchReport, PhaseResult};
use colored::*;
use std::error::Error;

pub const COPY_LABEL: &str = "No move, no inline construction";
pub const MOVE_LABEL: &str = "Move, no inline construction   ";

pub struct Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct ReportOptions {
    pub verbosity: u8,
    pub format: OutputFormat,
    pub save: Option<String>,
    pub compare: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            verbosity: 0,
            format: OutputFormat::Text,
            save: None,
            compare: None,
        }
    }
}

impl Reporter {
    pub fn print_report(report: &BenchReport, options: &ReportOptions) -> Result<(), Box<dyn Error>> {
        // Load the baseline before `save` can overwrite it
        if let Some(ref compare_file) = options.compare {
            let baseline = Self::load_report(compare_file)?;
            match options.format {
                OutputFormat::Text => Self::print_comparison_report(report, &baseline),
                OutputFormat::Json => Self::print_json_comparison(report, &baseline)?,
            }
        } else {
            match options.format {
                OutputFormat::Text => Self::print_text_report(report, options),
                OutputFormat::Json => Self::print_json_report(report)?,
            }
        }

        if let Some(ref save_file) = options.save {
            Self::save_report(report, save_file)?;
        }

        Ok(())
    }

    fn print_text_report(report: &BenchReport, options: &ReportOptions) {
        println!("\n{}", "Copy vs Move:".bright_blue().bold());

        for (label, phase) in [(COPY_LABEL, &report.copy), (MOVE_LABEL, &report.transfer)] {
            println!("{}: {}", label, phase.mean_micros().to_string().bright_green());
            Self::print_phase_details(phase, options.verbosity);
        }

        if options.verbosity >= 1 {
            match report.speedup() {
                Some(speedup) => println!("Move is {:.1}x faster", speedup),
                None => println!("Move phase too fast to measure"),
            }
        }
    }

    fn print_phase_details(phase: &PhaseResult, verbosity: u8) {
        if verbosity >= 1 {
            println!(
                "  {} min {} us, max {} us over {} run(s)",
                "└─".dimmed(),
                phase.min_micros(),
                phase.max_micros(),
                phase.samples_micros.len()
            );
        }

        if verbosity >= 2
            && let Some(ref allocations) = phase.allocations
        {
            println!(
                "     {} allocations, {} frees, {:.2} KB allocated",
                allocations.allocations,
                allocations.deallocations,
                allocations.bytes_allocated as f64 / 1024.0
            );
        }

        if verbosity >= 3 {
            let samples: Vec<String> = phase.samples_micros.iter().map(|s| s.to_string()).collect();
            println!("     samples: {}", samples.join(", ").dimmed());
        }
    }

    fn print_json_report(report: &BenchReport) -> Result<(), Box<dyn Error>> {
        use serde_json::json;

        let output = json!({
            "config": report.config,
            "phases": [Self::phase_json(&report.copy), Self::phase_json(&report.transfer)],
            "speedup": report.speedup(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn phase_json(phase: &PhaseResult) -> serde_json::Value {
        serde_json::json!({
            "name": phase.name,
            "mean_micros": phase.mean_micros(),
            "min_micros": phase.min_micros(),
            "max_micros": phase.max_micros(),
            "samples_micros": phase.samples_micros,
            "allocations": phase.allocations,
        })
    }

    fn save_report(report: &BenchReport, path: &str) -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(path, json)
            .map_err(|e| format!("failed to save benchmark report to {}: {}", path, e))?;
        eprintln!("✓ Benchmark report saved to {}", path);
        Ok(())
    }

    fn load_report(path: &str) -> Result<BenchReport, Box<dyn Error>> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read comparison file {}: {}", path, e))?;
        let report = serde_json::from_str(&data)
            .map_err(|e| format!("failed to parse comparison file {}: {}", path, e))?;
        Ok(report)
    }

    fn print_comparison_report(current: &BenchReport, baseline: &BenchReport) {
        println!("\n{}", "Copy vs Move Comparison:".bright_blue().bold());
        println!(
            "{} vs {}",
            "Current".bright_green(),
            "Baseline".bright_yellow()
        );

        let pairs = [
            (COPY_LABEL, &current.copy, &baseline.copy),
            (MOVE_LABEL, &current.transfer, &baseline.transfer),
        ];

        for (label, now, then) in pairs {
            let (now_mean, then_mean) = (now.mean_micros(), then.mean_micros());
            let diff = now_mean as i64 - then_mean as i64;

            let diff_str = if diff > 0 {
                format!("(+{} us{})", diff, percent(diff, then_mean)).bright_red()
            } else if diff < 0 {
                format!("({} us{})", diff, percent(diff, then_mean)).bright_green()
            } else {
                "(±0 us)".normal()
            };

            println!("{}: {} → {} {}", label.bright_white(), then_mean, now_mean, diff_str);
        }

        if current.config != baseline.config {
            eprintln!("Warning: baseline was recorded with a different configuration");
        }
    }

    fn print_json_comparison(current: &BenchReport, baseline: &BenchReport) -> Result<(), Box<dyn Error>> {
        use serde_json::json;

        let diff = |now: &PhaseResult, then: &PhaseResult| {
            json!({
                "name": now.name,
                "baseline_mean_micros": then.mean_micros(),
                "current_mean_micros": now.mean_micros(),
                "diff_micros": now.mean_micros() as i64 - then.mean_micros() as i64,
            })
        };

        let output = json!({
            "comparison": [
                diff(&current.copy, &baseline.copy),
                diff(&current.transfer, &baseline.transfer),
            ],
            "same_config": current.config == baseline.config,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

fn percent(diff: i64, baseline: u64) -> String {
    if baseline == 0 {
        String::new()
    } else {
        format!(", {:+.1}%", diff as f64 * 100.0 / baseline as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percent_is_signed_and_skips_zero_baseline() {
        assert_eq!(percent(50, 200), ", +25.0%");
        assert_eq!(percent(-50, 200), ", -25.0%");
        assert_eq!(percent(10, 0), "");
    }
}
