//! # Beamline CLI
//!
//! Runs a beam project file and prints reactions, peak responses and the
//! factor-of-safety verdict for every load case and combination.
//!
//! ```text
//! beam_cli [PROJECT.json] [--json] [--write-default PATH] [-h | --help]
//! ```
//!
//! Without a project path the built-in reference project is run. Set
//! `RUST_LOG=debug` to trace assembly and solve steps.

use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};
use serde::Serialize;

use beam_core::errors::CalcError;
use beam_core::file_io::{load_project, save_project};
use beam_core::loads::{Load, LoadCase};
use beam_core::project::{Project, ProjectReport};
use beam_core::AnalysisResult;

const USAGE: &str = "Usage: beam_cli [PROJECT.json] [--json] [--write-default PATH] [-h | --help]";

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Args {
    project_path: Option<PathBuf>,
    json: bool,
    write_default: Option<PathBuf>,
    help: bool,
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--write-default" => {
                let path = iter
                    .next()
                    .ok_or_else(|| "--write-default needs a path".to_string())?;
                args.write_default = Some(PathBuf::from(path));
            }
            "-h" | "--help" => args.help = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            path => {
                if args.project_path.is_some() {
                    return Err("Only one project file may be given".to_string());
                }
                args.project_path = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

/// Error envelope printed with `--json`
#[derive(Serialize)]
struct ErrorOutput<'a> {
    code: &'static str,
    message: String,
    error: &'a CalcError,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(all_pass) => {
            if all_pass {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!("{}", e);
            if args.json {
                let output = ErrorOutput {
                    code: e.error_code(),
                    message: e.to_string(),
                    error: &e,
                };
                if let Ok(json) = serde_json::to_string_pretty(&output) {
                    println!("{}", json);
                }
            } else {
                eprintln!("Error [{}]: {}", e.error_code(), e);
            }
            ExitCode::from(3)
        }
    }
}

/// Returns whether every combination passes its target
fn run(args: &Args) -> Result<bool, CalcError> {
    if let Some(path) = &args.write_default {
        save_project(&Project::default(), path)?;
        info!("Wrote default project to {}", path.display());
        if args.project_path.is_none() {
            println!("Wrote default project to {}", path.display());
            return Ok(true);
        }
    }

    let project = match &args.project_path {
        Some(path) => load_project(path)?,
        None => Project::default(),
    };
    project.validate()?;

    let report = project.run()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&project, &report);
    }
    Ok(report.all_pass())
}

// =============================================================================
// Text report
// =============================================================================

fn print_report(project: &Project, report: &ProjectReport) {
    let beam = &project.beam;
    let props = beam.section.properties();

    println!("═══════════════════════════════════════");
    println!("  BEAM ANALYSIS: {}", project.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Span:      {:.3} m ({})", beam.span_m, beam.beam_type.display_name());
    println!("  Section:   {}", beam.section.display_name());
    println!("             I = {:.4e} m⁴, c = {:.4} m, A = {:.4e} m²",
        props.moment_of_inertia_m4, props.extreme_fiber_m, props.area_m2);
    println!("  Material:  {} (E = {:.1} GPa, Fy = {:.1} MPa)",
        beam.material.name,
        beam.material.elastic_modulus_pa / 1e9,
        beam.material.yield_strength_pa / 1e6
    );
    println!("  Elements:  {}", beam.n_elements);
    println!("  FOS target: {:.2}", beam.fos_target);

    println!();
    println!("Load cases:");
    for case in &project.load_cases {
        if let Some(result) = report.case_results.get(&case.id) {
            print_result(&format!("{} ({})", case.id, case.name), result);
            print_loads(case);
        }
    }

    if !report.combo_results.is_empty() {
        println!();
        println!("Combinations:");
        for combo in &report.combo_results {
            print_result(&format!("{} ({})", combo.id, combo.name), &combo.result);
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    match report.governing() {
        Some(governing) => println!(
            "  RESULT: {} (governs: {}, FOS = {:.2})",
            if report.all_pass() { "PASS" } else { "FAIL" },
            governing.id,
            governing.result.safety.factor_of_safety
        ),
        None => println!("  RESULT: no combinations defined"),
    }
    println!("═══════════════════════════════════════");
}

fn print_result(title: &str, result: &AnalysisResult) {
    let max = &result.maxima;
    println!("  {}", title);
    let reactions: Vec<String> = result
        .reactions
        .iter()
        .map(|(key, value)| {
            let unit = if key.is_force() { "N" } else { "N·m" };
            format!("{} = {:.1} {}", key, value, unit)
        })
        .collect();
    println!("    Reactions: {}", reactions.join(", "));
    println!("    V_max = {:.1} N @ {:.3} m", max.shear.value, max.shear.x_m);
    println!("    M_max = {:.1} N·m @ {:.3} m", max.moment.value, max.moment.x_m);
    println!("    δ_max = {:.3} mm @ {:.3} m", max.deflection.value * 1e3, max.deflection.x_m);
    println!("    σ_max = {:.2} MPa @ {:.3} m", max.stress.value / 1e6, max.stress.x_m);
    println!("    FOS   = {:.2} (target {:.2}) {}",
        result.safety.factor_of_safety,
        result.safety.target,
        status_icon(result.safety.ok)
    );
}

fn print_loads(case: &LoadCase) {
    if case.is_empty() {
        println!("    Loads: none");
        return;
    }
    println!("    Loads ({:.1} N total):", case.total_force());
    for load in &case.loads {
        println!("      {:<10} {}", load.display_name(), describe_load(load));
    }
}

fn describe_load(load: &Load) -> String {
    match *load {
        Load::Point {
            magnitude_n,
            position_m,
        } => format!("{:.1} N @ {:.3} m", magnitude_n, position_m),
        Load::Uniform {
            intensity_n_per_m,
            start_m,
            end_m,
        } => format!("{:.1} N/m from {:.3} to {:.3} m", intensity_n_per_m, start_m, end_m),
        Load::Triangular {
            start_intensity_n_per_m,
            end_intensity_n_per_m,
            start_m,
            end_m,
        } => format!(
            "{:.1} -> {:.1} N/m from {:.3} to {:.3} m",
            start_intensity_n_per_m,
            end_intensity_n_per_m,
            start_m.min(end_m),
            start_m.max(end_m)
        ),
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
