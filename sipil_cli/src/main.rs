//! # Sipil CLI Application
//!
//! Terminal front-end for `sipil_core`.
//!
//! ```text
//! sipil_cli                                     interactive demo
//! sipil_cli run <request.json> [--config <file.toml>]   batch, JSON to stdout
//! ```
//!
//! Set `RUST_LOG=debug` to see intermediate values.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::{info, warn};
use sipil_core::calculations::load_requests;
use sipil_core::config::DesignConfig;
use sipil_core::geotech::bearing::{self, BearingInput, FootingShape, DEFAULT_FACTOR_OF_SAFETY};
use sipil_core::optimizer::SectionCostOptimizer;
use sipil_core::seismic::{
    RiskCategory, SeismicReport, SeismicRequest, SeismicSpectrumEngine, SpectrumConfig,
    SpectrumCurve,
};
use sipil_core::{CalcError, CalcResult};

const USAGE: &str = "Usage: sipil_cli [run <request.json> [--config <file.toml>]]";

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.replace(',', ".").parse().ok())
        .unwrap_or(default)
}

fn prompt_string(prompt: &str, default: &str) -> String {
    prompt_line(prompt).unwrap_or_else(|| default.to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => {
            run_demo();
            ExitCode::SUCCESS
        }
        Some("run") => {
            let result = parse_run_args(&args[1..])
                .and_then(|(request, config)| run_batch(&request, config.as_deref()));
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    report_error(&e);
                    ExitCode::FAILURE
                }
            }
        }
        Some("-h") | Some("--help") | Some("help") => {
            println!("{}", USAGE);
            ExitCode::SUCCESS
        }
        Some(other) => {
            eprintln!("Unknown command '{}'", other);
            eprintln!("{}", USAGE);
            ExitCode::FAILURE
        }
    }
}

fn parse_run_args(args: &[String]) -> CalcResult<(PathBuf, Option<PathBuf>)> {
    let mut request = None;
    let mut config = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter
                    .next()
                    .ok_or_else(|| CalcError::missing_field("--config <file.toml>"))?;
                config = Some(PathBuf::from(path));
            }
            _ if request.is_none() => request = Some(PathBuf::from(arg)),
            _ => {
                return Err(CalcError::invalid_input(
                    "arguments",
                    arg.clone(),
                    "Unexpected extra argument",
                ))
            }
        }
    }
    let request = request.ok_or_else(|| CalcError::missing_field("<request.json>"))?;
    Ok((request, config))
}

fn run_batch(request_path: &Path, config_path: Option<&Path>) -> CalcResult<()> {
    let config = match config_path {
        Some(path) => DesignConfig::load(path)?,
        None => DesignConfig::default(),
    };
    let requests = load_requests(request_path)?;
    info!("Running {} request(s) from {}", requests.len(), request_path.display());

    let mut outputs = Vec::with_capacity(requests.len());
    for request in &requests {
        let output = request.run(&config).map_err(|e| {
            warn!("{} '{}' failed: {}", request.calc_type(), request.label(), e);
            e
        })?;
        outputs.push(output);
    }

    let json = serde_json::to_string_pretty(&outputs)?;
    println!("{}", json);
    Ok(())
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!("{}", json);
    }
}

fn run_demo() {
    println!("Sipil CLI - Civil Engineering Calculator");
    println!("========================================");
    println!();

    let ss = prompt_f64("Enter Ss (g) [0.75]: ", 0.75);
    let s1 = prompt_f64("Enter S1 (g) [0.35]: ", 0.35);
    let site_class = prompt_string("Enter site class (SA-SF) [SD]: ", "SD");
    let risk = prompt_string("Enter risk category (I-IV) [II]: ", "II");
    let moment = prompt_f64("Enter design moment Mu (kNm) [150.0]: ", 150.0);
    let span = prompt_f64("Enter beam span (m) [6.0]: ", 6.0);

    let config = DesignConfig::default();
    println!();

    let mut request = SeismicRequest::new("CLI-Demo", ss, s1, site_class);
    match RiskCategory::from_str_flexible(&risk) {
        Ok(category) => request = request.with_risk_category(category),
        Err(e) => warn!("{}; design category skipped", e),
    }
    match SeismicSpectrumEngine::analyze(&request, &config.spectrum) {
        Ok(report) => print_seismic(&report, &config.spectrum),
        Err(e) => report_error(&e),
    }

    println!();
    let optimizer = SectionCostOptimizer::new(config.optimizer);
    match optimizer.run(moment, span, 25.0, 400.0, &config.cost_rates) {
        Ok(report) => {
            println!("═══════════════════════════════════════");
            println!("  BEAM SECTIONS (f'c 25, fy 400)");
            println!("═══════════════════════════════════════");
            if report.is_empty() {
                println!("  No section in the search range carries this moment.");
            }
            for (rank, c) in report.candidates.iter().enumerate() {
                let bars = c
                    .suggested_bars
                    .map(|b| b.to_string())
                    .unwrap_or_else(|| "2 layers".to_string());
                println!(
                    "  {}. {} x {} mm  As={:.0} mm² ({})  ρ={:.4}{}  Rp {:.0}/m",
                    rank + 1,
                    c.width_mm,
                    c.height_mm,
                    c.required_steel_area_mm2,
                    bars,
                    c.reinforcement_ratio,
                    if c.governed_by_minimum { " min" } else { "" },
                    c.estimated_cost
                );
            }
            println!(
                "  Searched {} sections from h ≥ {} mm",
                report.evaluated, report.height_lower_bound_mm
            );

            println!();
            println!("JSON Output:");
            if let Ok(json) = serde_json::to_string_pretty(&report.candidates) {
                println!("{}", json);
            }
        }
        Err(e) => report_error(&e),
    }

    println!();
    run_footing_demo();
}

fn run_footing_demo() {
    let names: Vec<&str> = FootingShape::ALL.iter().map(|s| s.display_name()).collect();
    let shape_prompt = format!("Enter footing shape ({}) [Square]: ", names.join("/"));
    let shape = prompt_string(&shape_prompt, "Square");
    let shape = FootingShape::from_str_flexible(&shape).unwrap_or_else(|e| {
        warn!("{}; using Square", e);
        FootingShape::Square
    });
    let input = BearingInput {
        label: "CLI-Footing".to_string(),
        shape,
        width_m: prompt_f64("Enter footing width B (m) [2.0]: ", 2.0),
        depth_m: prompt_f64("Enter embedment depth Df (m) [1.0]: ", 1.0),
        cohesion_kpa: prompt_f64("Enter cohesion c (kPa) [10.0]: ", 10.0),
        friction_angle_deg: prompt_f64("Enter friction angle φ (deg) [30.0]: ", 30.0),
        unit_weight_kn_m3: prompt_f64("Enter unit weight γ (kN/m³) [18.0]: ", 18.0),
        factor_of_safety: DEFAULT_FACTOR_OF_SAFETY,
    };
    let load = prompt_f64("Enter column service load (kN) [500.0]: ", 500.0);
    println!();

    match bearing::calculate(&input) {
        Ok(result) => {
            println!("═══════════════════════════════════════");
            println!("  FOOTING BEARING ({}, B = {} m)", input.shape, input.width_m);
            println!("═══════════════════════════════════════");
            println!(
                "  Nc = {:.2}   Nq = {:.2}   Nγ = {:.2}",
                result.factors.nc, result.factors.nq, result.factors.ngamma
            );
            println!("  q_ult = {:.1} kPa   q_allow = {:.1} kPa", result.q_ult_kpa, result.q_allow_kpa);
            println!("  Allowable load = {:.1} kN", result.allowable_load_kn);
            let verdict = if result.supports(load) { "OK" } else { "NOT OK" };
            println!("  Service load {:.1} kN: {}", load, verdict);
        }
        Err(e) => report_error(&e),
    }
}

fn print_seismic(report: &SeismicReport, spectrum: &SpectrumConfig) {
    let c = &report.coefficients;
    let p = &report.parameters;
    println!("═══════════════════════════════════════");
    println!("  SEISMIC SPECTRUM ({})", c.site_class);
    println!("═══════════════════════════════════════");
    println!("  Fa = {:.3}   Fv = {:.3}", c.fa, c.fv);
    println!("  SDS = {:.3} g   SD1 = {:.3} g", p.sds, p.sd1);
    println!("  T0 = {:.3} s   Ts = {:.3} s", p.t0, p.ts);
    if !c.note.is_empty() {
        println!("  Note: {}", c.note);
    }
    if let Some(category) = report.design_category {
        println!("  Seismic design category: {:?}", category);
    }
    let curve = SpectrumCurve::new(report.parameters, spectrum.num_points, spectrum.t_max);
    if let Some(peak) = curve.peak() {
        println!("  Peak Sa = {:.3} g at T = {:.2} s", peak.acceleration, peak.period);
    }
    if report.needs_attention() {
        println!("  [ATTENTION] Result needs further site investigation");
    }
    for point in report.curve.iter().step_by(10) {
        println!("    T = {:>5.2} s   Sa = {:.3} g", point.period, point.acceleration);
    }
}
