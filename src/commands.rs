//! Command implementations for the CLI
//!
//! Each subcommand resolves its configuration, runs the library and renders
//! the result either for a terminal or as JSON.

use crate::cli::{
    Args, Command, DatasetArgs, FeaturesArgs, InspectArgs, OutputFormat, PredictArgs, TargetArgs,
    predictor_config,
};
use crate::dataset::{Dataset, DatasetSummary};
use crate::generator::{RngSource, WeatherGenerator};
use crate::models::{DistrictClass, Prediction, WeatherSample};
use crate::predictor::WeatherPredictor;
use anyhow::{Context, Result};
use chrono::Datelike;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Dispatch to the selected subcommand
pub fn run(args: Args) -> Result<()> {
    let format = args.format;
    let show_progress = format == OutputFormat::Human && !args.quiet;

    match args.command {
        Command::Predict(predict) => run_predict(predict, format, show_progress),
        Command::Features(features) => run_features(features, format),
        Command::Districts(dataset) => run_districts(dataset, format),
        Command::Inspect(inspect) => run_inspect(inspect, format, show_progress),
    }
}

fn run_predict(args: PredictArgs, format: OutputFormat, show_progress: bool) -> Result<()> {
    let config = predictor_config(&args.dataset, &args.forest, args.target.sample_seed)?;
    let district = args.target.district();
    warn_if_unknown_district(district);

    let progress = training_progress(show_progress);
    let predictor = WeatherPredictor::initialize(&config, &progress).with_context(|| {
        format!(
            "Failed to initialise predictor from {}",
            config.dataset_path.display()
        )
    })?;

    let mut generator = generator_for(&args.target);
    let prediction = predictor
        .predict(district, args.target.date_or_today(), &mut generator)
        .with_context(|| {
            format!(
                "Cannot predict for '{}'. Known districts: {}",
                district,
                predictor.districts().join(", ")
            )
        })?;

    match format {
        OutputFormat::Json => print_json(&prediction),
        OutputFormat::Human => {
            print_prediction(&prediction, predictor.summary().records);
            Ok(())
        }
    }
}

fn run_features(args: FeaturesArgs, format: OutputFormat) -> Result<()> {
    let district = args.target.district();
    warn_if_unknown_district(district);

    let date = args.target.date_or_today();
    let mut generator = generator_for(&args.target);
    let sample = generator.generate(district, date.ordinal());

    match format {
        OutputFormat::Json => print_json(&sample),
        OutputFormat::Human => {
            println!(
                "{} {} {}",
                "Synthetic weather for".bright_green().bold(),
                sample.district.bright_cyan().bold(),
                format!("({}, day {})", date.format("%d %B %Y"), sample.day_of_year).bright_black()
            );
            print_features(&sample);
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct DistrictEntry {
    district: String,
    class: DistrictClass,
    records: usize,
}

fn run_districts(args: DatasetArgs, format: OutputFormat) -> Result<()> {
    let path = args.resolve()?;
    let summary = Dataset::load(&path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?
        .summary();

    let entries: Vec<DistrictEntry> = summary
        .districts
        .iter()
        .map(|(district, records)| DistrictEntry {
            district: district.clone(),
            class: DistrictClass::for_name(district),
            records: *records,
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Human => {
            println!("{}", "Districts in dataset:".bright_green().bold());
            println!();
            for (i, entry) in entries.iter().enumerate() {
                println!(
                    "  {}. {} {} {}",
                    (i + 1).to_string().bright_yellow().bold(),
                    entry.district.bright_cyan(),
                    format!("[{}]", entry.class).bright_white(),
                    format!("({} records)", entry.records).bright_black()
                );
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct InspectReport<'a> {
    summary: &'a DatasetSummary,
    trees: usize,
    training_accuracy: f64,
}

fn run_inspect(args: InspectArgs, format: OutputFormat, show_progress: bool) -> Result<()> {
    let config = predictor_config(&args.dataset, &args.forest, None)?;
    let dataset = Dataset::load(&config.dataset_path)
        .with_context(|| format!("Failed to load dataset {}", config.dataset_path.display()))?;

    let progress = training_progress(show_progress);
    let predictor = WeatherPredictor::from_dataset(&dataset, &config, &progress)?;
    let accuracy = predictor.classifier().accuracy(dataset.records())?;
    info!("Training accuracy: {:.4}", accuracy);

    let report = InspectReport {
        summary: predictor.summary(),
        trees: predictor.classifier().n_trees(),
        training_accuracy: accuracy,
    };

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Human => {
            let summary = report.summary;
            println!(
                "{} {}",
                "Dataset:".bright_green().bold(),
                summary.path.display().to_string().bright_cyan()
            );
            println!("  Records: {}", summary.records.to_string().bright_yellow());
            print_counts("Weather labels", &summary.weather);
            print_counts("Monsoon phases", &summary.monsoon_phases);
            print_counts("Districts", &summary.districts);
            println!();
            println!(
                "{} {:.2}% ({} trees)",
                "Training accuracy:".bright_green().bold(),
                report.training_accuracy * 100.0,
                report.trees
            );
            Ok(())
        }
    }
}

fn generator_for(target: &TargetArgs) -> WeatherGenerator<RngSource<StdRng>> {
    match target.sample_seed {
        Some(seed) => WeatherGenerator::seeded(seed),
        None => WeatherGenerator::from_entropy(),
    }
}

/// Names outside the known districts still generate, with unadjusted base values
fn warn_if_unknown_district(district: &str) {
    if DistrictClass::for_name(district) == DistrictClass::Other {
        warn!(
            "'{}' is not a known Kerala district; using unadjusted base values",
            district
        );
    }
}

fn training_progress(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Training forest [{bar:30.cyan/blue}] {pos}/{len} trees ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    progress
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialise output")?;
    println!("{}", json);
    Ok(())
}

fn print_prediction(prediction: &Prediction, trained_on: usize) {
    println!(
        "{} {}",
        "Predicted weather:".bright_green().bold(),
        prediction.weather.bright_yellow().bold()
    );
    println!();
    println!(
        "  District:      {} {}",
        prediction.district.bright_cyan(),
        format!("[{}]", prediction.district_class).bright_black()
    );
    println!(
        "  Date:          {} (Day {})",
        prediction.date.format("%d %B %Y"),
        prediction.day_of_year
    );
    println!();
    println!("{}", "Generated weather features:".bright_white().bold());
    print_features(&prediction.features);
    println!();
    println!(
        "{}",
        format!("Model trained on {} Kerala weather records", trained_on).bright_black()
    );
}

fn print_features(sample: &WeatherSample) {
    let m = &sample.measurements;
    println!("  Monsoon phase: {}", sample.monsoon_phase.bright_cyan());
    println!("  Temperature:   {:.2} °C", m.temperature);
    println!("  Humidity:      {:.2} %", m.humidity);
    println!("  Pressure:      {:.2} hPa", m.pressure);
    println!("  Wind speed:    {:.2}", m.wind_speed);
    println!("  Precipitation: {:.2}", m.precipitation);
    println!("  Cloud cover:   {:.2} %", m.cloud_cover);
}

fn print_counts(title: &str, counts: &BTreeMap<String, usize>) {
    println!("  {}:", title);
    for (label, count) in counts {
        println!("    {:<22} {}", label, count.to_string().bright_yellow());
    }
}
