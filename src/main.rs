use std::path::PathBuf;

use anyhow::Context;
use careerup_scraping::{course_list_parser, csv_export, fs_util::load_document};
use chrono::Local;
use clap::Parser;
use log::{error, info};
use scraper::Html;

/// Converts the career-up training course list page into a CSV file.
#[derive(Parser)]
struct Opts {
    /// HTML file of the course list.
    #[clap(default_value = "tokyo_metropolitan_government_career_up_training.html")]
    input: PathBuf,
    /// Where to write the CSV.  A random file name in `--out-dir` is used if omitted.
    #[clap(long)]
    output: Option<PathBuf>,
    #[clap(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let opts = Opts::parse();
    info!("Started at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    let html = load_document(&opts.input)
        .with_context(|| format!("While reading the HTML file {:?}", opts.input))?;
    info!("Length of the HTML file: {} characters", html.chars().count());
    let html = Html::parse_document(&html);

    let course_names = course_list_parser::course_names(&html);
    info!("Found {} course names", course_names.len());

    let records = course_list_parser::parse(&html);
    info!("Extracted {} records", records.len());
    for record in records.iter().take(5) {
        info!("  {record:?}");
    }

    let path = opts
        .output
        .unwrap_or_else(|| csv_export::random_output_path(&opts.out_dir));
    info!("Output file: {path:?}");
    match csv_export::save(&path, &records) {
        Ok(size) => {
            println!("Successfully saved {} records to {path:?}.", records.len());
            info!("File size: {size} bytes");
        }
        Err(e) => {
            error!("Failed to write {path:?}: {e}");
            eprintln!("Failed to write the CSV file: {e}");
        }
    }

    info!("Finished at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}
