use anyhow::Result;
use clap::Parser;
use maplabel_rs::config::{load_config, CliArgs, StyleSheet};
use maplabel_rs::errors::AppResult;
use maplabel_rs::feature::Feature;
use maplabel_rs::style::Style;
use maplabel_rs::{label, text};
use std::io::{self, BufRead};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration
    let sheet = load_config(&args)?;

    if args.debug_config {
        println!("Configuration:");
        println!("{:#?}", sheet);
        return Ok(());
    }

    run(&args, &sheet)?;

    Ok(())
}

fn run(args: &CliArgs, sheet: &StyleSheet) -> AppResult<()> {
    let names = if args.features.is_empty() {
        read_stdin_names()?
    } else {
        args.features.clone()
    };

    for name in names {
        let feature = Feature::new(name, args.geometry);
        let style = label::styled(&feature, args.resolution, sheet);
        print_styled(&feature, &style);
    }

    Ok(())
}

fn read_stdin_names() -> AppResult<Vec<String>> {
    let mut names = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            names.push(trimmed.to_string());
        }
    }
    Ok(names)
}

fn print_styled(feature: &Feature, style: &Style) {
    let Some(text_style) = &style.text else {
        return;
    };

    if text_style.text.is_empty() {
        println!("{}: (no label at this resolution)", feature.name);
        return;
    }

    let width = text::display_width(&text_style.text);
    println!(
        "{} [{}, {} {}, {} cols]:",
        feature.name, text_style.font, text_style.align, text_style.baseline, width
    );
    for line in text_style.text.lines() {
        println!("  {}", line);
    }
}
