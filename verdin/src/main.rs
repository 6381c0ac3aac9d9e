use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use url::Url;
use verdin_core::{RdfFormat, RelationCategory, shape, validate_content};
use verdin_crawler::{Crawler, post_dataset_files};

mod commands;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    match chosen_command.subcommand() {
        Some(("crawl", primary_command)) => handle_crawl(primary_command, quiet).await,
        Some(("validate", primary_command)) => handle_validate(primary_command, quiet),
        Some(("check", primary_command)) => handle_check(primary_command, quiet),
        Some(("upload", primary_command)) => handle_upload(primary_command, quiet).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

async fn handle_crawl(args: &ArgMatches, quiet: bool) -> ExitCode {
    let url = args.get_one::<Url>("url").unwrap();
    let output = args.get_one::<String>("output");
    let timeout = *args.get_one::<u64>("timeout").unwrap();

    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_message(format!("Crawling {}", url));
        Some(pb)
    };

    let crawler = Crawler::with_timeout(timeout);
    let graph = match crawler.crawl(url.as_str()).await {
        Ok(graph) => graph,
        Err(e) => {
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
            eprintln!("{} {}", "Crawl failed:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(pb) = spinner {
        pb.finish_with_message(format!("Crawl complete: {} triples", graph.len()));
    }

    let serialized = graph.to_ntriples();
    match output {
        Some(path) => {
            let expanded = shellexpand::tilde(path);
            if let Err(e) = fs::write(expanded.as_ref(), serialized) {
                eprintln!("{} {}", "Failed to write output:".red(), e);
                return ExitCode::FAILURE;
            }
            if !quiet {
                println!("Wrote accumulated graph to {}", expanded);
            }
        }
        None => print!("{}", serialized),
    }
    ExitCode::SUCCESS
}

fn handle_validate(args: &ArgMatches, quiet: bool) -> ExitCode {
    let input = args.get_one::<String>("input").unwrap();
    let format = args.get_one::<String>("format").unwrap();
    let category = args.get_one::<String>("category").unwrap();
    let as_json = args.get_flag("json");

    let format = match RdfFormat::from_str(format) {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{} {}", "Invalid format:".red(), e);
            return ExitCode::FAILURE;
        }
    };
    let category = match RelationCategory::from_str(category) {
        Ok(category) => category,
        Err(e) => {
            eprintln!("{} {}", "Invalid category:".red(), e);
            return ExitCode::FAILURE;
        }
    };
    let content = match read_input(input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{} {}", "Failed to read input:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    let failures = match validate_content(&content, format, category) {
        Ok(failures) => failures,
        Err(e) => {
            eprintln!("{} {}", "Validation error:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    if as_json {
        let messages: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
        println!("{}", serde_json::to_string_pretty(&messages).unwrap());
    } else {
        for failure in &failures {
            println!("{} {}", "[FAIL]".red(), failure);
        }
        if failures.is_empty() && !quiet {
            println!("{} stream fragmentation holds for {category} relations", "[PASS]".green());
        }
    }

    if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn handle_check(args: &ArgMatches, quiet: bool) -> ExitCode {
    let input = args.get_one::<String>("input").unwrap();
    let format = args.get_one::<String>("format").unwrap();
    let path = args.get_one::<String>("path");
    let pattern = args.get_one::<String>("pattern");

    let format = match RdfFormat::from_str(format) {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{} {}", "Invalid format:".red(), e);
            return ExitCode::FAILURE;
        }
    };
    let content = match read_input(input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{} {}", "Failed to read input:".red(), e);
            return ExitCode::FAILURE;
        }
    };
    let graph = match verdin_core::Graph::parse(&content, format, None) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("{} {}", "Parse error:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut failures = shape::untyped_relation_targets(&graph);
    failures.extend(shape::values_without_wkt(&graph));
    if let (Some(path), Some(pattern)) = (path, pattern) {
        match shape::values_not_matching(&graph, path, pattern) {
            Ok(more) => failures.extend(more),
            Err(e) => {
                eprintln!("{} {}", "Check error:".red(), e);
                return ExitCode::FAILURE;
            }
        }
    }

    for failure in &failures {
        println!("{} {}", "[FAIL]".red(), failure);
    }
    if failures.is_empty() {
        if !quiet {
            println!("{} structural checks passed", "[PASS]".green());
        }
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn handle_upload(args: &ArgMatches, quiet: bool) -> ExitCode {
    let endpoint = args.get_one::<Url>("endpoint").unwrap();
    let content_type = args.get_one::<String>("content-type").unwrap();
    let files: Vec<PathBuf> = args
        .get_many::<String>("FILES")
        .unwrap()
        .map(|f| PathBuf::from(shellexpand::tilde(f).as_ref()))
        .collect();

    match post_dataset_files(&files, content_type, endpoint.as_str()).await {
        Ok(outcomes) => {
            if !quiet {
                for outcome in &outcomes {
                    println!("  {} -> {}", outcome.name, outcome.status);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "Upload failed:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(shellexpand::tilde(input).as_ref())
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
