//! emojidb - gemoji alias database CLI
//!
//! Main entry point for the emojidb command-line tool.

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use emojidb::*;

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_cli_logging(cli.quiet, cli.verbose);

    let config = Config::load();
    if !config.output.colors {
        colored::control::set_override(false);
    }

    match run(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<ExitCode> {
    match &cli.command {
        Commands::Build(args) => cmd_build(cli, config, args),
        Commands::Lookup(args) => cmd_lookup(cli, config, args),
        Commands::Replace(args) => cmd_replace(cli, config, args),
        Commands::Stats => cmd_stats(cli, config),
        Commands::Config(args) => cmd_config(cli, config, args),
        Commands::Completions(args) => cmd_completions(args.clone()),
    }
}

fn report_error(err: &EmojidbError) {
    eprintln!("{} {err}", "Error:".red().bold());
    if let Some(hint) = err.suggestion() {
        eprintln!("  {} {hint}", "Hint:".yellow());
    }
}

fn get_db_path(cli: &Cli, config: &Config) -> PathBuf {
    cli.db
        .clone()
        .or_else(|| config.paths.db.clone())
        .unwrap_or_else(default_db_path)
}

fn get_format(cli: &Cli, config: &Config) -> OutputFormat {
    cli.format
        .unwrap_or_else(|| config.output.format.parse().unwrap_or_default())
}

fn cmd_build(cli: &Cli, config: &Config, args: &cli::BuildArgs) -> Result<ExitCode> {
    let source = args
        .source
        .clone()
        .or_else(|| config.paths.source.clone())
        .unwrap_or_else(default_source_path);
    let db_path = get_db_path(cli, config);
    let format = get_format(cli, config);
    let quiet = cli.quiet || config.output.quiet;
    let with_verify = args.verify || config.build.verify;

    if matches!(format, OutputFormat::Text) && !quiet {
        println!("{}", "Building alias database...".bold().cyan());
        println!("  Source: {}", source.display());
        println!("  Database: {}", db_path.display());
        println!();
    }

    let report = convert(&source, &db_path)?;

    if with_verify {
        verify(&source, &db_path, &report)?;
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&report)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            if !quiet {
                println!(
                    "  {} {} records read",
                    "✓".green(),
                    format_number_usize(report.records_total)
                );
                println!(
                    "  {} {} aliases inserted",
                    "✓".green(),
                    format_number_usize(report.aliases_inserted)
                );
                if report.records_skipped > 0 {
                    println!(
                        "  {} {} records skipped",
                        "-".yellow(),
                        format_number_usize(report.records_skipped)
                    );
                }
                if with_verify {
                    println!("  {} verification passed", "✓".green());
                }
                println!();
            }

            match &report.longest_alias {
                Some(longest) => {
                    println!("{LONGEST_ALIAS_LABEL}");
                    println!("{longest}");
                }
                None => println!("{}", "No aliases found.".yellow()),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_lookup(cli: &Cli, config: &Config, args: &cli::LookupArgs) -> Result<ExitCode> {
    let storage = Storage::open(get_db_path(cli, config))?;

    match storage.get_emoji(&args.alias)? {
        Some(emoji) => {
            match get_format(cli, config) {
                OutputFormat::Json => {
                    let row = AliasRow {
                        alias: args.alias.clone(),
                        emoji: emoji.clone(),
                    };
                    println!("{}", serde_json::to_string(&row)?);
                }
                OutputFormat::JsonPretty => {
                    let row = AliasRow {
                        alias: args.alias.clone(),
                        emoji: emoji.clone(),
                    };
                    println!("{}", serde_json::to_string_pretty(&row)?);
                }
                OutputFormat::Text => println!("{emoji}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let known = storage.aliases()?;
            eprintln!("{}", format_unknown_alias_error(&args.alias, &known));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_replace(cli: &Cli, config: &Config, args: &cli::ReplaceArgs) -> Result<ExitCode> {
    let storage = Storage::open(get_db_path(cli, config))?;

    match &args.text {
        Some(text) => println!("{}", replace_aliases(&storage, text)?),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            // Stream semantics: emit exactly what the scan produced, with no
            // extra trailing newline.
            print!("{}", replace_aliases(&storage, &buf)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_stats(cli: &Cli, config: &Config) -> Result<ExitCode> {
    let storage = Storage::open(get_db_path(cli, config))?;
    let stats = storage.stats()?;

    match get_format(cli, config) {
        OutputFormat::Json => println!("{}", serde_json::to_string(&stats)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("{}", "Alias Database Statistics".bold().cyan());
            println!("{}", "─".repeat(40));
            println!("  {:<16} {:>12}", "Aliases:", format_number(stats.aliases));
            println!(
                "  {:<16} {:>12}",
                "Distinct emoji:",
                format_number(stats.emojis)
            );
            println!(
                "  {:<16} {:>12}",
                "File size:",
                format_bytes(stats.db_size_bytes)
            );
            println!("{}", "─".repeat(40));
            if let Some(longest) = &stats.longest_alias {
                println!("  Longest alias: {}", longest.green());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_config(cli: &Cli, config: &Config, args: &cli::ConfigArgs) -> Result<ExitCode> {
    if args.init {
        if let Some(existing) = Config::user_config_path().filter(|p| p.exists()) {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}. Remove it to regenerate.",
                existing.display()
            )
            .into());
        }
        Config::default()
            .save()
            .context("Failed to write the default config file")?;
        if let Some(path) = Config::user_config_path() {
            println!("{} Wrote default config to {}", "✓".green(), path.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    if args.show {
        let source = config
            .paths
            .source
            .clone()
            .unwrap_or_else(default_source_path);
        println!("{}", "Current Configuration".bold().cyan());
        println!("  Source: {}", source.display());
        println!("  Database: {}", get_db_path(cli, config).display());
        println!("  Verify after build: {}", config.build.verify);
        println!("  Format: {}", config.output.format);
        if let Some(path) = Config::user_config_path() {
            println!("  Config file: {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_completions(args: cli::CompletionsArgs) -> Result<ExitCode> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "emojidb", &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}
