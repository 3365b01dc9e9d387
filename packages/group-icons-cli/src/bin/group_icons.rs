/**
 * Group Icons CLI - group-icons
 *
 * Generates the icon stylesheet from rendered documents on disk.
 */
use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use group_icons_cli::{generate, labels, load_options, resolve};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let documents = Arg::new("documents")
        .value_name("GLOB")
        .num_args(1..)
        .required(true)
        .help("Rendered documents to scan for labels");

    Command::new("group-icons")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Code block title icons for documentation builds")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .help("Path to a JSON options file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log debug output to stderr"),
        )
        .subcommand(
            Command::new("generate")
                .about("Write the icon stylesheet for the labels found in documents")
                .arg(documents.clone())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("PATH")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Write CSS to a file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("labels")
                .about("List labels found in documents and the icon each one matched")
                .arg(documents),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print the CSS-encoded SVG for an icon reference")
                .arg(
                    Arg::new("icon")
                        .value_name("ICON")
                        .required(true)
                        .help("`<collection>:<name>`, inline `<svg>` markup or an http(s) URL"),
                ),
        )
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("group_icons=debug,group_icons_cli=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn documents(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("documents")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

async fn run(name: &str, sub: &ArgMatches) -> Result<()> {
    let options = load_options(sub.get_one::<PathBuf>("config"))?;

    match name {
        "generate" => {
            let css = generate(&documents(sub), &options).await?;
            match sub.get_one::<PathBuf>("output") {
                Some(path) => fs::write(path, css)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", css),
            }
        }
        "labels" => {
            for report in labels(&documents(sub), &options)? {
                println!("{}", report);
            }
        }
        "resolve" => {
            let icon = sub
                .get_one::<String>("icon")
                .context("missing icon reference")?;
            println!("{}", resolve(icon, &options).await?);
        }
        _ => unreachable!("unknown subcommand `{}`", name),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    // Global args propagate down, so read them from the subcommand.
    let Some((name, sub)) = matches.subcommand() else {
        unreachable!("subcommand is required");
    };
    setup_tracing(sub.get_flag("verbose"));

    if let Err(err) = run(name, sub).await {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
