// ABOUTME: Main entry point for the slidedeck program.
// ABOUTME: Provides CLI interface and runs the conversion pipeline from the library.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use slidedeck::{Config, EmptyDeckPolicy, Pipeline, PptxRenderer, SlidePattern};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    deck: DeckArgs,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the slide files into a deck (default)
    Convert,

    /// List the slide files in deck order without converting
    List,
}

#[derive(Args)]
struct DeckArgs {
    /// Directory holding the slide files and stylesheet
    #[arg(short, long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Output file, relative to the slides directory
    #[arg(short, long, default_value = slidedeck::config::DEFAULT_OUTPUT, global = true)]
    output: PathBuf,

    /// Stylesheet shared by every slide, relative to the slides directory
    #[arg(long, default_value = slidedeck::config::DEFAULT_STYLESHEET, global = true)]
    stylesheet: PathBuf,

    /// File name prefix that marks a slide
    #[arg(long, default_value = "slide", global = true)]
    prefix: String,

    /// File name extension that marks a slide
    #[arg(long, default_value = ".html", global = true)]
    extension: String,

    /// Document title stored in the deck properties
    #[arg(long, default_value = "Presentation", global = true)]
    title: String,

    /// Fail instead of writing an empty deck when no slides are found
    #[arg(long, global = true)]
    reject_empty: bool,
}

impl DeckArgs {
    fn to_config(&self) -> Config {
        let empty_policy = if self.reject_empty {
            EmptyDeckPolicy::Reject
        } else {
            EmptyDeckPolicy::Render
        };

        Config::new(&self.dir)
            .with_pattern(SlidePattern::new(&self.prefix, &self.extension))
            .with_stylesheet(&self.stylesheet)
            .with_output(&self.output)
            .with_empty_policy(empty_policy)
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.deck.to_config();
    let pipeline = Pipeline::new(config, PptxRenderer::new(&cli.deck.title));

    match cli.command.as_ref().unwrap_or(&Commands::Convert) {
        Commands::Convert => {
            let output = pipeline
                .run()
                .with_context(|| format!("Failed to convert slides in {:?}", cli.deck.dir))?;
            println!("Created {}", output.display());
        }
        Commands::List => {
            let slides = pipeline
                .plan()
                .with_context(|| format!("Failed to list slides in {:?}", cli.deck.dir))?;
            for slide in slides {
                println!("{}", slide.display());
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
