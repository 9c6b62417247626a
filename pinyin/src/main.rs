//! Command-line demo for the pinyin annotation engine.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pinyin-ruby", about = "Annotate Chinese text with pinyin ruby markup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate text, printing ruby markup
    Annotate {
        /// Text to annotate
        text: String,
    },
    /// Strip annotations from markup, printing the plain text
    Strip {
        /// Markup to strip
        markup: String,
    },
    /// Show every candidate reading for one character
    Readings {
        /// The character to look up
        character: char,
    },
}

fn main() {
    let cli = Cli::parse();
    let annotator = pinyin_ruby::annotator();

    match cli.command {
        Command::Annotate { text } => match annotator.annotate_selection(&text) {
            Ok(markup) => println!("{markup}"),
            Err(err) => {
                eprintln!("⚠ {err}");
                std::process::exit(1);
            }
        },
        Command::Strip { markup } => {
            println!("{}", annotator.remove_annotations(&markup));
        }
        Command::Readings { character } => {
            let readings = annotator.lookup_readings(character);
            for (i, reading) in readings.iter().enumerate() {
                let marker = if i == 0 { " (default)" } else { "" };
                println!("{reading}{marker}");
            }
        }
    }
}
