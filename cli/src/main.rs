//! typewrite CLI - typewritten PDFs that keep their plain text

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use typewrite::{EngineOptions, Stylesheet, TypewriteOptions, Typewriter};

const LONG_ABOUT: &str = "\
Produce a pdf version of a plain text file with a typewritten look.

The original plain text version will be included as the first object
in the pdf file and will not be used for anything. This way the pdf
file can simply be opened in a text editor in order to extract the
original plain text version located at the top of the file.

Typewrite processes form-feed characters to adjust page breaks
accordingly. In all other cases it simply breaks pages after 57 lines
of text. It is therefore possible to use old-school page formatting
commands like 'pr --length=57' to prepare text for typewrite.";

#[derive(Parser)]
#[command(name = "typewrite")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = LONG_ABOUT)]
struct Cli {
    /// Input text file (or PDF with --extract)
    #[arg(value_name = "INPUT.TXT")]
    input: PathBuf,

    /// Output PDF file (or text file with --extract)
    #[arg(value_name = "OUTPUT.PDF")]
    output: PathBuf,

    /// Recover the embedded plain text from a typewritten PDF
    #[arg(short = 'x', long)]
    extract: bool,

    /// Typesetting engine program
    #[arg(long, value_name = "PROGRAM", default_value = "lualatex")]
    engine: String,

    /// Seconds before the engine is killed (0 = no limit)
    #[arg(long, value_name = "SECONDS", default_value_t = 120)]
    timeout: u64,

    /// JSON stylesheet with layout and typewriter settings
    #[arg(long, value_name = "FILE")]
    style: Option<PathBuf>,

    /// LaTeX paper option, overrides the stylesheet (e.g. letterpaper)
    #[arg(long, value_name = "NAME")]
    paper: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = if cli.extract {
        cmd_extract(&cli.input, &cli.output)
    } else {
        build_options(&cli).and_then(|options| cmd_typewrite(&cli.input, &cli.output, options))
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_options(cli: &Cli) -> Result<TypewriteOptions, Box<dyn std::error::Error>> {
    let mut stylesheet = match &cli.style {
        Some(path) => Stylesheet::from_json_file(path)?,
        None => Stylesheet::default(),
    };
    if let Some(paper) = &cli.paper {
        stylesheet = stylesheet.with_paper(paper.as_str());
    }

    let mut engine = EngineOptions::new().with_program(cli.engine.as_str());
    engine = if cli.timeout == 0 {
        engine.without_timeout()
    } else {
        engine.with_timeout(Duration::from_secs(cli.timeout))
    };

    Ok(TypewriteOptions::new()
        .with_stylesheet(stylesheet)
        .with_engine(engine))
}

fn cmd_typewrite(
    input: &Path,
    output: &Path,
    options: TypewriteOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("engine options: {:?}", options.engine);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Typesetting {}...", input.display()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = Typewriter::with_options(options).render_file(input, output);
    pb.finish_and_clear();
    result?;

    println!("{} {}", "Saved to".green(), output.display());
    Ok(())
}

fn cmd_extract(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    typewrite::extract_file(input, output)?;
    println!("{} {}", "Extracted to".green(), output.display());
    Ok(())
}
