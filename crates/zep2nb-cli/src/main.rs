//! zep2nb - Zeppelin note to Jupyter notebook converter
//!
//! Converts one exported Zeppelin note (JSON) into an nbformat 4.2 notebook.

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use std::path::{Path, PathBuf};
use zep2nb_cli::config::{Config, EffectiveConfig};
use zep2nb_cli::{output, source};
use zep2nb_notebook::{to_ipynb_string, Converter, IndexPolicy, Style};

#[derive(Parser, Debug)]
#[command(name = "zep2nb")]
#[command(author, version, about = "Convert Zeppelin notes to Jupyter notebooks")]
#[command(long_about = "Convert an exported Zeppelin note (JSON) to a Jupyter notebook.\n\
                  \n\
                  Paragraph directives map to cells: %md to markdown, %spark.pyspark to Python,\n\
                  %spark to %%scala, %splicemachine to %%sql. Bootstrap cells that create the\n\
                  Spark session and database connection are placed first.\n\
                  \n\
                  Defaults can be set via .zep2nb.toml configuration file.")]
struct Args {
    /// Zeppelin note JSON file, or '-' to read from stdin
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output notebook path (default: "<note name>.ipynb", never overwriting)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Directory for the derived output file (default: current directory, or from config)
    #[arg(long, value_name = "DIR", conflicts_with = "output")]
    output_dir: Option<PathBuf>,

    /// Fail instead of overwriting an existing OUTPUT
    #[arg(long)]
    no_clobber: bool,

    /// Write single-line JSON
    #[arg(long)]
    compact: bool,

    /// Number only code cells, without gaps for markdown paragraphs
    #[arg(long)]
    code_only_index: bool,

    /// Host written into the bootstrap cells
    #[arg(long, value_name = "HOST")]
    jdbc_host: Option<String>,

    /// Do not emit bootstrap cells
    #[arg(long)]
    no_bootstrap: bool,

    /// Use this config file instead of ~/.zep2nb.toml and ./.zep2nb.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,
}

impl Args {
    /// Layer command-line flags over the file configuration
    fn apply(&self, mut effective: EffectiveConfig) -> EffectiveConfig {
        if let Some(host) = &self.jdbc_host {
            effective.bootstrap.jdbc_host.clone_from(host);
        }
        if self.no_bootstrap {
            effective.bootstrap.enabled = false;
        }
        if self.code_only_index {
            effective.convert.index_policy = IndexPolicy::CodeOnly;
        }
        if let Some(dir) = &self.output_dir {
            effective.convert.output_dir.clone_from(dir);
        }
        if self.compact {
            effective.convert.compact = true;
        }
        effective
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path).context("Failed to load --config file"),
        None => Ok(Config::discover()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let effective = args.apply(load_config(args.config.as_deref())?.resolve());

    if args.print_config {
        print!(
            "{}",
            toml::to_string(&effective).context("Failed to render configuration")?
        );
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        Args::command().print_help()?;
        println!();
        return Ok(());
    };

    let content = source::read_source(input)?;
    let converter = Converter::with_options(effective.convert_options());
    log::debug!(
        "index policy {}, {} bootstrap cells",
        converter.options().index_policy,
        converter.options().bootstrap.cells().len()
    );
    let notebook = converter
        .convert_json(&content)
        .with_context(|| format!("Failed to convert {input}"))?;

    let style = if effective.convert.compact {
        Style::Compact
    } else {
        Style::Pretty
    };
    let ipynb = to_ipynb_string(&notebook, style)?;

    let written = match &args.output {
        Some(path) => {
            output::write_explicit(path, &ipynb, args.no_clobber)?;
            path.clone()
        }
        None => output::write_derived(&effective.convert.output_dir, &notebook.name, &ipynb)?,
    };

    let (major, minor) = notebook.format_version();
    log::info!(
        "wrote {} cells (nbformat {major}.{minor}) to {}",
        notebook.cells.len(),
        written.display()
    );
    println!("{}", written.display());
    Ok(())
}
