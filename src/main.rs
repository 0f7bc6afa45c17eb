use clap::{Args, Parser, Subcommand};
use imgtweak::config;
use imgtweak::filters::FilterRegistry;
use imgtweak::imaging::RustBackend;
use imgtweak::output;
use imgtweak::size::SizeArg;
use imgtweak::transform::{FilterImage, ResizeImage, Transform};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imgtweak")]
#[command(about = "Resize images and apply Instagram-style filters")]
#[command(long_about = "\
Resize images and apply Instagram-style filters

Every command checks its inputs before writing anything:

  1. the input exists, is a regular file, and is not empty
  2. the input content is an image (sniffed, not guessed from the extension)
  3. the output does not exist yet and is not a directory
  4. resize: width and height are positive and the output fits in 512 MiB
     filter: the input is not a symlink and the filter name is known

Existing files are never overwritten.

Run 'imgtweak filters' to list every filter name.")]
#[command(version)]
struct Cli {
    /// Directory holding an optional config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Log each check and dispatch step (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
#[group(required = true, multiple = true)]
struct SizeArgs {
    /// Target width in pixels
    #[arg(long, requires = "height", conflicts_with = "size", allow_negative_numbers = true)]
    width: Option<i64>,

    /// Target height in pixels
    #[arg(long, requires = "width", conflicts_with = "size", allow_negative_numbers = true)]
    height: Option<i64>,

    /// Square target: width and height in pixels
    #[arg(long, allow_negative_numbers = true)]
    size: Option<i64>,
}

impl SizeArgs {
    fn to_size_arg(&self) -> SizeArg {
        match (self.size, self.width, self.height) {
            (Some(side), _, _) => SizeArg::Square(side),
            (None, width, height) => {
                SizeArg::from((width.unwrap_or_default(), height.unwrap_or_default()))
            }
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Resize an image to an exact size
    Resize {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        size: SizeArgs,
    },
    /// Apply a named filter
    Filter {
        input: PathBuf,
        output: PathBuf,
        /// Filter name, see 'imgtweak filters'
        #[arg(long)]
        filter: String,
    },
    /// List every filter name, grouped by family
    Filters,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "imgtweak=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Resize {
            input,
            output,
            size,
        } => {
            let config = config::load_config(&cli.config_dir)?;
            let backend = RustBackend::new();
            let checked = ResizeImage::new(&input, &output, size.to_size_arg())?
                .with_sampling(config.resize.sampling)
                .with_quality(config.quality())
                .check(&backend)?;
            let target = checked.request().size();
            checked.execute(&backend)?;
            output::print_resize_output(&input, &output, target);
        }
        Command::Filter {
            input,
            output,
            filter,
        } => {
            let config = config::load_config(&cli.config_dir)?;
            let backend = RustBackend::new();
            let checked = FilterImage::new(&input, &output, &filter)
                .with_quality(config.quality())
                .check(&backend)?;
            let resolved = *checked.plan();
            checked.execute(&backend)?;
            output::print_filter_output(&input, &output, &resolved);
        }
        Command::Filters => {
            output::print_filter_list(FilterRegistry::builtin());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
