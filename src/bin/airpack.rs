use airpack::compiler::archive;
use airpack::compiler::converter::{QuantizationDtype, TfjsConverter};
use airpack::compiler::loader;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a graph definition into an .air archive
    Compile {
        /// Path to the graph definition (YAML or JSON)
        #[arg(long, short)]
        file: PathBuf,

        /// Output archive, defaults to <name>.air
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Quantize converted model weights (float16, uint8, uint16)
        #[arg(long, value_parser = parse_dtype)]
        dtype: Option<QuantizationDtype>,

        /// Model converter program
        #[arg(long, default_value = "tensorflowjs_converter")]
        converter: String,
    },

    /// Print the configuration and entries of an .air archive
    Inspect {
        /// Path to the .air file
        file: PathBuf,
    },
}

fn parse_dtype(s: &str) -> Result<QuantizationDtype, String> {
    s.parse().map_err(|e: airpack::Error| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Compile {
            file,
            output,
            dtype,
            converter,
        } => {
            info!("Loading graph definition from: {:?}", file);
            let graph = loader::load_graph(file)?;

            let converter = TfjsConverter::new(converter);
            let written = graph.compile_with(output.as_deref(), *dtype, &converter)?;
            info!("Compiled {} nodes into {}", graph.nodes().len(), written.display());
        }
        Commands::Inspect { file } => {
            let config = archive::read_config_text(file)?;
            println!("{}", config);
            for entry in archive::list_entries(file)? {
                println!("  {}", entry);
            }
        }
    }

    Ok(())
}
