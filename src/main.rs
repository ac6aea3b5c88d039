#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "jsonschema2avro", about = "Convert JSON Schema to Avro Schema")]
struct Cli {
    /// Path (or URL, with the `http` feature) to the JSON Schema input
    #[arg(value_name = "JSONSCHEMA")]
    input: String,

    /// Path to the Avro schema output file
    #[arg(value_name = "AVRO")]
    output: String,

    /// Root namespace for emitted records
    #[arg(long, default_value = jsonschema_avro::converter::DEFAULT_NAMESPACE)]
    namespace: String,

    /// Maximum schema nesting depth
    #[arg(long, default_value_t = jsonschema_avro::converter::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Write the schema on a single line
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Log conversion details to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[cfg(feature = "cli")]
fn main() {
    use tracing_subscriber::EnvFilter;

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = jsonschema_avro::converter::convert_jsons_to_avro(
        &cli.input,
        &cli.output,
        &cli.namespace,
        cli.max_depth,
        !cli.compact,
    ) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary is only available with the `cli` feature enabled.");
    std::process::exit(1);
}
