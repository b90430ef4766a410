mod cli;

use anyhow::Context;
use cfgsub::codec::{DocumentCodec, JsonCodec, YamlCodec};
use cfgsub::multidoc;
use cfgsub::overrides::OverrideStore;
use cfgsub::pattern::PlaceholderPattern;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("CFGSUB_LOG"))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let pattern = PlaceholderPattern::new(&cli.input.pattern)?;

    let codec: &dyn DocumentCodec = match cli.output.format {
        cli::OutputFormat::Yaml => &YamlCodec,
        cli::OutputFormat::Json => &JsonCodec,
    };

    let input_text = read(&cli.input.input)?;

    // No overrides file behaves like an empty one; ad-hoc fields may still
    // fill the store.
    let overrides_text = match &cli.input.overrides {
        Some(path) => read(path)?,
        None => String::new(),
    };

    let base = codec
        .decode(&overrides_text)
        .context("unable to decode overrides document")?;
    let store = OverrideStore::build(base, &cli.input.fields)?;

    let output = multidoc::resolve_all(&input_text, &store, &pattern, codec)?;
    print!("{output}");

    Ok(())
}

fn read(path: &std::path::Path) -> anyhow::Result<String> {
    tracing::info!(path = %path.display(), "loading file");
    std::fs::read_to_string(path).with_context(|| format!("unable to read {}", path.display()))
}
