use clap::Parser;
use smart_todo::config::Config;
use smart_todo::document::DocumentWriter;
use smart_todo::generation::GeminiClient;
use smart_todo::pipeline::Pipeline;
use smart_todo::ui::{App, TerminalPresenter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Smart to-do list: add tasks, let Gemini write the answer as a PDF.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// TOML file with api_key, model, api_base and output_dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model to use instead of the configured one
    #[arg(long)]
    model: Option<String>,

    /// Directory generated PDFs are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory `download` copies PDFs into when none is given
    #[arg(long, default_value = ".")]
    download_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "smart_todo=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(model) = &cli.model {
        config = config.with_model(model);
    }
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }
    info!(model = %config.model, output_dir = %config.output_dir.display(), "starting");

    let writer = DocumentWriter::new(&config.output_dir)?;
    let client = GeminiClient::new(&config.api_key, &config.model).with_api_base(&config.api_base);
    let pipeline = Pipeline::new(client, writer);

    let mut app = App::new(pipeline, TerminalPresenter::stdio()).with_download_dir(cli.download_dir);
    app.run();
    Ok(())
}
