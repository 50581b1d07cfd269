use std::io::{self, BufRead, Write};

use clap::Parser;
use log::info;

use amygdala::{
    result_rows, status_line, viewport_width, AnalysisConfig, AnalysisSession, BuiltinModel,
    LayoutParams, ModelManager, OnnxToxicityProvider, DEFAULT_THRESHOLD,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Force a fresh download of the model files
    #[arg(short, long)]
    fresh: bool,

    /// Confidence threshold for the toxic verdict
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f32,
}

async fn ensure_model_downloaded(
    manager: &ModelManager,
    fresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = BuiltinModel::ToxicRoberta;

    if fresh {
        info!("Fresh download requested - removing any existing model files...");
        manager.remove_download(model)?;
    }

    if !manager.is_model_downloaded(model) {
        info!("Downloading model...");
        manager.download_model(model).await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Starting Toxicity Checker ===");

    let manager = ModelManager::new_default()?;
    if let Err(e) = ensure_model_downloaded(&manager, args.fresh).await {
        // The view swallows load failures; the download error is diagnostic only
        log::error!("Failed to prepare model files: {}", e);
    }

    let provider = OnnxToxicityProvider::new(manager, BuiltinModel::ToxicRoberta);
    let config = AnalysisConfig::new(args.threshold);
    let mut session = AnalysisSession::new(provider, config);

    let layout = LayoutParams::for_width(viewport_width());
    print_title(&layout);

    info!("Loading model with threshold {}", config.threshold);
    session.mount().await;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if let Some(status) = status_line(session.state()) {
            println!("{}", status);
        }
        print!("Enter text to analyze for toxicity (empty line to quit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            break;
        }

        session.set_input(line);
        session.analyze().await;

        let rows = result_rows(session.state().predictions(), config.threshold);
        if !rows.is_empty() {
            println!("\nAnalysis Results:");
            let indent = if layout.is_compact() { " " } else { "  " };
            for row in rows {
                println!("{}{}", indent, row);
            }
            println!();
        }
    }

    session.teardown();
    info!("=== Toxicity Checker Done ===");
    Ok(())
}

fn print_title(layout: &LayoutParams) {
    let rule_width = if layout.is_compact() { 24 } else { 40 };
    println!("{}", "=".repeat(rule_width));
    println!("Toxicity Checker");
    println!("{}", "=".repeat(rule_width));
}
