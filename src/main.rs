use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_digest::{Cli, Commands, Config, SummaryPipeline, SummaryRequest, VideoId};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr
    let default_filter = if cli.verbose {
        "yt_digest=debug"
    } else if cli.quiet {
        "yt_digest=warn"
    } else {
        "yt_digest=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("❌ Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Summarize {
            video,
            output,
            model,
            format,
        } => {
            let video_id = VideoId::parse(&video)?;
            let config = Config::load()?;
            let format = format.unwrap_or(config.app.default_format);

            if !cli.quiet {
                if let Some(model) = &model {
                    println!("Using model: {}", style(model).yellow());
                }
                println!("Processing video: {}", video);
            }

            let pipeline = SummaryPipeline::new(&config, model.as_deref())?.quiet(cli.quiet);
            let path = pipeline
                .run(&SummaryRequest {
                    video_id,
                    output,
                    format,
                })
                .await?;

            println!(
                "{} Summary completed and saved to: {}",
                style("✅").green(),
                style(path.display()).cyan()
            );
        }
        Commands::Config { show, init } => {
            if init {
                let path = Config::init()?;
                println!("Default configuration written to: {}", path.display());
            }
            if show || !init {
                Config::load()?.display();
            }
        }
    }

    Ok(())
}
