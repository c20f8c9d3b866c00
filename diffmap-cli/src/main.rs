mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use diffmap_core::AnalysisBundle;
use diffmap_pipeline::{AppConfig, Pipeline, default_export_path, write_bundle};
use diffmap_server::{ServerConfig, create_app};
use diffmap_telemetry::init_telemetry;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry("diffmap").map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { idea, export, model } => analyze(&idea, export, model).await,
        Commands::Serve { port } => serve(port).await,
    }
}

async fn analyze(idea: &str, export: Option<PathBuf>, model: Option<String>) -> Result<()> {
    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if let Some(model) = model {
        config = config.with_model(model);
    }

    let pipeline = Pipeline::from_config(&config)?;
    let bundle = pipeline.run(idea).await?;

    print_bundle(&bundle);

    if let Some(path) = export {
        let path =
            if path.is_dir() { default_export_path(&bundle, &path) } else { path };
        write_bundle(&bundle, &path)?;
        println!("\nExported bundle to {}", path.display());
    }

    Ok(())
}

async fn serve(port: u16) -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let pipeline = Arc::new(Pipeline::from_config(&config)?);
    let app = create_app(ServerConfig::new(pipeline));

    let addr = format!("0.0.0.0:{port}");
    let listener =
        tokio::net::TcpListener::bind(&addr).await.context("Failed to bind server port")?;
    tracing::info!(addr = %addr, "Serving web UI at http://localhost:{port}/ui/");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn print_bundle(bundle: &AnalysisBundle) {
    println!("Analysis for: {}", bundle.query);

    for notice in &bundle.notices {
        println!("  note: {notice}");
    }

    println!("\nCompetitors ({}):", bundle.competitors.len());
    for competitor in &bundle.competitors {
        println!("  - {}: {}", competitor.name, competitor.description);
    }

    if !bundle.chart.features.is_empty() {
        println!("\nFeature coverage:");
        for row in &bundle.chart.rows {
            let covered = row.presence.iter().filter(|p| **p == 1).count();
            println!("  - {} ({}/{} competitors)", row.feature, covered, bundle.chart.competitors.len());
        }
    }

    if !bundle.chart.gaps.is_empty() {
        println!("\nGaps:");
        for gap in &bundle.chart.gaps {
            println!("  - {} ({:?})", gap.feature, gap.kind);
        }
    }

    println!("\nPositioning:\n  {}", bundle.report.positioning_narrative);
    if !bundle.report.gaps.is_empty() {
        println!("\nMarket gaps:");
        for gap in &bundle.report.gaps {
            println!("  - {gap}");
        }
    }
    if !bundle.report.opportunities.is_empty() {
        println!("\nOpportunities:");
        for opportunity in &bundle.report.opportunities {
            println!("  - {opportunity}");
        }
    }
}
