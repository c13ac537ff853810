//! Writes TypeScript bindings for every `rk-protocol` type.
//!
//! The browser client imports these so its view of runs, results and
//! bookmarks cannot drift from the Rust definitions.

use anyhow::{Context, Result};
use clap::Parser;
use rk_protocol::*;
use std::path::PathBuf;
use ts_rs::TS;

#[derive(Parser, Debug)]
#[command(name = "rk-protocol-ts", about = "Generate TypeScript bindings for rk-protocol")]
struct Args {
    /// Output directory for the generated `.ts` files.
    #[arg(short, long, default_value = "bindings")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let out = &args.out_dir;

    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;

    // export_all_to follows dependencies, so nested types come along.
    Event::export_all_to(out).context("Failed to export Event")?;
    Bookmark::export_all_to(out).context("Failed to export Bookmark")?;
    PipelineRun::export_all_to(out).context("Failed to export PipelineRun")?;
    ResearchQuery::export_all_to(out).context("Failed to export ResearchQuery")?;
    AgentStage::export_all_to(out).context("Failed to export AgentStage")?;
    GlobalConfig::export_all_to(out).context("Failed to export GlobalConfig")?;
    IdeasResponse::export_all_to(out).context("Failed to export IdeasResponse")?;
    TopicRequest::export_all_to(out).context("Failed to export TopicRequest")?;

    println!("TypeScript bindings written to {}", out.display());
    Ok(())
}
