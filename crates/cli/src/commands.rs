//! Subcommand handlers.

use crate::cli::BookmarkAction;
use crate::render;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use colored::Colorize;
use rk_core::bookmarks::BookmarkStore;
use rk_core::config::loader::load_config;
use rk_core::config::models::AppConfig;
use rk_core::engine::{ControllerConfig, PipelineController};
use rk_core::init::{generate_research_kit_structure, InitOptions};
use rk_core::service::{HttpResearchClient, MockResearchService, ResearchService};
use rk_core::state::QueryState;
use rk_core::storage::FileStore;
use rk_protocol::bookmark_models::Bookmark;
use rk_protocol::research_models::IdeaSection;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Flags shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalFlags {
    pub root: std::path::PathBuf,
    pub json: bool,
    pub offline: bool,
}

fn service_for(config: &AppConfig, offline: bool) -> Result<Arc<dyn ResearchService>> {
    if offline {
        tracing::info!("Using offline research service");
        let ideas = vec![IdeaSection {
            title: "Offline ideas".to_string(),
            ideas: vec!["Connect a research service to get real ideas.".to_string()],
        }];
        return Ok(Arc::new(MockResearchService::offline().with_ideas(Ok(ideas))));
    }

    let client = HttpResearchClient::new(
        config.global.service_url.clone(),
        Duration::from_secs(config.global.request_timeout_secs),
    )?;
    Ok(Arc::new(client))
}

async fn open_bookmarks(config: &AppConfig) -> BookmarkStore {
    BookmarkStore::load(Arc::new(FileStore::new(config.data_dir.clone()))).await
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run(flags: &GlobalFlags, topic: &str, bookmark: bool) -> Result<()> {
    let config = load_config(&flags.root).await?;
    let service = service_for(&config, flags.offline)?;

    let (events_tx, mut events_rx) = mpsc::channel(64);
    let controller = PipelineController::new(
        ControllerConfig::from_global(&config.global),
        service,
        QueryState::new(),
        events_tx,
    );

    let stages = controller.stages().to_vec();
    let quiet = flags.json;
    let renderer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            if quiet {
                continue;
            }
            if let Some(line) = render::event_line(&event, &stages) {
                println!("{line}");
            }
        }
    });

    let outcome = controller.start_run(topic).await;
    let run = controller.current_run().await;
    // Closes the event channel so the renderer drains and exits.
    drop(controller);
    renderer.await?;

    let result = outcome?;

    if bookmark {
        let mut store = open_bookmarks(&config).await;
        store
            .add(Bookmark::from_result(&run.topic, &result))
            .await
            .wrap_err("Failed to save bookmark")?;
    }

    if flags.json {
        return print_json(&result);
    }

    println!();
    print!("{}", render::result(&result));
    if bookmark {
        println!("\n{} {}", "Bookmarked".green(), run.topic);
    }
    Ok(())
}

pub async fn bookmarks(flags: &GlobalFlags, action: BookmarkAction) -> Result<()> {
    let config = load_config(&flags.root).await?;
    let mut store = open_bookmarks(&config).await;

    match action {
        BookmarkAction::List => {
            if flags.json {
                return print_json(store.list());
            }
            print!("{}", render::bookmarks(store.list()));
        }
        BookmarkAction::Remove { id } => {
            if !store.remove(&id).await? {
                return Err(eyre!("No bookmark with id {id}"));
            }
            println!("{} {id}", "Removed".green());
        }
        BookmarkAction::RemoveTopic { topic } => {
            if !store.remove_topic(&topic).await? {
                return Err(eyre!("No bookmark for topic {topic:?}"));
            }
            println!("{} {topic}", "Removed".green());
        }
    }
    Ok(())
}

pub async fn ideas(flags: &GlobalFlags, topic: &str) -> Result<()> {
    let config = load_config(&flags.root).await?;
    let service = service_for(&config, flags.offline)?;

    // Idea generation needs no stages and emits no events.
    let (events_tx, _events_rx) = mpsc::channel(1);
    let controller = PipelineController::new(
        ControllerConfig::from_global(&config.global),
        service,
        QueryState::new(),
        events_tx,
    );

    let sections = controller.generate_ideas(topic).await?;
    if flags.json {
        return print_json(&sections);
    }
    print!("{}", render::ideas(&sections));
    Ok(())
}

pub async fn init(root: &Path, force: bool) -> Result<()> {
    let path = generate_research_kit_structure(InitOptions {
        target_dir: root.to_path_buf(),
        force,
    })
    .await?;
    println!("{} {}", "Created".green(), path.display());
    Ok(())
}
