//! Loading `.research-kit/config.toml` into a controller.

mod common;

use common::fixtures::create_test_project;
use rk_core::config::loader::load_config_with_env;
use rk_core::engine::ControllerConfig;
use rk_core::init::{generate_research_kit_structure, InitOptions};
use rk_protocol::config_models::ReentryPolicy;
use std::time::Duration;

#[test]
fn test_custom_stages_drive_controller_config() {
    let project = create_test_project(
        r#"
stage_delay_ms = 10
reentry = "cancel_previous"

[[stages]]
id = "generationAgent"
display_name = "Generation Agent"
increment = 50

[[stages]]
id = "metaReviewAgent"
display_name = "Meta-review Agent"
"#,
    )
    .unwrap();

    let config = load_config_with_env(project.path(), |_| None).unwrap();
    let controller = ControllerConfig::from_global(&config.global);

    assert_eq!(controller.stage_delay, Duration::from_millis(10));
    assert_eq!(controller.reentry, ReentryPolicy::CancelPrevious);
    assert_eq!(controller.stages.len(), 2);
    assert_eq!(controller.stages[1].ordinal, 1);
    assert_eq!(controller.stages[0].increment, Some(50));
    assert_eq!(controller.stages[1].increment, None);
}

#[tokio::test]
async fn test_initialized_project_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    generate_research_kit_structure(InitOptions {
        target_dir: dir.path().to_path_buf(),
        force: false,
    })
    .await
    .unwrap();

    let config = load_config_with_env(dir.path(), |_| None).unwrap();
    let controller = ControllerConfig::from_global(&config.global);

    assert_eq!(controller.stages.len(), 6);
    assert_eq!(controller.request_timeout, Duration::from_secs(30));
    assert_eq!(config.data_dir, dir.path().join(".research-kit/data"));
    assert!(config.data_dir.is_dir());
}
