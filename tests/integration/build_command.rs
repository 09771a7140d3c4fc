//! Headless build through the CLI run context.

use skillwright::cli::{BuildOptions, RunContext, SkillArg, SKILL_FILE_NAME};
use skillwright::config::SkillwrightConfig;
use skillwright::error::ApiError;
use skillwright::job::JobStatus;
use skillwright::transport::{ChannelTransport, GenerationTransport};
use std::sync::Arc;
use tempfile::TempDir;

fn skill(item_id: &str, prompt: &str) -> SkillArg {
    SkillArg {
        item_id: item_id.to_string(),
        prompt: prompt.to_string(),
    }
}

/// Transport that answers every request with a one-line skill, failing `fail_id`.
fn scripted_transport(fail_id: Option<&'static str>) -> Arc<dyn GenerationTransport> {
    let (transport, mut opened) = ChannelTransport::new();
    tokio::spawn(async move {
        while let Some(stream) = opened.recv().await {
            if Some(stream.request.app.id.as_str()) == fail_id {
                stream.send_error("upstream closed");
                continue;
            }
            stream.send_delta(&format!("# {}\n\n{}", stream.request.app.name, stream.request.prompt));
            stream.send_finish();
        }
    });
    Arc::new(transport)
}

#[tokio::test]
async fn test_build_writes_done_skills_and_prepares_registration() {
    let temp = TempDir::new().unwrap();
    let ctx = RunContext::with_config(temp.path().to_path_buf(), SkillwrightConfig::default())
        .unwrap();
    let out = temp.path().join("skills");
    let options = BuildOptions {
        out: Some(out.clone()),
        register: Some("Agent".to_string()),
        wallet: Some("0x42".to_string()),
    };

    let report = ctx
        .build(
            scripted_transport(Some("echelon-market")),
            &[skill("meridian-dex", "swap"), skill("echelon-market", "lend")],
            &options,
        )
        .await
        .unwrap();

    assert_eq!(report.jobs.len(), 2);
    assert_eq!(report.done_count(), 1);
    assert_eq!(report.jobs[1].status, JobStatus::Error);
    assert_eq!(report.written, vec![out.join("meridian-dex").join(SKILL_FILE_NAME)]);
    assert_eq!(
        std::fs::read_to_string(&report.written[0]).unwrap(),
        "# Meridian DEX\n\nswap"
    );

    let plan = report.registration.unwrap();
    assert_eq!(plan.agent_info.skills_count, 1);
    assert_eq!(plan.agent_info.wallet_address.as_deref(), Some("0x42"));
}

#[tokio::test]
async fn test_build_over_capacity_warns() {
    let temp = TempDir::new().unwrap();
    let ctx = RunContext::with_config(temp.path().to_path_buf(), SkillwrightConfig::default())
        .unwrap();
    let skills = [
        skill("meridian-dex", "a"),
        skill("echelon-market", "b"),
        skill("aries-markets", "c"),
        skill("movementswap", "d"),
        skill("meridian-dex", "again"),
    ];

    let report = ctx
        .build(scripted_transport(None), &skills, &BuildOptions::default())
        .await
        .unwrap();
    assert_eq!(report.done_count(), 3);
    assert_eq!(report.warnings.len(), 2);
    assert!(report.registration.is_none());
}

#[tokio::test]
async fn test_registration_skipped_without_done_jobs() {
    let temp = TempDir::new().unwrap();
    let ctx = RunContext::with_config(temp.path().to_path_buf(), SkillwrightConfig::default())
        .unwrap();
    let options = BuildOptions {
        register: Some("Agent".to_string()),
        ..BuildOptions::default()
    };

    let report = ctx
        .build(
            scripted_transport(Some("meridian-dex")),
            &[skill("meridian-dex", "swap")],
            &options,
        )
        .await
        .unwrap();
    assert!(report.registration.is_none());
    assert!(report.warnings[0].starts_with("registration skipped"));
}

#[tokio::test]
async fn test_unknown_app_fails_the_build() {
    let temp = TempDir::new().unwrap();
    let ctx = RunContext::with_config(temp.path().to_path_buf(), SkillwrightConfig::default())
        .unwrap();
    let err = ctx
        .build(
            scripted_transport(None),
            &[skill("no-such-app", "x")],
            &BuildOptions::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ItemNotFound(_)));
}

#[tokio::test]
async fn test_blank_prompt_does_not_abort_sibling_jobs() {
    let temp = TempDir::new().unwrap();
    let ctx = RunContext::with_config(temp.path().to_path_buf(), SkillwrightConfig::default())
        .unwrap();

    let report = ctx
        .build(
            scripted_transport(None),
            &[skill("meridian-dex", "swap"), skill("echelon-market", "   ")],
            &BuildOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(report.jobs.len(), 2);
    assert_eq!(report.jobs[0].status, JobStatus::Done);
    assert_eq!(report.jobs[0].text, "# Meridian DEX\n\nswap");
    assert_eq!(report.jobs[1].status, JobStatus::Idle);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].starts_with("'echelon-market' skipped"));
}
