//! Generation lifecycle through a session: streaming, supersede, cancel, failure.

use super::support::*;
use skillwright::error::ApiError;
use skillwright::job::JobStatus;
use skillwright::scheduler::{GenerationScheduler, JobEventKind};
use skillwright::transport::ChannelTransport;
use std::sync::Arc;

#[tokio::test]
async fn test_split_stream_completes_with_joined_text() {
    let (mut session, mut opened) = channel_session();
    let a = id("meridian-dex");
    session.toggle(&a).unwrap();

    session.generate(&a, "swap tokens").unwrap();
    let stream = opened.recv().await.unwrap();
    assert_eq!(stream.request.app.name, "Meridian DEX");
    stream.send("0:\"Hel");
    stream.send("lo \"");
    stream.send("\nd:{\"finishReason\":\"stop\"}\n");

    let job = session.wait_settled(&a).await.unwrap();
    assert_eq!(job.status, JobStatus::Done);
    assert_eq!(job.text, "Hello ");
    assert_eq!(job.prompt, "swap tokens");
}

#[tokio::test]
async fn test_superseded_stream_never_writes_again() {
    let (mut session, mut opened) = channel_session();
    let a = id("meridian-dex");
    session.toggle(&a).unwrap();
    let mut events = session.subscribe();

    session.generate(&a, "first").unwrap();
    let old = opened.recv().await.unwrap();
    old.send_delta("old text");
    wait_for_event(&mut events, &a, |k| matches!(k, JobEventKind::Delta { .. })).await;

    session.generate(&a, "second").unwrap();
    let new = opened.recv().await.unwrap();
    assert_eq!(new.request.prompt, "second");

    old.send_delta(" more old text");
    old.send_finish();
    settle().await;
    let job = session.job(&a).unwrap();
    assert_eq!(job.status, JobStatus::Generating);
    assert_eq!(job.text, "");

    new.send_delta("new text");
    drop(new);
    let job = session.wait_settled(&a).await.unwrap();
    assert_eq!(job.status, JobStatus::Done);
    assert_eq!(job.text, "new text");
    assert_eq!(job.epoch, 2);
}

#[tokio::test]
async fn test_cancel_then_late_chunk_stays_idle() {
    let (mut session, mut opened) = channel_session();
    let a = id("meridian-dex");
    session.toggle(&a).unwrap();

    session.generate(&a, "swap").unwrap();
    let stream = opened.recv().await.unwrap();
    stream.send_delta("partial");
    settle().await;

    assert!(session.cancel(&a));
    stream.send_delta("late");
    stream.send_finish();
    settle().await;

    let job = session.job(&a).unwrap();
    assert_eq!(job.status, JobStatus::Idle);
    assert_eq!(job.text, "");
    assert!(!session.cancel(&a), "second cancel is a no-op");
}

#[tokio::test]
async fn test_cancel_after_done_keeps_result() {
    let (mut session, mut opened) = channel_session();
    let a = id("meridian-dex");
    session.toggle(&a).unwrap();

    session.generate(&a, "swap").unwrap();
    let stream = opened.recv().await.unwrap();
    stream.send_delta("skill");
    stream.send_finish();
    session.wait_settled(&a).await.unwrap();

    assert!(!session.cancel(&a));
    let job = session.job(&a).unwrap();
    assert_eq!(job.status, JobStatus::Done);
    assert_eq!(job.text, "skill");
}

#[tokio::test]
async fn test_failure_is_isolated_to_one_job() {
    let (mut session, mut opened) = channel_session();
    let a = id("meridian-dex");
    let b = id("echelon-market");
    session.toggle(&a).unwrap();
    session.toggle(&b).unwrap();

    session.generate(&a, "swap").unwrap();
    session.generate(&b, "lend").unwrap();
    let first = opened.recv().await.unwrap();
    let second = opened.recv().await.unwrap();
    let (stream_a, stream_b) = if first.request.app.id == "meridian-dex" {
        (first, second)
    } else {
        (second, first)
    };

    stream_a.send_delta("half a sk");
    stream_a.send_error("connection reset by peer");
    stream_b.send_delta("lending skill");
    drop(stream_b);

    let job_a = session.wait_settled(&a).await.unwrap();
    let job_b = session.wait_settled(&b).await.unwrap();
    assert_eq!(job_a.status, JobStatus::Error);
    assert_eq!(job_a.text, "half a sk");
    assert!(job_a.error.unwrap().contains("connection reset"));
    assert_eq!(job_b.status, JobStatus::Done);
    assert_eq!(session.selection().len(), 2);

    session.regenerate(&a).unwrap();
    let retry = opened.recv().await.unwrap();
    assert_eq!(retry.request.prompt, "swap");
    let job_a = session.job(&a).unwrap();
    assert_eq!(job_a.status, JobStatus::Generating);
    assert_eq!(job_a.text, "");
    assert!(job_a.error.is_none());
}

#[tokio::test]
async fn test_deselect_cancels_and_reselect_is_fresh() {
    let (mut session, mut opened) = channel_session();
    let a = id("meridian-dex");
    session.toggle(&a).unwrap();
    session.generate(&a, "swap").unwrap();
    let stream = opened.recv().await.unwrap();
    stream.send_delta("text");
    settle().await;

    session.toggle(&a).unwrap();
    assert!(session.job(&a).is_none());
    stream.send_delta("late");
    settle().await;

    session.toggle(&a).unwrap();
    let job = session.job(&a).unwrap();
    assert_eq!(job.status, JobStatus::Idle);
    assert_eq!(job.text, "");
    assert_eq!(job.epoch, 0);
}

#[tokio::test]
async fn test_blank_prompt_is_rejected_synchronously() {
    let (mut session, mut opened) = channel_session();
    let a = id("meridian-dex");
    session.toggle(&a).unwrap();

    assert!(matches!(
        session.generate(&a, " \t "),
        Err(ApiError::InvalidPrompt(_))
    ));
    settle().await;
    assert!(opened.try_recv().is_err());
    assert_eq!(session.job(&a).unwrap().status, JobStatus::Idle);
}

#[tokio::test]
async fn test_prompt_edit_rejected_while_generating() {
    let (mut session, mut opened) = channel_session();
    let a = id("meridian-dex");
    session.toggle(&a).unwrap();
    session.generate(&a, "swap").unwrap();
    let _stream = opened.recv().await.unwrap();

    assert!(matches!(
        session.set_prompt(&a, "edited"),
        Err(ApiError::JobBusy(_))
    ));
    session.cancel(&a);
    session.set_prompt(&a, "edited").unwrap();
    assert_eq!(session.job(&a).unwrap().prompt, "edited");
}

#[tokio::test]
async fn test_shutdown_cancels_every_stream() {
    let (transport, mut opened) = ChannelTransport::new();
    let scheduler = GenerationScheduler::new(Arc::new(transport));
    let ids = ["meridian-dex", "echelon-market", "aries-markets"];
    for value in ids {
        scheduler.attach(item(value));
        scheduler.generate(&id(value), "go").unwrap();
    }
    let mut streams = Vec::new();
    for _ in ids {
        streams.push(opened.recv().await.unwrap());
    }
    assert_eq!(scheduler.active_streams(), 3);

    scheduler.shutdown();
    assert_eq!(scheduler.active_streams(), 0);
    assert!(scheduler.snapshots().is_empty());

    settle().await;
    for stream in &streams {
        assert!(!stream.send_delta("late"), "stream task should have stopped");
    }
}
