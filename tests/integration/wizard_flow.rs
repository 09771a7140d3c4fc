//! Wizard gating driven by real session state.

use super::support::*;
use skillwright::error::ApiError;
use skillwright::selection::ToggleOutcome;
use skillwright::wizard::{GateInput, WizardGate, WizardStep};

#[test]
fn test_selection_bound_scenario() {
    let (mut session, _opened) = channel_session();
    let [a, b, c, d] = ["meridian-dex", "echelon-market", "aries-markets", "movementswap"].map(id);

    assert_eq!(session.toggle(&a).unwrap(), ToggleOutcome::Added);
    assert_eq!(session.toggle(&b).unwrap(), ToggleOutcome::Added);
    assert_eq!(session.toggle(&c).unwrap(), ToggleOutcome::Added);
    assert_eq!(session.toggle(&d).unwrap(), ToggleOutcome::Ignored);
    assert_eq!(session.selection(), &[a.clone(), b.clone(), c.clone()]);
    assert!(session.is_selection_full());

    session.toggle(&b).unwrap();
    assert_eq!(session.selection(), &[a.clone(), c.clone()]);

    session.toggle(&d).unwrap();
    assert_eq!(session.selection(), &[a, c, d]);
}

#[tokio::test]
async fn test_gate_follows_selection_and_completion() {
    let (mut session, mut opened) = channel_session();
    assert_eq!(session.step(), WizardStep::Configure);
    session.advance().unwrap();

    assert!(!session.can_advance(), "browse->build denied with nothing selected");
    let err = session.advance().unwrap_err();
    assert!(matches!(err, ApiError::StepBlocked(_)));
    assert_eq!(session.step(), WizardStep::Browse);

    let a = id("meridian-dex");
    let b = id("echelon-market");
    session.toggle(&a).unwrap();
    session.toggle(&b).unwrap();
    session.advance().unwrap();
    assert_eq!(session.step(), WizardStep::Build);
    assert!(!session.can_advance(), "build->register denied with zero jobs done");

    session.generate(&a, "swap").unwrap();
    session.generate(&b, "lend").unwrap();
    let first = opened.recv().await.unwrap();
    let second = opened.recv().await.unwrap();
    first.send_error("boom");
    second.send_delta("skill");
    drop(second);
    session.wait_settled(&a).await.unwrap();
    session.wait_settled(&b).await.unwrap();

    assert_eq!(session.gate_input().done_jobs, 1);
    assert!(session.can_advance(), "one done job is enough");
    assert_eq!(session.advance().unwrap(), WizardStep::Register);
    assert_eq!(session.completed_skills().len(), 1);
}

#[tokio::test]
async fn test_going_back_preserves_everything() {
    let (mut session, mut opened) = channel_session();
    let a = id("meridian-dex");
    session.advance().unwrap();
    session.toggle(&a).unwrap();
    session.advance().unwrap();
    session.generate(&a, "swap").unwrap();
    let stream = opened.recv().await.unwrap();
    stream.send_delta("done text");
    drop(stream);
    session.wait_settled(&a).await.unwrap();
    session.advance().unwrap();

    while WizardGate::can_retreat(session.step()) {
        session.back();
    }
    assert_eq!(session.step(), WizardStep::Configure);
    assert_eq!(session.selection(), &[a.clone()]);
    assert_eq!(session.job(&a).unwrap().text, "done text");

    for _ in 0..3 {
        session.advance().unwrap();
    }
    assert_eq!(session.step(), WizardStep::Register);
}

#[test]
fn test_gate_is_pure() {
    let input = GateInput {
        configured: true,
        selected: 2,
        done_jobs: 0,
    };
    for _ in 0..3 {
        assert!(WizardGate::can_advance(WizardStep::Browse, &input));
        assert!(!WizardGate::can_advance(WizardStep::Build, &input));
    }
}
