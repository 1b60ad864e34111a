//! Integration tests for canvas interaction.
//!
//! Drives drag-and-blend gestures, the blend confirmation round trip through
//! a delayed session, and the hover preview against the demo project.

mod common;

use std::time::Duration;

use common::{branch, demo_store, position_of};
use sprig_kernel::canvas::{
    proposal_channel, BlendProposal, CanvasInteractionController, DropOutcome, EdgeKind, GraphView,
};
use sprig_kernel::domain::{BranchId, BranchStatus, Position, Project};
use sprig_kernel::hover::HoverPreviewDriver;
use sprig_kernel::infrastructure::config::{
    BlendTargetPolicy, CanvasSettings, HoverSettings, LayoutSettings, ProcessingSettings,
};
use sprig_kernel::session::CanvasSession;
use sprig_kernel::store::{shared, BranchGraphStore};
use tokio::time::sleep;

/// Test that dropping one card onto another proposes a blend and keeps the origin.
#[test]
fn test_drop_onto_card_proposes_blend() {
    let mut store = demo_store();
    let (tx, mut rx) = proposal_channel();
    let mut canvas = CanvasInteractionController::new(CanvasSettings::default());
    let perf = BranchId::new("branch_perf");
    let mobile = BranchId::new("branch_mobile");
    let origin = position_of(&store, &perf);

    canvas.begin_drag(&store, &perf).expect("Start drag");
    let over = position_of(&store, &mobile).offset(15.0, -10.0);
    let target = canvas.drag_to(&store, over).expect("Drag").cloned();
    assert_eq!(target, Some(mobile.clone()));

    let outcome = canvas.drop(&mut store, &tx).expect("Drop");
    assert!(matches!(outcome, DropOutcome::BlendProposed { .. }));
    assert_eq!(position_of(&store, &perf), origin);
    assert_eq!(
        rx.try_recv().expect("Proposal sent"),
        BlendProposal {
            source_id: perf,
            target_id: mobile,
        }
    );
}

/// Test that a drop in free space is persisted as the new position.
#[test]
fn test_drop_in_free_space_moves_card() {
    let mut store = demo_store();
    let (tx, mut rx) = proposal_channel();
    let mut canvas = CanvasInteractionController::new(CanvasSettings::default());
    let dark = BranchId::new("branch_dark");

    canvas.begin_drag(&store, &dark).expect("Start drag");
    canvas
        .drag_to(&store, Position::new(1200.0, 300.0))
        .expect("Drag");
    canvas.drop(&mut store, &tx).expect("Drop");

    assert_eq!(position_of(&store, &dark), Position::new(1200.0, 300.0));
    assert!(rx.try_recv().is_err());
}

/// Test that the nearest policy picks the closest of two overlapping cards.
#[test]
fn test_nearest_blend_policy() {
    let mut project = Project::new(
        "proj_it",
        "Policy",
        "",
        BranchId::new("r"),
        chrono::Utc::now(),
    );
    project.branches = vec![
        branch("r", None, Some(Position::new(0.0, 0.0))),
        branch("far", Some("r"), Some(Position::new(500.0, 0.0))),
        branch("near", Some("r"), Some(Position::new(400.0, 0.0))),
        branch("dragged", Some("r"), Some(Position::new(1000.0, 1000.0))),
    ];
    let store = BranchGraphStore::load(project).expect("Load project");
    let settings = CanvasSettings {
        blend_target_policy: BlendTargetPolicy::Nearest,
        ..CanvasSettings::default()
    };
    let mut canvas = CanvasInteractionController::new(settings);

    canvas
        .begin_drag(&store, &BranchId::new("dragged"))
        .expect("Start drag");
    let target = canvas
        .drag_to(&store, Position::new(420.0, 0.0))
        .expect("Drag")
        .cloned();
    assert_eq!(target, Some(BranchId::new("near")));
}

/// Test the full blend round trip: drag, confirm, delayed merge, view update.
#[tokio::test(start_paused = true)]
async fn test_confirmed_blend_updates_view() {
    let store = shared(demo_store());
    let mut session = CanvasSession::new(store.clone(), ProcessingSettings::default());
    let (tx, mut rx) = proposal_channel();
    let mut canvas = CanvasInteractionController::new(CanvasSettings::default());
    let perf = BranchId::new("branch_perf");
    let mobile = BranchId::new("branch_mobile");

    {
        let mut guard = store.write();
        canvas.begin_drag(&guard, &perf).expect("Start drag");
        let over = position_of(&guard, &mobile);
        canvas.drag_to(&guard, over).expect("Drag");
        canvas.drop(&mut guard, &tx).expect("Drop");
    }

    let proposal = rx.try_recv().expect("Proposal sent");
    let pending = session.request_blend(proposal);
    sleep(Duration::from_millis(600)).await;
    assert_eq!(
        store.read().get_branch_by_id(&perf).map(|b| b.status()),
        Some(BranchStatus::Active)
    );

    let outcome = pending.await.expect("Not cancelled").expect("Both exist");
    assert_eq!(outcome.source.id(), &perf);

    let view = GraphView::build(&store.read(), &LayoutSettings::default());
    assert!(view.edges.iter().any(|edge| {
        edge.kind == EdgeKind::Merge && edge.source == perf && edge.target == mobile
    }));
    let json = serde_json::to_value(&view).expect("Serialize view");
    assert_eq!(json["nodes"].as_array().map(Vec::len), Some(6));
}

/// Test that hovering one card briefly, then another, opens only the second popup.
#[tokio::test(start_paused = true)]
async fn test_hover_switch_opens_only_second_popup() {
    let settings = HoverSettings::default();
    let mut hover = HoverPreviewDriver::new(settings);
    let mut popups = hover.subscribe();
    let hero = BranchId::new("branch_hero");
    let dark = BranchId::new("branch_dark");

    hover.card_entered(hero.clone(), Position::new(160.0, 300.0));
    sleep(Duration::from_millis(100)).await;
    hover.card_left(&hero);
    hover.card_entered(dark.clone(), Position::new(640.0, 300.0));

    sleep(settings.open_delay() - Duration::from_millis(1)).await;
    assert!(hover.visible_popup().is_none());

    popups.changed().await.expect("Popup published");
    assert_eq!(
        popups.borrow().as_ref().map(|popup| popup.branch_id.clone()),
        Some(dark)
    );
}
