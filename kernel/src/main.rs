//! Sprig demo binary - loads the demo project and prints its graph view.

use std::time::Duration;

use anyhow::Context;
use sprig_kernel::canvas::{proposal_channel, CanvasInteractionController, GraphView};
use sprig_kernel::demo;
use sprig_kernel::domain::BranchId;
use sprig_kernel::hover::HoverPreviewDriver;
use sprig_kernel::infrastructure::{config::Settings, telemetry::TelemetryBuilder};
use sprig_kernel::session::CanvasSession;
use sprig_kernel::store::{shared, BranchGraphStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("Failed to load configuration")?;

    TelemetryBuilder::from_settings(&settings.telemetry, env!("CARGO_PKG_VERSION"))
        .init()
        .context("Failed to initialize telemetry")?;

    info!("Sprig Kernel Starting...");

    let project = demo::landing_page_project().context("Invalid demo project")?;
    let mut store = BranchGraphStore::load(project).context("Failed to load project")?;
    store.seed_positions(&settings.layout);
    let mut events = store.subscribe();
    let store = shared(store);

    let mut session = CanvasSession::new(store.clone(), settings.processing);
    let hero = BranchId::new("branch_hero");

    // Branch off hero-redesign and give the new card a seat on the canvas.
    let created = session
        .request_branch(hero.clone(), "hero-copy", "Tighter headline copy")
        .await
        .context("Branch request was cancelled")??;
    store.write().seed_positions(&settings.layout);
    info!(branch_id = %created.id(), "Demo branch created");

    // Drag perf-pass onto mobile-first to propose a blend.
    let (proposals_tx, mut proposals) = proposal_channel();
    let mut canvas = CanvasInteractionController::new(settings.canvas);
    {
        let mut guard = store.write();
        let perf = BranchId::new("branch_perf");
        let target = guard
            .get_branch_by_id(&BranchId::new("branch_mobile"))
            .and_then(|branch| branch.position())
            .context("mobile-first has no position")?;

        canvas.begin_drag(&guard, &perf)?;
        canvas.drag_to(&guard, target.offset(10.0, 10.0))?;
        let outcome = canvas.drop(&mut guard, &proposals_tx)?;
        info!(?outcome, "Drag finished");
        canvas.reset();
    }

    if let Ok(proposal) = proposals.try_recv() {
        match session
            .request_blend(proposal)
            .await
            .context("Blend request was cancelled")?
        {
            Some(outcome) => info!(
                source = outcome.source.name(),
                target = outcome.target.name(),
                "Demo blend applied"
            ),
            None => warn!("Blend skipped, a branch disappeared"),
        }
    }

    // Hover hero-redesign long enough for its preview to open.
    let mut hover = HoverPreviewDriver::new(settings.hover);
    let anchor = store
        .read()
        .get_branch_by_id(&hero)
        .and_then(|branch| branch.position())
        .unwrap_or_default();
    hover.card_entered(hero.clone(), anchor);
    tokio::time::sleep(settings.hover.open_delay() + Duration::from_millis(10)).await;
    if let Some(popup) = hover.visible_popup() {
        info!(branch_id = %popup.branch_id, "Preview open");
    }
    hover.dismiss();

    let changes = events.drain();
    info!(changes = changes.len(), "Store events observed");

    let view = GraphView::build(&store.read(), &settings.layout);
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
