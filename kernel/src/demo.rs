//! Demo project - the "Landing Page Redesign" branch tree.
//!
//! Six branches, three collaborators, a few checkpoints and comments, and one
//! branch already blended. Used by the `sprig` binary and by tests.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    ArtifactSnapshot, Branch, BranchId, BranchStatus, BranchValidationError, Checkpoint,
    CheckpointId, Collaborator, Comment, CommentId, Position, Project,
};

/// Root branch id of the demo project.
pub const ROOT_ID: &str = "branch_root";

const ROOT_HTML: &str = "<nav>Acme</nav><section class=\"hero\"><h1>Build faster</h1><a class=\"btn\">Get started</a></section>";
const HERO_HTML: &str = "<nav class=\"glass\">Acme</nav><section class=\"hero\"><div class=\"orb\"></div><h1>Build <span>faster</span></h1></section>";
const DARK_HTML: &str = "<body class=\"dark\"><nav class=\"sticky\">Acme</nav><section class=\"features\"><div class=\"feature-card\"></div></section></body>";
const MOBILE_HTML: &str = "<nav><button class=\"drawer-toggle\"></button></nav><section class=\"hero stack\"><h1>Build faster</h1></section>";
const PERF_HTML: &str = "<nav>Acme</nav><section class=\"hero\"><img loading=\"lazy\" src=\"hero.webp\"></section>";

fn alice() -> Collaborator {
    Collaborator::new(
        "user_alice",
        "Alice Kim",
        "https://api.dicebear.com/9.x/avataaars/svg?seed=alice",
        "#8B5CF6",
    )
}

fn bob() -> Collaborator {
    Collaborator::new(
        "user_bob",
        "Bob Tran",
        "https://api.dicebear.com/9.x/avataaars/svg?seed=bob",
        "#06B6D4",
    )
}

fn clara() -> Collaborator {
    Collaborator::new(
        "user_clara",
        "Clara Sun",
        "https://api.dicebear.com/9.x/avataaars/svg?seed=clara",
        "#EC4899",
    )
}

struct Seed<'a> {
    id: &'a str,
    parent: Option<&'a str>,
    name: &'a str,
    description: &'a str,
    created: DateTime<Utc>,
    position: Position,
    collaborators: Vec<Collaborator>,
    tags: &'a [&'a str],
}

impl Seed<'_> {
    fn build(self) -> Result<Branch, BranchValidationError> {
        Ok(Branch::new(
            BranchId::new(self.id),
            self.parent.map(BranchId::new),
            self.name,
            self.description,
            self.created,
        )?
        .with_position(self.position)
        .with_collaborators(self.collaborators)
        .with_tags(self.tags.iter().copied()))
    }
}

fn checkpoint(id: &str, branch: &str, label: &str, at: DateTime<Utc>, html: &str) -> Checkpoint {
    Checkpoint::new(
        CheckpointId::new(id),
        BranchId::new(branch),
        label,
        at,
        ArtifactSnapshot::new(html),
    )
}

fn comment(id: &str, branch: &str, author: Collaborator, text: &str, at: DateTime<Utc>) -> Comment {
    Comment::new(CommentId::new(id), BranchId::new(branch), author, text, at)
}

/// Builds the demo project with timestamps relative to now.
///
/// # Errors
///
/// Returns `BranchValidationError` if a seeded branch is invalid.
pub fn landing_page_project() -> Result<Project, BranchValidationError> {
    landing_page_project_at(Utc::now())
}

/// Builds the demo project with timestamps relative to `now`.
///
/// # Errors
///
/// Returns `BranchValidationError` if a seeded branch is invalid.
pub fn landing_page_project_at(now: DateTime<Utc>) -> Result<Project, BranchValidationError> {
    let day = Duration::days(1);
    let hour = Duration::hours(1);

    let root = Seed {
        id: ROOT_ID,
        parent: None,
        name: "main",
        description: "Original landing page skeleton, the starting point for all branches.",
        created: now - day * 7,
        position: Position::new(400.0, 60.0),
        collaborators: vec![alice(), bob()],
        tags: &["baseline", "production"],
    }
    .build()?
    .with_checkpoint(checkpoint("ckpt_r1", ROOT_ID, "Initial scaffold", now - day * 7, ROOT_HTML))
    .with_comment(comment(
        "cmt_r1",
        ROOT_ID,
        alice(),
        "This is our baseline. Please branch off from here before making any changes!",
        now - day * 6,
    ))
    .with_comment(comment(
        "cmt_r2",
        ROOT_ID,
        bob(),
        "The nav font should be Inter 700, not system-ui. I'll fix that in my branch.",
        now - day * 5,
    ))
    .with_updated_at(now - hour * 2);

    let hero = Seed {
        id: "branch_hero",
        parent: Some(ROOT_ID),
        name: "hero-redesign",
        description: "Animated gradient hero with floating orbs, glass nav, and gradient type.",
        created: now - day * 5,
        position: Position::new(160.0, 300.0),
        collaborators: vec![alice(), clara()],
        tags: &["ui", "animation", "hero"],
    }
    .build()?
    .with_checkpoint(checkpoint("ckpt_h1", "branch_hero", "Add gradient hero layout", now - day * 5, HERO_HTML))
    .with_checkpoint(checkpoint("ckpt_h2", "branch_hero", "Add floating orb animations", now - day * 4, HERO_HTML))
    .with_comment(comment(
        "cmt_h1",
        "branch_hero",
        clara(),
        "Love the floating orbs! Can we make them a bit more subtle?",
        now - day * 4,
    ))
    .with_comment(comment(
        "cmt_h2",
        "branch_hero",
        alice(),
        "The gradient heading is perfect. Let's blend this with the dark mode version!",
        now - day * 3,
    ))
    .with_updated_at(now - hour);

    let dark = Seed {
        id: "branch_dark",
        parent: Some(ROOT_ID),
        name: "dark-mode",
        description: "Full dark theme with CSS custom properties and a sticky nav.",
        created: now - day * 4,
        position: Position::new(640.0, 300.0),
        collaborators: vec![bob(), alice()],
        tags: &["dark-theme", "accessibility"],
    }
    .build()?
    .with_checkpoint(checkpoint("ckpt_d1", "branch_dark", "CSS variables dark palette", now - day * 4, DARK_HTML))
    .with_checkpoint(checkpoint("ckpt_d2", "branch_dark", "Sticky nav with blur", now - day * 3, DARK_HTML))
    .with_checkpoint(checkpoint("ckpt_d3", "branch_dark", "Feature cards section", now - day * 2, DARK_HTML))
    .with_comment(comment(
        "cmt_d1",
        "branch_dark",
        bob(),
        "Dark theme is looking clean. The CSS variable approach makes it easy to tweak.",
        now - day * 3,
    ));

    let mobile = Seed {
        id: "branch_mobile",
        parent: Some("branch_hero"),
        name: "mobile-first",
        description: "Responsive breakpoints, a mobile navigation drawer, and touch targets.",
        created: now - day * 3,
        position: Position::new(60.0, 540.0),
        collaborators: vec![clara(), alice()],
        tags: &["responsive", "mobile", "ux"],
    }
    .build()?
    .with_checkpoint(checkpoint("ckpt_m1", "branch_mobile", "Mobile nav drawer", now - day * 2, MOBILE_HTML))
    .with_comment(comment(
        "cmt_m1",
        "branch_mobile",
        clara(),
        "Tested on a phone and the drawer works perfectly.",
        now - hour * 6,
    ));

    let perf = Seed {
        id: "branch_perf",
        parent: Some("branch_hero"),
        name: "perf-pass",
        description: "Lazy loading, image optimization, and Core Web Vitals improvements.",
        created: now - day * 2,
        position: Position::new(310.0, 540.0),
        collaborators: vec![bob()],
        tags: &["performance", "cwv"],
    }
    .build()?
    .with_checkpoint(checkpoint("ckpt_p1", "branch_perf", "Lazy load images", now - day, PERF_HTML));

    let blend = Seed {
        id: "branch_blend",
        parent: Some("branch_dark"),
        name: "dark-mobile-blend",
        description: "Dark theme and mobile-first layout combined.",
        created: now - day,
        position: Position::new(580.0, 540.0),
        collaborators: vec![alice(), bob()],
        tags: &["blend", "dark-theme", "mobile"],
    }
    .build()?
    .with_status(BranchStatus::Merged)
    .with_checkpoint(checkpoint("ckpt_b1", "branch_blend", "Initial blend snapshot", now - day, DARK_HTML))
    .with_comment(comment(
        "cmt_b1",
        "branch_blend",
        alice(),
        "This blend is coming together nicely!",
        now - hour,
    ));

    let mut project = Project::new(
        "proj_01",
        "Landing Page Redesign",
        "Collaborative redesign of the main product landing page.",
        BranchId::new(ROOT_ID),
        now - day * 7,
    );
    project.updated_at = now - Duration::minutes(15);
    project.branches = vec![root, hero, dark, mobile, perf, blend];
    Ok(project)
}
