//! Marks unreachable entries as disabled.
//!
//! This is the only pass that writes probe results into the document. It
//! takes `&mut Document`, so it can only run once the probing phase has
//! released the tree.

use tracing::debug;

use zonefix_common::{
    document::{Document, NodeId},
    probe::ProbeOutcome,
    zone,
};

/// Disables the origin of every unreachable outcome. Returns how many
/// outcomes were applied.
pub fn apply_outcomes<'a>(
    doc: &mut Document,
    outcomes: impl IntoIterator<Item = &'a ProbeOutcome>,
) -> usize {
    let mut disabled = 0;
    for outcome in outcomes.into_iter().filter(|o| !o.reachable) {
        disable(doc, outcome.target.origin, outcome.target.reason);
        debug!("Disabled {} ({})", outcome.target.address, outcome.target.reason);
        disabled += 1;
    }
    disabled
}

/// Replaces the head comment of `node` with a disabled marker.
pub fn disable(doc: &mut Document, node: NodeId, reason: &str) {
    doc.set_comment(node, disabled_comment(reason));
}

pub fn disabled_comment(reason: &str) -> String {
    if reason.is_empty() {
        zone::DISABLED.to_string()
    } else {
        format!("{}: {reason}", zone::DISABLED)
    }
}

pub fn is_disabled(doc: &Document, node: NodeId) -> bool {
    doc.comment(node)
        .is_some_and(|comment| comment.starts_with(zone::DISABLED))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
