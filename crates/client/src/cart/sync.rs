//! Guest-to-authenticated cart transfer at the login boundary.
//!
//! This is a best-effort, at-most-once-per-session operation, not an atomic
//! one: if it is interrupted mid-flight, partially transferred items remain
//! on the server while the guest copy may already be gone.

use tracing::{debug, warn};

use crate::Result;
use crate::identity::Identity;
use crate::storage::KeyValueStore;

use super::guest::GuestCart;
use super::remote::CartApi;

/// Push the guest cart into the server-backed cart, then discard the local
/// copy.
///
/// Each guest item is sent as a separate add call; the server deduplicates by
/// product id and sums quantities, so ordering is not significant. The guest
/// copy is removed unconditionally afterwards, even when some pushes failed,
/// so the next login cannot double-apply it. Items that failed to push are
/// logged and dropped.
///
/// Callers must follow up with a fetch to obtain the merged authoritative
/// state.
///
/// # Errors
///
/// Returns an error only when the guest storage entry cannot be removed;
/// failed pushes are absorbed.
pub async fn transfer_guest_cart<S, A>(
    guest: &GuestCart<S>,
    api: &A,
    identity: &Identity,
) -> Result<()>
where
    S: KeyValueStore,
    A: CartApi,
{
    let snapshot = guest.load();
    if snapshot.items.is_empty() {
        debug!("no guest cart to transfer");
        return Ok(());
    }

    let mut failed = 0usize;
    for item in &snapshot.items {
        if let Err(e) = api.add_item(identity, item.id, item.quantity).await {
            warn!(product = %item.id, error = %e, "failed to transfer guest cart item");
            failed += 1;
        }
    }

    if failed > 0 {
        warn!(
            failed,
            total = snapshot.items.len(),
            "discarding guest cart with untransferred items"
        );
    }
    guest.clear()
}
