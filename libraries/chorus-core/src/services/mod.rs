/// Authorization-gated services
mod collaborations;
mod playlists;

pub use collaborations::CollaborationService;
pub use playlists::PlaylistService;

use crate::error::Result;

/// Emit a warning tagged with the failing operation and hand the error back unchanged
fn logged<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    result.map_err(|err| {
        tracing::warn!(operation, kind = ?err.kind(), error = %err, "Operation failed");
        err
    })
}
