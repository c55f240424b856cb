//! Playlist access resolution
//!
//! Decides, for a (playlist, user) pair, whether the user owns the playlist,
//! collaborates on it, or has no rights, and keeps all of those distinct
//! from "the playlist does not exist".
//!
//! Ownership is checked first and is authoritative. The collaboration
//! repository is consulted only after an ownership denial, and it can only
//! upgrade that denial to [`AccessDecision::Collaborator`]. A failing
//! collaboration probe is logged and the original denial stands.

use crate::error::{ChorusError, Result};
use crate::repository::{CollaborationRepository, PlaylistRepository};
use crate::types::{PlaylistId, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of resolving a user's rights over a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Owner,
    Collaborator,
    Denied,
    NotFound,
}

/// Granted access level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    Owner,
    Collaborator,
}

impl AccessDecision {
    /// Turn the decision into a grant or the matching error
    pub fn authorize(self, playlist_id: &PlaylistId) -> Result<Grant> {
        match self {
            Self::Owner => Ok(Grant::Owner),
            Self::Collaborator => Ok(Grant::Collaborator),
            Self::Denied => Err(ChorusError::AccessDenied(playlist_id.clone())),
            Self::NotFound => Err(ChorusError::PlaylistNotFound(playlist_id.clone())),
        }
    }
}

/// Access resolver over the playlist and collaboration repositories
#[derive(Clone)]
pub struct AccessResolver {
    playlists: Arc<dyn PlaylistRepository>,
    collaborations: Arc<dyn CollaborationRepository>,
}

impl AccessResolver {
    pub fn new(
        playlists: Arc<dyn PlaylistRepository>,
        collaborations: Arc<dyn CollaborationRepository>,
    ) -> Self {
        Self {
            playlists,
            collaborations,
        }
    }

    /// Owner check only: `Owner`, `Denied` or `NotFound`.
    ///
    /// A fault while loading the playlist is returned as an error; it is
    /// not a decision.
    pub async fn resolve_ownership(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<AccessDecision> {
        let decision = match self.playlists.find_by_id(playlist_id).await? {
            None => AccessDecision::NotFound,
            Some(playlist) if playlist.is_owned_by(user_id) => AccessDecision::Owner,
            Some(_) => AccessDecision::Denied,
        };

        tracing::debug!(
            playlist_id = %playlist_id,
            user_id = %user_id,
            ?decision,
            "Resolved playlist ownership"
        );

        Ok(decision)
    }

    /// Owner check with collaboration fallback
    pub async fn resolve_access(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<AccessDecision> {
        let ownership = self.resolve_ownership(playlist_id, user_id).await?;
        if ownership != AccessDecision::Denied {
            // Owner and NotFound are final
            return Ok(ownership);
        }

        let decision = match self
            .collaborations
            .is_collaborator(playlist_id, user_id)
            .await
        {
            Ok(true) => AccessDecision::Collaborator,
            Ok(false) => ownership,
            Err(err) => {
                tracing::warn!(
                    playlist_id = %playlist_id,
                    user_id = %user_id,
                    error = %err,
                    "Collaboration lookup failed, keeping ownership denial"
                );
                ownership
            }
        };

        tracing::debug!(
            playlist_id = %playlist_id,
            user_id = %user_id,
            ?decision,
            "Resolved playlist access"
        );

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::repository::{MockCollaborationRepository, MockPlaylistRepository};
    use crate::types::{NewPlaylist, Playlist, User};

    fn playlist(id: &str, owner: &str) -> Playlist {
        Playlist {
            id: PlaylistId::new(id),
            name: "Favorites".to_string(),
            owner: UserId::new(owner),
        }
    }

    fn resolver_with(
        playlists: MockPlaylistRepository,
        collaborations: MockCollaborationRepository,
    ) -> AccessResolver {
        AccessResolver::new(Arc::new(playlists), Arc::new(collaborations))
    }

    #[tokio::test]
    async fn owner_short_circuits_without_collaboration_lookup() {
        let mut playlists = MockPlaylistRepository::new();
        playlists
            .expect_find_by_id()
            .returning(|_| Ok(Some(playlist("playlist-1", "user-1"))));
        let mut collaborations = MockCollaborationRepository::new();
        collaborations.expect_is_collaborator().never();

        let resolver = resolver_with(playlists, collaborations);
        let decision = resolver
            .resolve_access(&PlaylistId::new("playlist-1"), &UserId::new("user-1"))
            .await
            .unwrap();

        assert_eq!(decision, AccessDecision::Owner);
    }

    #[tokio::test]
    async fn missing_playlist_is_not_found_without_collaboration_lookup() {
        let mut playlists = MockPlaylistRepository::new();
        playlists.expect_find_by_id().returning(|_| Ok(None));
        let mut collaborations = MockCollaborationRepository::new();
        collaborations.expect_is_collaborator().never();

        let resolver = resolver_with(playlists, collaborations);
        let id = PlaylistId::new("playlist-2");
        let user = UserId::new("user-9");

        assert_eq!(
            resolver.resolve_ownership(&id, &user).await.unwrap(),
            AccessDecision::NotFound
        );
        assert_eq!(
            resolver.resolve_access(&id, &user).await.unwrap(),
            AccessDecision::NotFound
        );
    }

    #[tokio::test]
    async fn collaboration_probe_failure_keeps_denial() {
        let mut playlists = MockPlaylistRepository::new();
        playlists
            .expect_find_by_id()
            .returning(|_| Ok(Some(playlist("playlist-1", "user-1"))));
        let mut collaborations = MockCollaborationRepository::new();
        collaborations
            .expect_is_collaborator()
            .times(1)
            .returning(|_, _| Err(ChorusError::storage("connection reset")));

        let resolver = resolver_with(playlists, collaborations);
        let decision = resolver
            .resolve_access(&PlaylistId::new("playlist-1"), &UserId::new("user-2"))
            .await
            .unwrap();

        assert_eq!(decision, AccessDecision::Denied);
    }

    #[tokio::test]
    async fn collaboration_probe_not_found_error_keeps_denial() {
        let mut playlists = MockPlaylistRepository::new();
        playlists
            .expect_find_by_id()
            .returning(|_| Ok(Some(playlist("playlist-1", "user-1"))));
        let mut collaborations = MockCollaborationRepository::new();
        collaborations
            .expect_is_collaborator()
            .returning(|_, _| Err(ChorusError::UserNotFound(UserId::new("user-2"))));

        let resolver = resolver_with(playlists, collaborations);
        let id = PlaylistId::new("playlist-1");
        let decision = resolver
            .resolve_access(&id, &UserId::new("user-2"))
            .await
            .unwrap();

        assert!(matches!(
            decision.authorize(&id),
            Err(ChorusError::AccessDenied(_))
        ));
    }

    #[tokio::test]
    async fn playlist_lookup_fault_propagates() {
        let mut playlists = MockPlaylistRepository::new();
        playlists
            .expect_find_by_id()
            .returning(|_| Err(ChorusError::storage("disk full")));
        let mut collaborations = MockCollaborationRepository::new();
        collaborations.expect_is_collaborator().never();

        let resolver = resolver_with(playlists, collaborations);
        let result = resolver
            .resolve_access(&PlaylistId::new("playlist-1"), &UserId::new("user-1"))
            .await;

        assert!(matches!(result, Err(ChorusError::Storage(_))));
    }

    #[tokio::test]
    async fn collaborator_and_stranger_against_memory_store() {
        let store = Arc::new(MemoryStore::new());
        let owner = store.add_user(User::new("u1", "Owner")).await;
        let collaborator = store.add_user(User::new("u2", "Collaborator")).await;
        let stranger = store.add_user(User::new("u3", "Stranger")).await;

        let id = crate::repository::PlaylistRepository::insert(
            store.as_ref(),
            NewPlaylist::new("PL1", owner.clone()),
        )
        .await
        .unwrap();
        crate::repository::CollaborationRepository::add_collaborator(
            store.as_ref(),
            &id,
            &collaborator,
        )
        .await
        .unwrap();

        let resolver = AccessResolver::new(store.clone(), store.clone());

        assert_eq!(
            resolver.resolve_access(&id, &owner).await.unwrap(),
            AccessDecision::Owner
        );
        assert_eq!(
            resolver.resolve_access(&id, &collaborator).await.unwrap(),
            AccessDecision::Collaborator
        );
        assert_eq!(
            resolver.resolve_ownership(&id, &collaborator).await.unwrap(),
            AccessDecision::Denied
        );
        assert_eq!(
            resolver.resolve_access(&id, &stranger).await.unwrap(),
            AccessDecision::Denied
        );
    }

    #[test]
    fn authorize_maps_decisions_to_errors() {
        let id = PlaylistId::new("playlist-1");

        assert_eq!(AccessDecision::Owner.authorize(&id).unwrap(), Grant::Owner);
        assert_eq!(
            AccessDecision::Collaborator.authorize(&id).unwrap(),
            Grant::Collaborator
        );
        assert!(matches!(
            AccessDecision::Denied.authorize(&id),
            Err(ChorusError::AccessDenied(_))
        ));
        assert!(matches!(
            AccessDecision::NotFound.authorize(&id),
            Err(ChorusError::PlaylistNotFound(_))
        ));
    }
}
