//! Owner-gated management of collaborator grants

use super::logged;
use crate::access::AccessResolver;
use crate::error::{ChorusError, Result};
use crate::repository::{CollaborationRepository, Repositories, UserDirectory};
use crate::types::{Collaboration, CollaborationId, PlaylistId, UserId};
use std::sync::Arc;
use tracing::instrument;

/// Grants and revokes collaboration on playlists
#[derive(Clone)]
pub struct CollaborationService {
    resolver: AccessResolver,
    collaborations: Arc<dyn CollaborationRepository>,
    users: Arc<dyn UserDirectory>,
}

impl CollaborationService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            resolver: AccessResolver::new(repos.playlists.clone(), repos.collaborations.clone()),
            collaborations: repos.collaborations.clone(),
            users: repos.users.clone(),
        }
    }

    /// Grant `collaborator` access to a playlist owned by `owner`
    #[instrument(skip(self))]
    pub async fn add_collaborator(
        &self,
        playlist_id: &PlaylistId,
        owner: &UserId,
        collaborator: &UserId,
    ) -> Result<CollaborationId> {
        logged(
            "add_collaborator",
            self.add_inner(playlist_id, owner, collaborator).await,
        )
    }

    async fn add_inner(
        &self,
        playlist_id: &PlaylistId,
        owner: &UserId,
        collaborator: &UserId,
    ) -> Result<CollaborationId> {
        self.resolver
            .resolve_ownership(playlist_id, owner)
            .await?
            .authorize(playlist_id)?;

        if !self.users.user_exists(collaborator).await? {
            return Err(ChorusError::UserNotFound(collaborator.clone()));
        }

        let id = self
            .collaborations
            .add_collaborator(playlist_id, collaborator)
            .await?;
        if id.is_empty() {
            return Err(ChorusError::invariant("Collaboration could not be added"));
        }

        tracing::info!(playlist_id = %playlist_id, collaborator = %collaborator, "Added collaborator");
        Ok(id)
    }

    /// Revoke a collaborator's access
    #[instrument(skip(self))]
    pub async fn remove_collaborator(
        &self,
        playlist_id: &PlaylistId,
        owner: &UserId,
        collaborator: &UserId,
    ) -> Result<()> {
        logged(
            "remove_collaborator",
            self.remove_inner(playlist_id, owner, collaborator).await,
        )
    }

    async fn remove_inner(
        &self,
        playlist_id: &PlaylistId,
        owner: &UserId,
        collaborator: &UserId,
    ) -> Result<()> {
        self.resolver
            .resolve_ownership(playlist_id, owner)
            .await?
            .authorize(playlist_id)?;

        if !self
            .collaborations
            .remove_collaborator(playlist_id, collaborator)
            .await?
        {
            return Err(ChorusError::invariant("Collaboration could not be removed"));
        }

        tracing::info!(playlist_id = %playlist_id, collaborator = %collaborator, "Removed collaborator");
        Ok(())
    }

    /// Collaborators on a playlist. Owner only.
    #[instrument(skip(self))]
    pub async fn list_collaborators(
        &self,
        playlist_id: &PlaylistId,
        owner: &UserId,
    ) -> Result<Vec<Collaboration>> {
        logged(
            "list_collaborators",
            self.list_inner(playlist_id, owner).await,
        )
    }

    async fn list_inner(
        &self,
        playlist_id: &PlaylistId,
        owner: &UserId,
    ) -> Result<Vec<Collaboration>> {
        self.resolver
            .resolve_ownership(playlist_id, owner)
            .await?
            .authorize(playlist_id)?;

        self.collaborations.list_collaborators(playlist_id).await
    }
}
