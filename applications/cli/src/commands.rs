/// Command line surface
use anyhow::{Context, Result};
use chorus_core::types::{NewSong, User};
use chorus_core::{
    ChorusError, CollaborationService, PlaylistId, PlaylistService, Repositories, SongId, UserId,
};
use chorus_storage::SqliteStore;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "chorus")]
#[command(about = "Chorus collaborative playlist manager", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Acting user id
    #[arg(short, long, global = true, env = "CHORUS_ACTING_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Manage the song catalog
    Song {
        #[command(subcommand)]
        command: SongCommand,
    },
    /// Manage playlists and their songs
    Playlist {
        #[command(subcommand)]
        command: PlaylistCommand,
    },
    /// Manage playlist collaborators
    Collab {
        #[command(subcommand)]
        command: CollabCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a new user
    Add { username: String, fullname: String },
    /// List all users
    List,
}

#[derive(Debug, Subcommand)]
pub enum SongCommand {
    /// Add a song to the catalog
    Add {
        title: String,
        performer: String,
        year: i32,
        #[arg(long)]
        genre: Option<String>,
        /// Duration in seconds
        #[arg(long)]
        duration: Option<i32>,
    },
    /// Show a catalog song
    Show { song_id: String },
}

#[derive(Debug, Subcommand)]
pub enum PlaylistCommand {
    /// Create a playlist owned by the acting user
    Create { name: String },
    /// List playlists the acting user owns or collaborates on
    List,
    /// Show a playlist with its songs
    Show { playlist_id: String },
    /// Delete a playlist (owner only)
    Delete { playlist_id: String },
    /// Add a song to a playlist
    AddSong { playlist_id: String, song_id: String },
    /// Remove a song from a playlist (owner only)
    RemoveSong { playlist_id: String, song_id: String },
}

#[derive(Debug, Subcommand)]
pub enum CollabCommand {
    /// Grant a user access to a playlist (owner only)
    Add { playlist_id: String, user_id: String },
    /// Revoke a user's access (owner only)
    Remove { playlist_id: String, user_id: String },
    /// List a playlist's collaborators (owner only)
    List { playlist_id: String },
}

/// Services wired to one `SQLite` store
#[derive(Clone)]
pub struct App {
    store: Arc<SqliteStore>,
    playlists: PlaylistService,
    collaborations: CollaborationService,
}

impl App {
    pub fn new(store: SqliteStore) -> Self {
        let store = Arc::new(store);
        let repos = Repositories::from_store(store.clone());
        Self {
            playlists: PlaylistService::new(&repos),
            collaborations: CollaborationService::new(&repos),
            store,
        }
    }

    /// Execute a command and return its JSON payload
    pub async fn run(&self, user: Option<&str>, command: Commands) -> Result<Value> {
        match command {
            Commands::User { command } => self.run_user(command).await,
            Commands::Song { command } => self.run_song(command).await,
            Commands::Playlist { command } => {
                let user = acting_user(user)?;
                self.run_playlist(&user, command).await
            }
            Commands::Collab { command } => {
                let user = acting_user(user)?;
                self.run_collab(&user, command).await
            }
        }
    }

    async fn run_user(&self, command: UserCommand) -> Result<Value> {
        let pool = self.store.pool();
        match command {
            UserCommand::Add { username, fullname } => {
                let user = User::new(username, fullname);
                chorus_storage::users::create(pool, &user)
                    .await
                    .context("Failed to add user")?;
                Ok(json!({ "userId": user.id }))
            }
            UserCommand::List => {
                let users = chorus_storage::users::get_all(pool).await?;
                Ok(json!({ "users": users }))
            }
        }
    }

    async fn run_song(&self, command: SongCommand) -> Result<Value> {
        match command {
            SongCommand::Add {
                title,
                performer,
                year,
                genre,
                duration,
            } => {
                let song = chorus_storage::songs::create(
                    self.store.pool(),
                    NewSong {
                        title,
                        year,
                        performer,
                        genre,
                        duration,
                    },
                )
                .await
                .context("Failed to add song")?;
                Ok(json!({ "songId": song.id }))
            }
            SongCommand::Show { song_id } => {
                let song_id = SongId::new(song_id);
                let song = chorus_storage::songs::get_by_id(self.store.pool(), &song_id)
                    .await?
                    .ok_or(ChorusError::SongNotFound(song_id))?;
                Ok(json!({ "song": song }))
            }
        }
    }

    async fn run_playlist(&self, user: &UserId, command: PlaylistCommand) -> Result<Value> {
        match command {
            PlaylistCommand::Create { name } => {
                let playlist_id = self.playlists.create_playlist(user, &name).await?;
                Ok(json!({ "playlistId": playlist_id }))
            }
            PlaylistCommand::List => {
                let playlists = self.playlists.list_playlists(user).await?;
                Ok(json!({ "playlists": playlists }))
            }
            PlaylistCommand::Show { playlist_id } => {
                let playlist = self
                    .playlists
                    .get_playlist(&PlaylistId::new(playlist_id), user)
                    .await?;
                Ok(json!({ "playlist": playlist }))
            }
            PlaylistCommand::Delete { playlist_id } => {
                self.playlists
                    .delete_playlist(&PlaylistId::new(playlist_id), user)
                    .await?;
                Ok(json!({ "message": "Playlist deleted" }))
            }
            PlaylistCommand::AddSong {
                playlist_id,
                song_id,
            } => {
                self.playlists
                    .add_song(&PlaylistId::new(playlist_id), &SongId::new(song_id), user)
                    .await?;
                Ok(json!({ "message": "Song added to playlist" }))
            }
            PlaylistCommand::RemoveSong {
                playlist_id,
                song_id,
            } => {
                self.playlists
                    .remove_song(&PlaylistId::new(playlist_id), &SongId::new(song_id), user)
                    .await?;
                Ok(json!({ "message": "Song removed from playlist" }))
            }
        }
    }

    async fn run_collab(&self, owner: &UserId, command: CollabCommand) -> Result<Value> {
        match command {
            CollabCommand::Add {
                playlist_id,
                user_id,
            } => {
                let collaboration_id = self
                    .collaborations
                    .add_collaborator(&PlaylistId::new(playlist_id), owner, &UserId::new(user_id))
                    .await?;
                Ok(json!({ "collaborationId": collaboration_id }))
            }
            CollabCommand::Remove {
                playlist_id,
                user_id,
            } => {
                self.collaborations
                    .remove_collaborator(&PlaylistId::new(playlist_id), owner, &UserId::new(user_id))
                    .await?;
                Ok(json!({ "message": "Collaborator removed" }))
            }
            CollabCommand::List { playlist_id } => {
                let collaborators = self
                    .collaborations
                    .list_collaborators(&PlaylistId::new(playlist_id), owner)
                    .await?;
                Ok(json!({ "collaborators": collaborators }))
            }
        }
    }
}

fn acting_user(user: Option<&str>) -> Result<UserId> {
    match user {
        Some(id) if !id.trim().is_empty() => Ok(UserId::new(id)),
        _ => anyhow::bail!("An acting user is required (--user or CHORUS_ACTING_USER)"),
    }
}
