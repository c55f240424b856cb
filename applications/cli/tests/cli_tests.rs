//! End-to-end command tests against a real temp-file SQLite database

use chorus_cli::commands::{
    CollabCommand, PlaylistCommand, SongCommand, UserCommand,
};
use chorus_cli::{App, Cli, Commands};
use clap::Parser;
use serde_json::Value;
use tempfile::TempDir;

async fn create_test_app() -> (App, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("cli.db").display());

    let pool = chorus_storage::create_pool(&db_url, 5).await.unwrap();
    chorus_storage::run_migrations(&pool).await.unwrap();

    (App::new(chorus_storage::SqliteStore::new(pool)), temp_dir)
}

async fn add_user(app: &App, username: &str) -> String {
    let output = app
        .run(
            None,
            Commands::User {
                command: UserCommand::Add {
                    username: username.to_string(),
                    fullname: format!("{username} Test"),
                },
            },
        )
        .await
        .unwrap();
    output["userId"].as_str().unwrap().to_string()
}

async fn add_song(app: &App, title: &str) -> String {
    let output = app
        .run(
            None,
            Commands::Song {
                command: SongCommand::Add {
                    title: title.to_string(),
                    performer: "Test Artist".to_string(),
                    year: 2001,
                    genre: None,
                    duration: Some(180),
                },
            },
        )
        .await
        .unwrap();
    output["songId"].as_str().unwrap().to_string()
}

async fn playlist(app: &App, user: &str, command: PlaylistCommand) -> anyhow::Result<Value> {
    app.run(Some(user), Commands::Playlist { command }).await
}

#[tokio::test]
async fn collaborator_flow_end_to_end() {
    let (app, _temp) = create_test_app().await;
    let owner = add_user(&app, "owner").await;
    let collaborator = add_user(&app, "collab").await;
    let song = add_song(&app, "Intro").await;

    let created = playlist(
        &app,
        &owner,
        PlaylistCommand::Create {
            name: "Road Trip".to_string(),
        },
    )
    .await
    .unwrap();
    let playlist_id = created["playlistId"].as_str().unwrap().to_string();

    app.run(
        Some(&owner),
        Commands::Collab {
            command: CollabCommand::Add {
                playlist_id: playlist_id.clone(),
                user_id: collaborator.clone(),
            },
        },
    )
    .await
    .unwrap();

    playlist(
        &app,
        &collaborator,
        PlaylistCommand::AddSong {
            playlist_id: playlist_id.clone(),
            song_id: song.clone(),
        },
    )
    .await
    .unwrap();

    let shown = playlist(
        &app,
        &collaborator,
        PlaylistCommand::Show {
            playlist_id: playlist_id.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(shown["playlist"]["name"], "Road Trip");
    assert_eq!(shown["playlist"]["username"], "owner");
    assert_eq!(shown["playlist"]["songs"][0]["title"], "Intro");

    let listed = playlist(&app, &collaborator, PlaylistCommand::List)
        .await
        .unwrap();
    assert_eq!(listed["playlists"].as_array().unwrap().len(), 1);

    let denied = playlist(
        &app,
        &collaborator,
        PlaylistCommand::RemoveSong {
            playlist_id: playlist_id.clone(),
            song_id: song.clone(),
        },
    )
    .await;
    assert!(denied.is_err());

    playlist(
        &app,
        &owner,
        PlaylistCommand::RemoveSong {
            playlist_id,
            song_id: song,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn revoked_collaborator_loses_access() {
    let (app, _temp) = create_test_app().await;
    let owner = add_user(&app, "owner").await;
    let collaborator = add_user(&app, "collab").await;

    let created = playlist(
        &app,
        &owner,
        PlaylistCommand::Create {
            name: "Shared".to_string(),
        },
    )
    .await
    .unwrap();
    let playlist_id = created["playlistId"].as_str().unwrap().to_string();

    for command in [
        CollabCommand::Add {
            playlist_id: playlist_id.clone(),
            user_id: collaborator.clone(),
        },
        CollabCommand::Remove {
            playlist_id: playlist_id.clone(),
            user_id: collaborator.clone(),
        },
    ] {
        app.run(Some(&owner), Commands::Collab { command })
            .await
            .unwrap();
    }

    let listed = playlist(&app, &collaborator, PlaylistCommand::List)
        .await
        .unwrap();
    assert!(listed["playlists"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn collab_list_shows_single_record_after_repeated_grant() {
    let (app, _temp) = create_test_app().await;
    let owner = add_user(&app, "owner").await;
    let collaborator = add_user(&app, "collab").await;

    let created = playlist(
        &app,
        &owner,
        PlaylistCommand::Create {
            name: "Shared".to_string(),
        },
    )
    .await
    .unwrap();
    let playlist_id = created["playlistId"].as_str().unwrap().to_string();

    let mut ids = Vec::new();
    for _ in 0..2 {
        let granted = app
            .run(
                Some(&owner),
                Commands::Collab {
                    command: CollabCommand::Add {
                        playlist_id: playlist_id.clone(),
                        user_id: collaborator.clone(),
                    },
                },
            )
            .await
            .unwrap();
        ids.push(granted["collaborationId"].clone());
    }
    assert_eq!(ids[0], ids[1]);

    let listed = app
        .run(
            Some(&owner),
            Commands::Collab {
                command: CollabCommand::List {
                    playlist_id: playlist_id.clone(),
                },
            },
        )
        .await
        .unwrap();
    let collaborators = listed["collaborators"].as_array().unwrap();
    assert_eq!(collaborators.len(), 1);
    assert_eq!(collaborators[0]["user_id"], collaborator.as_str());

    let denied = app
        .run(
            Some(&collaborator),
            Commands::Collab {
                command: CollabCommand::List { playlist_id },
            },
        )
        .await;
    assert!(denied.is_err());
}

#[tokio::test]
async fn song_show_returns_catalog_entry() {
    let (app, _temp) = create_test_app().await;
    let song = add_song(&app, "Intro").await;

    let shown = app
        .run(
            None,
            Commands::Song {
                command: SongCommand::Show {
                    song_id: song.clone(),
                },
            },
        )
        .await
        .unwrap();
    assert_eq!(shown["song"]["id"], song.as_str());
    assert_eq!(shown["song"]["title"], "Intro");
    assert_eq!(shown["song"]["year"], 2001);

    let missing = app
        .run(
            None,
            Commands::Song {
                command: SongCommand::Show {
                    song_id: "song-missing".to_string(),
                },
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        missing.downcast_ref::<chorus_core::ChorusError>(),
        Some(chorus_core::ChorusError::SongNotFound(_))
    ));
}

#[tokio::test]
async fn playlist_commands_require_acting_user() {
    let (app, _temp) = create_test_app().await;

    let result = app
        .run(
            None,
            Commands::Playlist {
                command: PlaylistCommand::List,
            },
        )
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn user_list_returns_created_users() {
    let (app, _temp) = create_test_app().await;
    add_user(&app, "alice").await;
    add_user(&app, "bob").await;

    let output = app
        .run(
            None,
            Commands::User {
                command: UserCommand::List,
            },
        )
        .await
        .unwrap();

    assert_eq!(output["users"].as_array().unwrap().len(), 2);
}

#[test]
fn parses_global_user_after_subcommand() {
    let cli = Cli::try_parse_from([
        "chorus",
        "playlist",
        "add-song",
        "playlist-1",
        "song-1",
        "--user",
        "user-1",
    ])
    .unwrap();

    assert_eq!(cli.user.as_deref(), Some("user-1"));
    assert!(matches!(
        cli.command,
        Commands::Playlist {
            command: PlaylistCommand::AddSong { .. }
        }
    ));
}

#[test]
fn parses_song_add_with_optional_flags() {
    let cli = Cli::try_parse_from([
        "chorus", "song", "add", "Intro", "The xx", "2009", "--genre", "indie",
    ])
    .unwrap();

    match cli.command {
        Commands::Song {
            command:
                SongCommand::Add {
                    year,
                    genre,
                    duration,
                    ..
                },
        } => {
            assert_eq!(year, 2009);
            assert_eq!(genre.as_deref(), Some("indie"));
            assert_eq!(duration, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
