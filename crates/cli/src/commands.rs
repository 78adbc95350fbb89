//! Subcommand execution.

use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use portal_api::{FileUpload, PortalApi};
use portal_core::ApiError;
use portal_events::StreamEvent;
use portal_models::auth::LoginRequest;
use portal_models::report::ExportQuery;
use portal_models::search::SearchQuery;

use crate::Command;

pub(crate) async fn execute(api: &PortalApi, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let auth = api.auth_session();
            auth.login(&LoginRequest::new(email, password)).await?;
            let user = auth.user().await;
            print_json(&serde_json::json!({ "logged_in": true, "user": user }))
        }
        Command::Logout => {
            api.auth_session().logout().await;
            print_json(&serde_json::json!({ "logged_in": false }))
        }
        Command::Whoami => {
            let auth = api.auth_session();
            if auth.is_authenticated().await {
                if let Some(user) = auth.user().await {
                    return print_json(&user);
                }
            }
            let error = auth
                .error()
                .await
                .unwrap_or_else(|| ApiError::validation("not logged in"));
            Err(error.into())
        }
        Command::Volunteer { id } => print_json(&api.volunteers().get_volunteer(id).await?),
        Command::PendingHours => print_json(&api.volunteers().pending_hours().await?),
        Command::ApproveHours { log_id } => {
            print_json(&api.volunteers().approve_hours(log_id).await?)
        }
        Command::RejectHours { log_id } => print_json(&api.volunteers().reject_hours(log_id).await?),
        Command::Search { query, limit } => {
            let mut query = SearchQuery::new(query);
            if let Some(limit) = limit {
                query = query.with_limit(limit);
            }
            print_json(&api.search().search(&query).await?)
        }
        Command::Export { kind, format, out } => {
            let query = ExportQuery {
                format: format.into(),
                ..Default::default()
            };
            let download = api.reports().export(kind.into(), &query).await?;
            let path = out
                .or_else(|| download.filename.as_deref().map(PathBuf::from))
                .context("no output path given and the backend suggested none")?;
            tokio::fs::write(&path, &download.bytes)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = download.bytes.len(), "Export saved");
            print_json(&serde_json::json!({
                "path": path,
                "bytes": download.bytes.len(),
                "content_type": download.content_type,
            }))
        }
        Command::Upload { path, folder } => {
            let mut file = FileUpload::from_path(&path).await?;
            if let Some(folder) = folder {
                file = file.folder(folder);
            }
            print_json(&api.files().upload(file).await?)
        }
        Command::Watch => watch(api).await,
    }
}

/// Print notifications until Ctrl-C or until the backend ends the feed.
async fn watch(api: &PortalApi) -> anyhow::Result<()> {
    let mut feed = api.notifications().subscribe().await?;
    tracing::info!("Watching notifications, press Ctrl-C to stop");

    loop {
        let event = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                feed.close();
                return Ok(());
            }
            event = feed.next() => event,
        };

        match event {
            Some(StreamEvent::Connected(_)) => tracing::info!("Feed connected"),
            Some(StreamEvent::Notification(notification)) => print_json(&notification)?,
            Some(StreamEvent::Error(ApiError::Decode { detail, .. })) => {
                tracing::warn!(%detail, "Skipping undecodable notification");
            }
            Some(StreamEvent::Error(e)) => return Err(e.into()),
            None => return Ok(()),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
