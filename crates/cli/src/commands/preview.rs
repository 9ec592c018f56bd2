use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use sitekit_core::config::ExportMode;
use sitekit_generator::{GeneratedSite, write_dir};
use std::fs;
use std::path::{Path, PathBuf};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use super::project::{Project, print_report};

const RELOAD_SCRIPT: &str = r#"<script>
(function () {
  var source = new EventSource('/_reload');
  source.onmessage = function () { location.reload(); };
  source.onerror = function () { source.close(); };
})();
</script>
"#;

#[derive(Clone)]
struct AppState {
    reload_tx: broadcast::Sender<()>,
}

/// Insert the hot-reload client before `</body>` of every HTML page.
fn inject_reload(site: &mut GeneratedSite) {
    for (path, html) in site.pages.iter_mut() {
        if !path.ends_with(".html") {
            continue;
        }
        match html.rfind("</body>") {
            Some(pos) => html.insert_str(pos, RELOAD_SCRIPT),
            None => html.push_str(RELOAD_SCRIPT),
        }
    }
}

/// Export the project into `out`, replacing what was there.
fn rebuild(project_dir: &Path, mode: Option<ExportMode>, out: &Path) -> Result<usize> {
    let project = Project::load(project_dir)?.with_mode(mode);
    let (mut site, report) = project.export();
    print_report(&report);
    inject_reload(&mut site);

    if out.exists() {
        for entry in fs::read_dir(out)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
    }
    write_dir(&site, out).context("Failed to write preview files")?;
    Ok(site.file_count())
}

/// Start preview server with hot reload for local development.
///
/// The site is exported into a temporary directory and served from there.
/// Changes to `site.json`, `export.toml` or the image cache trigger a
/// rebuild and a reload of every open page.
pub async fn run(path: PathBuf, port: u16, mode: Option<ExportMode>) -> Result<()> {
    println!("🌐 Starting preview server...");
    println!("   Site: {}", path.display());

    let out_dir = tempfile::Builder::new()
        .prefix("sitekit-preview-")
        .tempdir()
        .context("Failed to create preview directory")?;
    let out = Arc::new(out_dir.path().to_path_buf());

    let files = rebuild(&path, mode, &out)?;
    println!("   ✓ Built {} file(s)", files);

    let (reload_tx, _) = broadcast::channel::<()>(100);
    let state = AppState {
        reload_tx: reload_tx.clone(),
    };

    let app = Router::new()
        .route("/_reload", get(sse_handler))
        .with_state(state)
        .fallback_service(ServeDir::new(out.as_path()));

    let watcher_path = path.clone();
    let watcher_out = Arc::clone(&out);
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_path, mode, watcher_out, reload_tx).await {
            eprintln!("File watcher error: {}", e);
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Whether a changed path should trigger a rebuild.
fn is_relevant(path: &Path) -> bool {
    let filename = path.file_name().unwrap_or_default().to_string_lossy();
    !filename.starts_with('.') && !filename.ends_with('~') && !filename.ends_with(".zip")
}

/// Watch the project directory, rebuild on change and notify clients.
async fn watch_files(
    path: PathBuf,
    mode: Option<ExportMode>,
    out: Arc<PathBuf>,
    reload_tx: broadcast::Sender<()>,
) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                if !event.paths.iter().any(|p| is_relevant(p)) {
                    continue;
                }
                // Editors emit bursts of events per save.
                while rx.try_recv().is_ok() {}

                println!("   📝 File changed, rebuilding...");
                match rebuild(&path, mode, &out) {
                    Ok(files) => {
                        println!("   ✓ Rebuilt {} file(s)", files);
                        let _ = reload_tx.send(());
                    }
                    Err(e) => eprintln!("   ✗ Rebuild failed: {:#}", e),
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(()) => yield Ok(Event::default().data("reload")),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
