// Hardware notch detection
mod capability;

// Options file and sizing merge
mod config;

// Display snapshots, resolution and change events
mod display;

mod error;
mod geometry;

// Window, display and renderer seam
mod host;

mod notification;
mod render;

// Lifecycle state machine and its driver
mod runtime;
mod state;

// Notification sounds
mod audio;

use audio::SoundBoard;
use capability::HostCapability;
use config::IslandOptions;
use display::{resolve_internal_display, DisplayInfo};
use host::desktop::{self, TauriHost};
use notification::{NotificationRequest, ResizeRequest, ShowOptions};
use runtime::IslandHandle;
use serde::Serialize;
use state::Island;
use std::path::PathBuf;
use tauri::{AppHandle, Manager, State};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DisplayReport {
    capability: HostCapability,
    displays: Vec<DisplayInfo>,
    internal_display: Option<DisplayInfo>,
}

// ===== Commands =====

/// Fire-and-forget. Invalid arguments are logged, never thrown back.
#[tauri::command]
fn show_notification(options: ShowOptions, island: State<IslandHandle>) {
    if !island.has_notch() {
        return;
    }
    match NotificationRequest::try_from(options) {
        Ok(request) => island.show(request),
        Err(e) => tracing::error!("Invalid notification: {e}"),
    }
}

/// Called by the webview once it has measured its content.
#[tauri::command]
fn report_content_height(request: ResizeRequest, island: State<IslandHandle>) {
    island.resize(request);
}

#[tauri::command]
fn has_notch(island: State<IslandHandle>) -> bool {
    island.has_notch()
}

#[tauri::command]
fn display_report(app: AppHandle, island: State<IslandHandle>) -> Result<DisplayReport, String> {
    let displays = desktop::query_displays(&app).map_err(|e| e.to_string())?;
    let internal_display = resolve_internal_display(&displays).cloned();
    Ok(DisplayReport {
        capability: island.capability(),
        displays,
        internal_display,
    })
}

// ===== Setup =====

fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn sound_dir(app: &AppHandle) -> PathBuf {
    match app.path().resource_dir() {
        Ok(dir) if dir.join("sounds").is_dir() => dir.join("sounds"),
        // Running from the source tree
        _ => PathBuf::from("assets/sounds"),
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Options come first so the log level can follow them
    let loaded = IslandOptions::load();
    init_tracing(loaded.as_ref().is_ok_and(|o| o.debug));
    let options = loaded.unwrap_or_else(|e| {
        tracing::warn!("{e}; using default options");
        IslandOptions::default()
    });

    let capability = capability::detect(options.debug);
    tracing::info!(has_notch = capability.has_notch, "Notch capability detected");

    // We must keep _stream alive, even though we don't use it directly, else audio stops.
    let (sounds, _stream) = if options.enable_sounds && capability.has_notch {
        match SoundBoard::open() {
            Ok((board, stream)) => (Some(board), Some(stream)),
            Err(e) => {
                tracing::warn!("Sounds disabled: {e}");
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let (handle, commands) = runtime::channel(capability);

    tauri::Builder::default()
        .manage(handle.clone())
        .setup(move |app| {
            if !capability.has_notch {
                return Ok(());
            }

            let app_handle = app.handle().clone();
            let sounds = sounds.map(|mut board| {
                board.preload(&sound_dir(&app_handle), &options.sounds);
                board
            });
            let host = TauriHost::new(app_handle.clone(), handle.clone(), sounds);
            let island = Island::new(host, options, capability);

            tauri::async_runtime::spawn(runtime::drive(island, commands));
            desktop::watch_displays(app_handle, handle);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            show_notification,
            report_content_height,
            has_notch,
            display_report,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
