use super::{apply_settings, load_settings_file, persist_settings};
use crate::state::{GlobalState, SETTINGS_FILE};
use sigil_core::utils::vault_relative_path;
use sigil_core::SettingsError;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

fn is_hidden(relative: &str) -> bool {
    relative.split('/').any(|s| s.starts_with('.'))
}

/// Handle "textDocument/didOpen" notification
pub async fn handle_did_open(state: &GlobalState, params: DidOpenTextDocumentParams) {
    let mut cache = state.document_cache.write().await;
    cache.insert(params.text_document.uri, params.text_document.text);
}

/// Handle "textDocument/didChange" notification
pub async fn handle_did_change(state: &GlobalState, params: DidChangeTextDocumentParams) {
    if let Some(last_change) = params.content_changes.into_iter().last() {
        let mut cache = state.document_cache.write().await;
        cache.insert(params.text_document.uri, last_change.text);
    }
}

/// Handle "textDocument/didClose" notification
pub async fn handle_did_close(state: &GlobalState, params: DidCloseTextDocumentParams) {
    let mut cache = state.document_cache.write().await;
    cache.remove(&params.text_document.uri);
}

/// Handle "workspace/didChangeWatchedFiles" notification
pub async fn handle_did_change_watched_files(
    client: &Client,
    state: &GlobalState,
    params: DidChangeWatchedFilesParams,
) {
    let Some(root) = state.root.read().await.clone() else {
        return;
    };
    let mut settings_changed = false;

    {
        let mut vault_lock = state.vault.write().await;
        for change in params.changes {
            let Ok(path) = change.uri.to_file_path() else {
                continue;
            };
            let Some(relative) = vault_relative_path(&root, &path) else {
                continue;
            };
            if relative == SETTINGS_FILE {
                settings_changed = true;
            }
            if is_hidden(&relative) {
                continue;
            }

            match change.typ {
                FileChangeType::CREATED => {
                    if let Some(vault) = vault_lock.as_mut() {
                        vault.insert(relative);
                    }
                }
                FileChangeType::DELETED => {
                    if let Some(vault) = vault_lock.as_mut() {
                        vault.remove(&relative);
                    }
                    let mut cache = state.document_cache.write().await;
                    cache.remove(&change.uri);
                }
                _ => {}
            }
        }
    }

    if settings_changed {
        log::info!("{} changed on disk, reloading", SETTINGS_FILE);
        if let Some(settings) = load_settings_file(client, state, &root).await {
            apply_settings(client, state, settings).await;
        }
    }
}

/// Handle "workspace/didRenameFiles" notification
///
/// Renamed folders carry their icon mappings along.
pub async fn handle_did_rename_files(client: &Client, state: &GlobalState, params: RenameFilesParams) {
    let Some(root) = state.root.read().await.clone() else {
        return;
    };
    let mut mappings_moved = 0;

    for file_rename in params.files {
        let old_uri = file_rename.old_uri.parse::<Url>();
        let new_uri = file_rename.new_uri.parse::<Url>();
        let (Ok(old_url), Ok(new_url)) = (old_uri, new_uri) else {
            continue;
        };
        let (Ok(old_path), Ok(new_path)) = (old_url.to_file_path(), new_url.to_file_path()) else {
            continue;
        };
        let (Some(old_rel), Some(new_rel)) = (
            vault_relative_path(&root, &old_path),
            vault_relative_path(&root, &new_path),
        ) else {
            continue;
        };

        {
            let mut cache = state.document_cache.write().await;
            if let Some(text) = cache.remove(&old_url) {
                cache.insert(new_url.clone(), text);
            }
        }

        let is_folder = {
            let mut vault_lock = state.vault.write().await;
            match vault_lock.as_mut() {
                Some(vault) if vault.contains(&old_rel) => {
                    vault.rename(&old_rel, new_rel.clone());
                    false
                }
                Some(vault) => {
                    vault.rename_folder(&old_rel, &new_rel) > 0 || state.fs.is_dir(&new_path)
                }
                None => state.fs.is_dir(&new_path),
            }
        };

        if is_folder {
            let moved = {
                let mut settings = state.settings.write().await;
                settings.folder_icons.rename_folder(&old_rel, &new_rel)
            };
            match moved {
                Ok(moved) => mappings_moved += moved,
                Err(SettingsError::UnknownFolder(_)) => {}
                Err(e) => {
                    log::warn!("Folder icons not moved from {:?}: {}", old_rel, e);
                    client
                        .log_message(
                            MessageType::WARNING,
                            format!("Folder icons for {} not moved: {}", old_rel, e),
                        )
                        .await;
                }
            }
        }
    }

    if mappings_moved > 0 {
        log::info!("Moved {} folder icon mappings after rename", mappings_moved);
        persist_settings(client, state).await;
    }
}
