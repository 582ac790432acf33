use super::{command_args, persist_settings, to_json};
use crate::protocol::{
    EditResult, FolderIconEntry, FolderParams, ListFolderIconsResult, RenameFolderIconParams,
    SetFolderIconParams,
};
use crate::state::GlobalState;
use sigil_core::{normalize_folder, resolve, FolderIconMapping, SettingsError};
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::ExecuteCommandParams;
use tower_lsp::Client;

fn edit_error(e: SettingsError) -> Error {
    Error::invalid_params(e.to_string())
}

/// Handle "sigil/listFolderIcons"
pub async fn handle_list_folder_icons_command(
    state: &GlobalState,
    _params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let settings = state.settings.read().await;
    let entries = settings
        .folder_icons
        .iter()
        .map(|(folder, mapping)| FolderIconEntry {
            folder: folder.to_string(),
            icon: mapping.icon.clone(),
            color: mapping.color.clone(),
        })
        .collect();

    to_json(&ListFolderIconsResult { entries })
}

/// Handle "sigil/resolveFolderIcon": the mapping that applies to a folder, or null
pub async fn handle_resolve_folder_icon_command(
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let params: FolderParams = command_args(&params)?;
    let settings = state.settings.read().await;
    to_json(&resolve(&params.folder, &settings.folder_icons))
}

/// Handle "sigil/setFolderIcon"
pub async fn handle_set_folder_icon_command(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let params: SetFolderIconParams = command_args(&params)?;
    let mapping = FolderIconMapping {
        icon: params.icon,
        color: params.color,
    };

    {
        let mut settings = state.settings.write().await;
        settings
            .folder_icons
            .set(&params.folder, mapping)
            .map_err(edit_error)?;
    }
    log::info!("Folder icon set for {:?}", normalize_folder(&params.folder));

    let persisted = persist_settings(client, state).await;
    to_json(&EditResult {
        changed: 1,
        persisted,
    })
}

/// Handle "sigil/removeFolderIcon"
pub async fn handle_remove_folder_icon_command(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let params: FolderParams = command_args(&params)?;

    let removed = {
        let mut settings = state.settings.write().await;
        settings.folder_icons.remove(&params.folder).is_some()
    };
    if !removed {
        return to_json(&EditResult {
            changed: 0,
            persisted: false,
        });
    }

    let persisted = persist_settings(client, state).await;
    to_json(&EditResult {
        changed: 1,
        persisted,
    })
}

/// Handle "sigil/renameFolderIcon": move a folder's mappings, subfolders included
pub async fn handle_rename_folder_icon_command(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let params: RenameFolderIconParams = command_args(&params)?;

    let changed = {
        let mut settings = state.settings.write().await;
        settings
            .folder_icons
            .rename_folder(&params.from, &params.to)
            .map_err(edit_error)?
    };
    let persisted = changed > 0 && persist_settings(client, state).await;

    to_json(&EditResult { changed, persisted })
}
