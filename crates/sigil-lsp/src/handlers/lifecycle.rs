use super::{apply_settings, internal_error, load_settings_file};
use crate::protocol::all_commands;
use crate::state::GlobalState;
use sigil_core::{IconSettings, VaultIndex};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

/// Handle "initialize" request
pub async fn handle_initialize(
    client: &Client,
    state: &GlobalState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    let root_path = params.root_uri.and_then(|uri| uri.to_file_path().ok());

    if let Some(root_path) = &root_path {
        client
            .log_message(
                MessageType::INFO,
                format!("Initializing vault at: {:?}", root_path),
            )
            .await;

        let root_clone = root_path.clone();
        let fs = state.fs.clone();
        let vault = tokio::task::spawn_blocking(move || VaultIndex::scan(&root_clone, &*fs))
            .await
            .map_err(|e| internal_error(format!("Failed to index vault: {}", e)))?;

        client
            .log_message(MessageType::INFO, format!("Indexed {} files", vault.len()))
            .await;

        {
            let mut root_lock = state.root.write().await;
            *root_lock = Some(root_path.clone());
        }
        let mut vault_lock = state.vault.write().await;
        *vault_lock = Some(vault);
    } else {
        client
            .log_message(MessageType::WARNING, "No rootUri provided!")
            .await;
    }

    let from_options = match params.initialization_options {
        Some(options) if !options.is_null() => match IconSettings::load_value(options) {
            Ok((settings, _)) => Some(settings),
            Err(e) => {
                client
                    .log_message(
                        MessageType::ERROR,
                        format!("❌ Invalid initializationOptions: {}", e),
                    )
                    .await;
                None
            }
        },
        _ => None,
    };

    let settings = match (from_options, &root_path) {
        (Some(settings), _) => Some(settings),
        (None, Some(root)) => load_settings_file(client, state, root).await,
        (None, None) => None,
    };
    if let Some(settings) = settings {
        client
            .log_message(
                MessageType::INFO,
                format!("{} folder icons configured", settings.folder_icons.len()),
            )
            .await;
        apply_settings(client, state, settings).await;
    }

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: all_commands(),
                work_done_progress_options: Default::default(),
            }),
            workspace: Some(WorkspaceServerCapabilities {
                workspace_folders: None,
                file_operations: Some(WorkspaceFileOperationsServerCapabilities {
                    did_rename: Some(FileOperationRegistrationOptions {
                        filters: vec![FileOperationFilter {
                            scheme: Some("file".to_string()),
                            pattern: FileOperationPattern {
                                glob: "**/*".to_string(),
                                matches: None,
                                options: None,
                            },
                        }],
                    }),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "sigil".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}
