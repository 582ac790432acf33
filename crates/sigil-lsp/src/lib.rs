//! Sigil LSP Library
//!
//! LSP protocol layer, converts JSON-RPC requests to Core library calls.

use sigil_core::vfs::FileSystem;
use std::sync::Arc;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LspService};

use crate::protocol::*;
use crate::state::GlobalState;

mod conversion;
mod handlers;
mod protocol;
mod state;


/// LSP backend implementation
pub struct Backend {
    client: Client,
    state: GlobalState,
}

impl Backend {
    pub fn new(client: Client, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            client,
            state: GlobalState::new(fs),
        }
    }
}

#[tower_lsp::async_trait]
impl tower_lsp::LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::handle_initialize(&self.client, &self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        log::info!("Client initialized, ready to accept requests");
    }

    async fn shutdown(&self) -> Result<()> {
        log::info!("Shutdown requested");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::handle_did_open(&self.state, params).await
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::handle_did_change(&self.state, params).await
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::handle_did_close(&self.state, params).await
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handlers::handle_did_change_watched_files(&self.client, &self.state, params).await
    }

    async fn did_rename_files(&self, params: RenameFilesParams) {
        handlers::handle_did_rename_files(&self.client, &self.state, params).await
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::handle_did_change_configuration(&self.client, &self.state, params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        let command = params.command.clone();
        log::debug!("executeCommand {}", command);
        match command.as_str() {
            CMD_LINK_DECORATIONS => {
                handlers::handle_link_decorations_command(&self.state, params).await
            }
            CMD_RESOLVE_FOLDER_ICON => {
                handlers::handle_resolve_folder_icon_command(&self.state, params).await
            }
            CMD_LIST_FOLDER_ICONS => {
                handlers::handle_list_folder_icons_command(&self.state, params).await
            }
            CMD_SET_FOLDER_ICON => {
                handlers::handle_set_folder_icon_command(&self.client, &self.state, params).await
            }
            CMD_REMOVE_FOLDER_ICON => {
                handlers::handle_remove_folder_icon_command(&self.client, &self.state, params)
                    .await
            }
            CMD_RENAME_FOLDER_ICON => {
                handlers::handle_rename_folder_icon_command(&self.client, &self.state, params)
                    .await
            }
            other => Err(Error::invalid_params(format!("Unknown command: {}", other))),
        }
    }
}

/// Create and return LSP service and client socket
pub fn create_lsp_service(fs: Arc<dyn FileSystem>) -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::new(move |client| Backend::new(client, fs.clone()))
}
