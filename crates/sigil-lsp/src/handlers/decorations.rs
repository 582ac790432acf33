use super::{command_args, internal_error, to_json};
use crate::conversion::{decoration_to_item, uri_to_vault_path};
use crate::protocol::{LinkDecorationsParams, LinkDecorationsResult};
use crate::state::GlobalState;
use sigil_core::Decorator;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::ExecuteCommandParams;

/// Handle "sigil/linkDecorations": icons for every mapped link in a document
pub async fn handle_link_decorations_command(
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let params: LinkDecorationsParams = command_args(&params)?;

    let root = state
        .root
        .read()
        .await
        .clone()
        .ok_or_else(|| internal_error("Vault not initialized".to_string()))?;
    let source = uri_to_vault_path(&root, &params.uri)
        .ok_or_else(|| Error::invalid_params("Document is outside the vault"))?;

    let cached = state.document_cache.read().await.get(&params.uri).cloned();
    let text = match cached {
        Some(text) => text,
        None => {
            let path = root.join(&source);
            state
                .fs
                .read_to_string(&path)
                .map_err(|e| internal_error(format!("Failed to read {:?}: {}", path, e)))?
        }
    };

    let vault_guard = state.vault.read().await;
    let vault = vault_guard.as_ref().ok_or_else(Error::internal_error)?;
    let settings = state.settings.read().await;
    let glyphs = state.glyphs.read().await;

    let decorator = match glyphs.as_ref() {
        Some(catalog) => Decorator::new(&settings, vault).with_glyphs(catalog),
        None => Decorator::new(&settings, vault),
    };
    let decorations = decorator.decorate(&source, &text);
    log::debug!("{} decorations for {}", decorations.len(), source);

    let result = LinkDecorationsResult {
        decorations: decorations.into_iter().map(decoration_to_item).collect(),
    };
    to_json(&result)
}
