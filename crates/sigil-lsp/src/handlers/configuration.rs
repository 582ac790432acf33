use super::apply_settings;
use crate::state::GlobalState;
use sigil_core::IconSettings;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

pub async fn handle_did_change_configuration(
    client: &Client,
    state: &GlobalState,
    params: DidChangeConfigurationParams,
) {
    client
        .log_message(MessageType::INFO, "⚙️ Configuration changed")
        .await;

    // Settings arrive under the "sigil" section
    let Some(section) = params.settings.get("sigil").cloned() else {
        return;
    };

    match IconSettings::load_value(section) {
        Ok((settings, migration)) => {
            if !migration.is_empty() {
                log::info!(
                    "Client settings used a legacy shape ({} entries upgraded)",
                    migration.upgraded.len()
                );
            }
            apply_settings(client, state, settings).await;
            client
                .log_message(MessageType::INFO, "✅ Settings updated successfully")
                .await;
        }
        Err(e) => {
            client
                .log_message(
                    MessageType::ERROR,
                    format!("❌ Failed to parse updated settings: {}", e),
                )
                .await;
        }
    }
}
