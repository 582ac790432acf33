mod configuration;
mod decorations;
mod folder_icons;
mod lifecycle;
mod notifications;
mod settings;

pub use configuration::*;
pub use decorations::*;
pub use folder_icons::*;
pub use lifecycle::*;
pub use notifications::*;
pub use settings::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tower_lsp::jsonrpc::{Error, ErrorCode, Result};
use tower_lsp::lsp_types::ExecuteCommandParams;

pub(crate) fn internal_error(message: String) -> Error {
    Error {
        code: ErrorCode::InternalError,
        message: message.into(),
        data: None,
    }
}

/// Deserialize the first command argument
pub(crate) fn command_args<T: DeserializeOwned>(params: &ExecuteCommandParams) -> Result<T> {
    let first_arg = params
        .arguments
        .first()
        .ok_or_else(|| Error::invalid_params("Missing params"))?;
    serde_json::from_value(first_arg.clone())
        .map_err(|e| Error::invalid_params(format!("Invalid params: {}", e)))
}

pub(crate) fn to_json<T: Serialize>(result: &T) -> Result<Option<serde_json::Value>> {
    serde_json::to_value(result)
        .map(Some)
        .map_err(|e| internal_error(format!("Failed to serialize results: {}", e)))
}
