use crate::state::{GlobalState, SETTINGS_FILE};
use sigil_core::{IconSettings, LogLevel, NamedGlyphCatalog, SettingsError};
use std::ffi::OsStr;
use std::path::Path;
use tower_lsp::lsp_types::MessageType;
use tower_lsp::Client;

pub fn level_filter(level: LogLevel) -> log::LevelFilter {
    match level {
        LogLevel::Trace => log::LevelFilter::Trace,
        LogLevel::Debug => log::LevelFilter::Debug,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Warning => log::LevelFilter::Warn,
        LogLevel::Error => log::LevelFilter::Error,
    }
}

/// Level cap for the `logLevel` setting, or None when `RUST_LOG` owns filtering
pub fn settings_log_cap(level: LogLevel, rust_log: Option<&OsStr>) -> Option<log::LevelFilter> {
    match rust_log {
        Some(_) => None,
        None => Some(level_filter(level)),
    }
}

/// Read `sigil.yml` under `root`.
///
/// A missing file yields the defaults. An unreadable or invalid file yields
/// None so the caller keeps whatever settings it has. Files in an older
/// shape are rewritten in the current one.
pub async fn load_settings_file(
    client: &Client,
    state: &GlobalState,
    root: &Path,
) -> Option<IconSettings> {
    let path = root.join(SETTINGS_FILE);
    let loaded = match state.fs.read_to_string(&path) {
        Ok(content) => IconSettings::load_yaml(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No settings file at {:?}, using defaults", path);
            return Some(IconSettings::default());
        }
        Err(e) => Err(SettingsError::from(e)),
    };

    match loaded {
        Ok((settings, migration)) => {
            if !migration.is_empty() {
                log::info!(
                    "Upgrading settings file: {} legacy entries, {} renamed keys, {} blank icons dropped",
                    migration.upgraded.len(),
                    migration.normalized.len(),
                    migration.dropped.len()
                );
                if let Err(e) = write_settings(state, &path, &settings) {
                    log::warn!("Failed to rewrite upgraded settings: {}", e);
                }
            }
            Some(settings)
        }
        Err(e) => {
            log::warn!("Failed to load {:?}: {}", path, e);
            client
                .log_message(
                    MessageType::ERROR,
                    format!("❌ Failed to load {}: {}", SETTINGS_FILE, e),
                )
                .await;
            None
        }
    }
}

/// Install `settings`: log level, glyph catalog, then the settings themselves
pub async fn apply_settings(client: &Client, state: &GlobalState, settings: IconSettings) {
    let rust_log = std::env::var_os(env_logger::DEFAULT_FILTER_ENV);
    if let Some(cap) = settings_log_cap(settings.log_level, rust_log.as_deref()) {
        log::set_max_level(cap);
    }
    reload_glyphs(client, state, &settings).await;

    let mut settings_lock = state.settings.write().await;
    *settings_lock = settings;
}

async fn reload_glyphs(client: &Client, state: &GlobalState, settings: &IconSettings) {
    let root = state.root.read().await.clone();
    let catalog = match (&settings.glyph_catalog, root) {
        (Some(relative), Some(root)) => {
            let path = root.join(relative);
            match NamedGlyphCatalog::load(&path, &*state.fs) {
                Ok(catalog) => {
                    log::info!("Loaded {} glyphs from {:?}", catalog.len(), path);
                    Some(catalog)
                }
                Err(e) => {
                    client
                        .log_message(
                            MessageType::WARNING,
                            format!("Glyph catalog {:?} unavailable: {}", path, e),
                        )
                        .await;
                    None
                }
            }
        }
        _ => None,
    };

    let mut glyphs = state.glyphs.write().await;
    *glyphs = catalog;
}

fn write_settings(
    state: &GlobalState,
    path: &Path,
    settings: &IconSettings,
) -> Result<(), SettingsError> {
    let yaml = settings.to_yaml()?;
    state.fs.write_string(path, &yaml)?;
    Ok(())
}

/// Write the current settings to `sigil.yml`. Returns whether it succeeded.
pub async fn persist_settings(client: &Client, state: &GlobalState) -> bool {
    let Some(path) = state.settings_path().await else {
        log::debug!("No workspace root, settings kept in memory only");
        return false;
    };

    let result = {
        let settings = state.settings.read().await;
        write_settings(state, &path, &settings)
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to persist settings to {:?}: {}", path, e);
            client
                .log_message(
                    MessageType::ERROR,
                    format!("❌ Failed to save {}: {}", SETTINGS_FILE, e),
                )
                .await;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_log_cap_defers_to_rust_log() {
        assert_eq!(
            settings_log_cap(LogLevel::Warning, None),
            Some(log::LevelFilter::Warn)
        );
        assert_eq!(
            settings_log_cap(LogLevel::Trace, None),
            Some(log::LevelFilter::Trace)
        );
        assert_eq!(
            settings_log_cap(LogLevel::Error, Some(OsStr::new("sigil=debug"))),
            None
        );
    }
}
