use sigil_core::vfs::FileSystem;
use sigil_core::{IconSettings, NamedGlyphCatalog, VaultIndex};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::Url;

/// Settings file kept at the vault root
pub const SETTINGS_FILE: &str = "sigil.yml";

/// Global state for LSP server
/// Must be Send + Sync
#[derive(Clone)]
pub struct GlobalState {
    /// Vault root, set on initialize
    pub root: Arc<RwLock<Option<PathBuf>>>,
    /// RwLock-protected vault index
    /// Read operations (decorations) are concurrent
    /// Write operations (file events) are exclusive
    pub vault: Arc<RwLock<Option<VaultIndex>>>,
    pub settings: Arc<RwLock<IconSettings>>,
    pub glyphs: Arc<RwLock<Option<NamedGlyphCatalog>>>,
    /// Text of open documents, newer than what is on disk
    pub document_cache: Arc<RwLock<HashMap<Url, String>>>,
    pub fs: Arc<dyn FileSystem>,
}

impl GlobalState {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root: Arc::new(RwLock::new(None)),
            vault: Arc::new(RwLock::new(None)),
            settings: Arc::new(RwLock::new(IconSettings::default())),
            glyphs: Arc::new(RwLock::new(None)),
            document_cache: Arc::new(RwLock::new(HashMap::new())),
            fs,
        }
    }

    pub async fn settings_path(&self) -> Option<PathBuf> {
        self.root.read().await.as_ref().map(|r| r.join(SETTINGS_FILE))
    }
}
