//! Sigil LSP Server Binary Entry Point

use sigil_core::vfs::PhysicalFileSystem;
use sigil_lsp::create_lsp_service;
use std::sync::Arc;
use tower_lsp::Server;

#[tokio::main]
async fn main() {
    if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some() {
        env_logger::init();
    } else {
        // Without RUST_LOG, filtering follows the logLevel setting via log::set_max_level
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
            .init();
        log::set_max_level(log::LevelFilter::Info);
    }

    log::info!("Sigil LSP Server starting, listening on stdin/stdout");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_lsp_service(Arc::new(PhysicalFileSystem));
    log::info!("LSP service created, waiting for client connection");

    Server::new(stdin, stdout, socket).serve(service).await;
}
