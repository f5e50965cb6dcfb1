#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "server")]
pub mod debounce;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod files;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod letter;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{build_capabilities, run};

#[cfg(feature = "server")]
mod server {
    use std::sync::Arc;

    use actix_cors::Cors;
    use actix_web::{App, HttpServer, middleware, web};

    use crate::files::{Capabilities, FileSystem, LocalFileSystem, UnavailableFileSystem};
    use crate::letter::pdf::{LetterRenderer, PdfLetterRenderer};
    use crate::models::config::{Platform, ServerConfig};
    use crate::routes;
    use crate::services::clients::open_client_store;

    /// Selects the store and file system for the configured platform.
    pub fn build_capabilities(server_config: &ServerConfig) -> Capabilities {
        let store = open_client_store(server_config);

        let files: Arc<dyn FileSystem> = match server_config.platform {
            Platform::Desktop => {
                let root = server_config.documents_root();
                log::info!("Letters are stored under {}", root.display());
                Arc::new(LocalFileSystem::new(root))
            }
            Platform::Web => Arc::new(UnavailableFileSystem),
        };

        Capabilities::new(
            store,
            files,
            server_config.platform,
            &server_config.letters_folder,
        )
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let caps = web::Data::new(build_capabilities(&server_config));

        let renderer: Arc<dyn LetterRenderer> =
            Arc::new(PdfLetterRenderer::new(server_config.fonts.clone()));
        let renderer = web::Data::from(renderer);

        let bind_address = (server_config.address.clone(), server_config.port);
        let server_config = web::Data::new(server_config);

        log::info!(
            "Starting {} server on {}:{}",
            server_config.platform,
            bind_address.0,
            bind_address.1
        );

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .configure(routes::configure)
                .app_data(caps.clone())
                .app_data(renderer.clone())
                .app_data(server_config.clone())
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
