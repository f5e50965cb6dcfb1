use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, web};
use serde::Deserialize;

use crate::files::{Capabilities, PresetAnswer};
use crate::routes::{error_response, run_blocking};
use crate::services::documents;

#[derive(Deserialize)]
struct ConfirmParams {
    #[serde(default)]
    confirm: bool,
}

#[get("/documents")]
pub async fn list_documents(caps: web::Data<Capabilities>) -> impl Responder {
    let caps = caps.into_inner();

    match run_blocking(move || documents::list_documents(&caps)).await {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(err) => error_response(err),
    }
}

/// Streams a stored letter to the viewer.
#[get("/documents/{name}")]
pub async fn show_document(
    req: HttpRequest,
    name: web::Path<String>,
    caps: web::Data<Capabilities>,
) -> HttpResponse {
    let caps = caps.into_inner();
    let name = name.into_inner();

    let path = match run_blocking(move || documents::open_document(&caps, &name)).await {
        Ok(path) => path,
        Err(err) => return error_response(err),
    };

    match NamedFile::open_async(&path).await {
        Ok(file) => file.into_response(&req),
        Err(err) => {
            log::error!("Failed to open {}: {err}", path.display());
            error_response(err.into())
        }
    }
}

#[delete("/documents/{name}")]
pub async fn delete_document(
    name: web::Path<String>,
    params: web::Query<ConfirmParams>,
    caps: web::Data<Capabilities>,
) -> impl Responder {
    let caps = caps.into_inner();
    let name = name.into_inner();
    let dialog = PresetAnswer(params.confirm);

    match run_blocking(move || documents::delete_document(&caps, &dialog, &name)).await {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(err) => error_response(err),
    }
}
