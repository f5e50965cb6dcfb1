use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use chrono::Utc;
use serde::Deserialize;

use crate::dto::client::ImportSummary;
use crate::files::{Capabilities, PresetAnswer};
use crate::forms::client::{AddClientForm, SaveClientForm};
use crate::forms::import::ImportClientsForm;
use crate::routes::{error_response, run_blocking};
use crate::services::{ServiceError, clients, import};

#[derive(Deserialize)]
struct ClientsQueryParams {
    search: Option<String>,
}

#[derive(Deserialize)]
struct ConfirmParams {
    #[serde(default)]
    confirm: bool,
}

#[get("/clients")]
pub async fn list_clients(
    params: web::Query<ClientsQueryParams>,
    caps: web::Data<Capabilities>,
) -> impl Responder {
    let store = caps.store.clone();
    let search = params.into_inner().search;

    match run_blocking(move || clients::list_clients(store.as_ref(), search.as_deref())).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(err) => error_response(err),
    }
}

#[get("/clients/{client_id}")]
pub async fn show_client(
    client_id: web::Path<String>,
    caps: web::Data<Capabilities>,
) -> impl Responder {
    let store = caps.store.clone();
    let client_id = client_id.into_inner();

    match run_blocking(move || clients::get_client(store.as_ref(), &client_id)).await {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(err) => error_response(err),
    }
}

#[post("/clients")]
pub async fn create_client(
    caps: web::Data<Capabilities>,
    web::Json(form): web::Json<AddClientForm>,
) -> impl Responder {
    let store = caps.store.clone();

    match run_blocking(move || clients::create_client(store.as_ref(), form)).await {
        Ok(client) => HttpResponse::Created().json(client),
        Err(err) => error_response(err),
    }
}

#[put("/clients/{client_id}")]
pub async fn update_client(
    client_id: web::Path<String>,
    caps: web::Data<Capabilities>,
    web::Json(form): web::Json<SaveClientForm>,
) -> impl Responder {
    let store = caps.store.clone();
    let client_id = client_id.into_inner();

    match run_blocking(move || clients::update_client(store.as_ref(), &client_id, form)).await {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(err) => error_response(err),
    }
}

#[delete("/clients/{client_id}")]
pub async fn delete_client(
    client_id: web::Path<String>,
    caps: web::Data<Capabilities>,
) -> impl Responder {
    let store = caps.store.clone();
    let client_id = client_id.into_inner();

    match run_blocking(move || clients::delete_client(store.as_ref(), &client_id)).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

/// Replaces the whole store with the uploaded CSV. Without `confirm=true`
/// nothing is written and the confirmation prompt is returned with 409.
#[post("/clients/import")]
pub async fn import_clients(
    params: web::Query<ConfirmParams>,
    caps: web::Data<Capabilities>,
    MultipartForm(form): MultipartForm<ImportClientsForm>,
) -> impl Responder {
    let store = caps.store.clone();
    let dialog = PresetAnswer(params.confirm);

    let result = run_blocking(move || {
        let new_clients = form.parse(Utc::now()).map_err(ServiceError::from)?;
        import::import_clients(store.as_ref(), &dialog, &new_clients)
    })
    .await;

    match result {
        Ok(imported) => HttpResponse::Ok().json(ImportSummary { imported }),
        Err(err) => error_response(err),
    }
}
