//! JSON HTTP surface.

use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::services::{ServiceError, ServiceResult};

pub mod clients;
pub mod documents;
pub mod settings;
pub mod suitability;

/// Registers every route on the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(clients::list_clients)
        .service(clients::import_clients)
        .service(clients::create_client)
        .service(clients::show_client)
        .service(clients::update_client)
        .service(clients::delete_client)
        .service(suitability::validate)
        .service(suitability::preview)
        .service(suitability::letter)
        .service(documents::list_documents)
        .service(documents::show_document)
        .service(documents::delete_document)
        .service(settings::show_settings);
}

/// Runs store, file system and render work off the async executor.
pub(crate) async fn run_blocking<F, T>(work: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(work).await.map_err(|err| {
        log::error!("Blocking task failed: {err}");
        ServiceError::Internal(err.to_string())
    })?
}

/// Maps a service failure onto a JSON error response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({ "error": "Not found" })),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        ServiceError::Validation(errors) => HttpResponse::UnprocessableEntity().json(json!({
            "error": "Please fix the highlighted fields",
            "errors": errors,
        })),
        ServiceError::Import(rows) => HttpResponse::UnprocessableEntity().json(json!({
            "error": format!("{} rows could not be imported", rows.len()),
            "rows": rows,
        })),
        ServiceError::Declined(prompt) => HttpResponse::Conflict().json(json!({
            "error": "Confirmation required",
            "prompt": prompt,
        })),
        ServiceError::Unavailable(message) => {
            HttpResponse::NotImplemented().json(json!({ "error": message }))
        }
        ServiceError::Cancelled => HttpResponse::ServiceUnavailable().finish(),
        ServiceError::Repository(err) => {
            log::error!("Store error: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
        ServiceError::Internal(message) => {
            log::error!("Internal error: {message}");
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;
    use crate::domain::suitability::FormErrors;

    #[test]
    fn errors_map_to_statuses() {
        let cases = [
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Form("bad".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::Validation(Box::new(FormErrors::empty(1))),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ServiceError::Import(vec![]), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::Declined("sure?".into()), StatusCode::CONFLICT),
            (ServiceError::Unavailable("web".into()), StatusCode::NOT_IMPLEMENTED),
            (ServiceError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(error_response(err).status(), status);
        }
    }
}
