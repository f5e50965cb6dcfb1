use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, post, web};
use chrono::Local;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::domain::suitability::SuitabilityFormState;
use crate::dto::suitability::{LetterDelivery, SavedLetter};
use crate::files::{Capabilities, PresetAnswer};
use crate::letter::pdf::LetterRenderer;
use crate::models::config::ServerConfig;
use crate::routes::{error_response, run_blocking};
use crate::services::suitability::{generate_letter, preview_letter, validate_suitability};

#[derive(Deserialize)]
struct OverwriteParams {
    #[serde(default)]
    overwrite: bool,
}

#[post("/suitability/validate")]
pub async fn validate(web::Json(form): web::Json<SuitabilityFormState>) -> impl Responder {
    HttpResponse::Ok().json(validate_suitability(form))
}

#[post("/suitability/preview")]
pub async fn preview(
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SuitabilityFormState>,
) -> impl Responder {
    match preview_letter(&form, &server_config.firm) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(err) => error_response(err),
    }
}

/// Generates the PDF. The web platform receives it as a download; the
/// desktop writes it to the letters folder and replies with its location.
/// Dropping the request cancels generation before anything is written.
#[post("/suitability/letter")]
pub async fn letter(
    params: web::Query<OverwriteParams>,
    caps: web::Data<Capabilities>,
    renderer: web::Data<dyn LetterRenderer>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<SuitabilityFormState>,
) -> impl Responder {
    let token = CancellationToken::new();
    let _guard = token.clone().drop_guard();

    let caps = caps.into_inner();
    let renderer = renderer.into_inner();
    let server_config = server_config.into_inner();
    let dialog = PresetAnswer(params.overwrite);
    let issued_at = Local::now().naive_local();

    let result = run_blocking(move || {
        generate_letter(
            &caps,
            renderer.as_ref(),
            &dialog,
            &server_config.firm,
            &form,
            issued_at,
            &token,
        )
    })
    .await;

    match result {
        Ok(LetterDelivery::Download { file_name, bytes }) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(file_name)],
            })
            .body(bytes),
        Ok(LetterDelivery::Saved { file_name, path }) => HttpResponse::Created().json(SavedLetter {
            file_name,
            path: path.display().to_string(),
        }),
        Err(err) => error_response(err),
    }
}
