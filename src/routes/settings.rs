use actix_web::{HttpResponse, Responder, get, web};

use crate::models::config::ServerConfig;
use crate::services::settings::app_settings;

#[get("/settings")]
pub async fn show_settings(server_config: web::Data<ServerConfig>) -> impl Responder {
    HttpResponse::Ok().json(app_settings(&server_config))
}
