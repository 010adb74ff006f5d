use actix_web::{web, Resource};

use crate::api::handlers::health_handlers::{health, not_found};
use crate::api::handlers::pet_handlers::{create_pet, delete_pet, get_pet, list_pets, update_pet};
use crate::api::handlers::reminder_handlers::{create_reminder, delete_reminder, get_reminder, list_pet_reminders, list_reminders, update_reminder};
use crate::utils::errors::ApiError;

pub const API_PREFIX: &str = "/api";

/// Extractor settings plus every route under [`API_PREFIX`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.app_data(query_config());
    cfg.service(web::scope(API_PREFIX).configure(api_routes));
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::ValidationError(format!("Invalid request body: {}", err)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::ValidationError(format!("Invalid query string: {}", err)).into()
    })
}

/// A resource whose unsupported methods answer with the JSON 404 instead of
/// an empty 405.
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(not_found))
}

fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        resource("/health")
            .route(web::get().to(health))
    );

    cfg.service(
        resource("/pets")
            .route(web::get().to(list_pets))
            .route(web::post().to(create_pet))
    );

    cfg.service(
        resource("/pets/{pet_id}")
            .route(web::get().to(get_pet))
            .route(web::patch().to(update_pet))
            .route(web::delete().to(delete_pet))
    );

    cfg.service(
        resource("/pets/{pet_id}/reminders")
            .route(web::get().to(list_pet_reminders))
    );

    cfg.service(
        resource("/reminders")
            .route(web::get().to(list_reminders))
            .route(web::post().to(create_reminder))
    );

    cfg.service(
        resource("/reminders/{reminder_id}")
            .route(web::get().to(get_reminder))
            .route(web::patch().to(update_reminder))
            .route(web::delete().to(delete_reminder))
    );
}
