use actix_web::{web, HttpResponse, Responder, ResponseError};
use serde_json::json;

use crate::{api::state::AppState, domain::pet::model::{PetCreateReceive, PetPatchReceive}};

pub async fn list_pets(
    state: web::Data<AppState>
) -> impl Responder {
    match state.pets.list().await {
        Ok(pets) => HttpResponse::Ok().json(pets),
        Err(e) => e.error_response()
    }
}

pub async fn get_pet(
    state: web::Data<AppState>,
    pet_id: web::Path<String>
) -> impl Responder {
    match state.pets.get(&pet_id).await {
        Ok(pet) => HttpResponse::Ok().json(pet),
        Err(e) => e.error_response()
    }
}

pub async fn create_pet(
    state: web::Data<AppState>,
    pet: web::Json<PetCreateReceive>
) -> impl Responder {
    match state.pets.create(pet.into_inner()).await {
        Ok(pet) => HttpResponse::Created().json(pet),
        Err(e) => e.error_response()
    }
}

pub async fn update_pet(
    state: web::Data<AppState>,
    pet_id: web::Path<String>,
    patch: web::Json<PetPatchReceive>
) -> impl Responder {
    match state.pets.update(&pet_id, patch.into_inner()).await {
        Ok(pet) => HttpResponse::Ok().json(pet),
        Err(e) => e.error_response()
    }
}

pub async fn delete_pet(
    state: web::Data<AppState>,
    pet_id: web::Path<String>
) -> impl Responder {
    match state.pets.delete(&pet_id).await {
        Ok(deleted) => HttpResponse::Ok().json(json!({ "ok": true, "deleted": deleted })),
        Err(e) => e.error_response()
    }
}
