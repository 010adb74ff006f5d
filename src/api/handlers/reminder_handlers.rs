use actix_web::{web, HttpResponse, Responder, ResponseError};
use serde::Deserialize;
use serde_json::json;

use crate::{api::state::AppState, domain::reminder::model::{ReminderCreateReceive, ReminderPatchReceive}};

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReminderListQuery {
    pub pet_id: Option<String>,
}

pub async fn list_reminders(
    state: web::Data<AppState>,
    query: web::Query<ReminderListQuery>
) -> impl Responder {
    match state.reminders.list(query.pet_id.as_deref()).await {
        Ok(reminders) => HttpResponse::Ok().json(reminders),
        Err(e) => e.error_response()
    }
}

/// `GET /pets/{pet_id}/reminders`
pub async fn list_pet_reminders(
    state: web::Data<AppState>,
    pet_id: web::Path<String>
) -> impl Responder {
    match state.reminders.list(Some(pet_id.as_str())).await {
        Ok(reminders) => HttpResponse::Ok().json(reminders),
        Err(e) => e.error_response()
    }
}

pub async fn get_reminder(
    state: web::Data<AppState>,
    reminder_id: web::Path<String>
) -> impl Responder {
    match state.reminders.get(&reminder_id).await {
        Ok(reminder) => HttpResponse::Ok().json(reminder),
        Err(e) => e.error_response()
    }
}

pub async fn create_reminder(
    state: web::Data<AppState>,
    reminder: web::Json<ReminderCreateReceive>
) -> impl Responder {
    match state.reminders.create(reminder.into_inner()).await {
        Ok(reminder) => HttpResponse::Created().json(reminder),
        Err(e) => e.error_response()
    }
}

pub async fn update_reminder(
    state: web::Data<AppState>,
    reminder_id: web::Path<String>,
    patch: web::Json<ReminderPatchReceive>
) -> impl Responder {
    match state.reminders.update(&reminder_id, patch.into_inner()).await {
        Ok(reminder) => HttpResponse::Ok().json(reminder),
        Err(e) => e.error_response()
    }
}

pub async fn delete_reminder(
    state: web::Data<AppState>,
    reminder_id: web::Path<String>
) -> impl Responder {
    match state.reminders.delete(&reminder_id).await {
        Ok(deleted) => HttpResponse::Ok().json(json!({ "ok": true, "deleted": deleted })),
        Err(e) => e.error_response()
    }
}
