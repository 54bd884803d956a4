use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::db::UserStore;
use crate::errors::AppError;
use crate::models::user::User;
use crate::models::MessageResponse;
use crate::utils::multipart::{read_form, resolve_content_type};
use crate::utils::s3::{object_key, ObjectStore};
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
struct NewUser {
    #[validate(length(min = 1))]
    name: String,
    #[validate(email)]
    email: String,
}

/// POST /api/users — multipart form with `name`, `email` and a `profilePicture`
/// attachment. The picture is written to the store before the row is inserted;
/// if the insert fails the blob stays behind as an orphan.
pub async fn create_user(
    payload: Multipart,
    store: web::Data<dyn ObjectStore>,
    users: web::Data<dyn UserStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let form = read_form(payload).await?;

    let name = form.text.get("name").cloned().unwrap_or_default();
    let email = form.text.get("email").cloned().unwrap_or_default();
    let picture = match form.file {
        Some(picture) if !name.is_empty() && !email.is_empty() => picture,
        _ => return Err(AppError::Validation("Missing required fields".to_string()).into()),
    };
    validate_payload(&NewUser {
        name: name.clone(),
        email: email.clone(),
    })?;

    let key = object_key("profile-pictures", &picture.filename);
    let content_type = resolve_content_type(&picture.content_type, &picture.data);
    store.put(&key, picture.data, &content_type).await?;

    // Profile pictures are treated as permanently public, no presigning.
    let url = store.public_url(&key);
    let record = users.create(&name, &email, &url, &key).await?;

    Ok(HttpResponse::Created().json(User::from(record)))
}

/// GET /api/users — every record verbatim, storage order.
pub async fn list_users(users: web::Data<dyn UserStore>) -> Result<HttpResponse, actix_web::Error> {
    let records = users.list().await?;
    let users: Vec<User> = records.into_iter().map(User::from).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// DELETE /api/users/{id} — removes the row, then best-effort deletes the
/// stored picture. A failed blob delete is logged but does not change the
/// response, the record is already gone.
pub async fn delete_user(
    path: web::Path<i32>,
    store: web::Data<dyn ObjectStore>,
    users: web::Data<dyn UserStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = path.into_inner();

    let record = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    users.delete(id).await?;

    if !record.profile_picture_key.is_empty() {
        if let Err(err) = store.delete(&record.profile_picture_key).await {
            log::warn!(
                "Failed to delete profile picture {}: {}",
                record.profile_picture_key,
                err
            );
        }
    }

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
