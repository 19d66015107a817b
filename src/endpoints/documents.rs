use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::models::document;
use crate::models::prelude::*;
use crate::state::AppState;
use super::extractors::AppPath;

/// Create document upload and listing routes
pub fn document_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/documents/upload",
            post(upload_document).layer(DefaultBodyLimit::max(CONFIG.storage.max_upload_bytes)),
        )
        .route("/applications/{application_id}/documents", get(list_documents))
        .with_state(state)
}

#[derive(Default)]
struct UploadForm {
    application_id: Option<i64>,
    student_id: Option<i64>,
    document_type: Option<String>,
    file: Option<(String, Vec<u8>)>,
}

/// Upload a supporting document for an application
async fn upload_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<document::Model>)> {
    let form = read_form(multipart).await?;

    let application_id = form
        .application_id
        .ok_or_else(|| AppError::Validation("application_id is required".to_string()))?;
    let student_id = form
        .student_id
        .ok_or_else(|| AppError::Validation("student_id is required".to_string()))?;
    let (file_name, bytes) = form
        .file
        .ok_or_else(|| AppError::Validation("file is required".to_string()))?;

    let application = Application::find_by_id(application_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
    if application.student_id != student_id {
        return Err(AppError::Forbidden(
            "Application belongs to another student".to_string(),
        ));
    }

    let stored = state.documents.save(&file_name, &bytes).await?;

    let inserted = document::ActiveModel {
        application_id: Set(application_id),
        student_id: Set(student_id),
        document_type: Set(form.document_type),
        file_name: Set(file_name),
        file_path: Set(stored.public_path.clone()),
        uploaded_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await;

    let saved = match inserted {
        Ok(saved) => saved,
        Err(e) => {
            state.documents.remove_all(&[stored.public_path]).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        "Stored document {} for application {} at {}",
        saved.id,
        application_id,
        saved.file_path
    );

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Documents attached to an application, oldest first
async fn list_documents(
    State(state): State<AppState>,
    AppPath(application_id): AppPath<i64>,
) -> Result<Json<Vec<document::Model>>> {
    Application::find_by_id(application_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    let documents = Document::find()
        .filter(document::Column::ApplicationId.eq(application_id))
        .order_by_asc(document::Column::UploadedAt)
        .order_by_asc(document::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(documents))
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "application_id" => {
                form.application_id = Some(parse_id("application_id", &field.text().await?)?);
            }
            "student_id" => {
                form.student_id = Some(parse_id("student_id", &field.text().await?)?);
            }
            "document_type" => {
                let value = field.text().await?;
                form.document_type = Some(value.trim().to_string()).filter(|v| !v.is_empty());
            }
            "file" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::Validation("file must have a file name".to_string()))?;
                let bytes = field.bytes().await?;
                form.file = Some((file_name, bytes.to_vec()));
            }
            other => tracing::debug!("Ignoring unknown upload field '{}'", other),
        }
    }

    Ok(form)
}

fn parse_id(field: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be a number", field)))
}
