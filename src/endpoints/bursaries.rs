use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::AdminUser;
use crate::models::{application, bursary, document, status_update};
use crate::models::prelude::*;
use crate::schemas::{BursaryListParams, CreateBursary, UpdateBursary};
use crate::state::AppState;
use super::extractors::{AppJson, AppPath, AppQuery};

/// Create bursary routes; reads are public, writes need an admin token
pub fn bursary_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_bursaries).post(create_bursary))
        .route(
            "/{bursary_id}",
            get(get_bursary).put(update_bursary).delete(delete_bursary),
        )
        .with_state(state)
}

/// List bursaries, soonest deadline first
async fn list_bursaries(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<BursaryListParams>,
) -> Result<Json<Vec<bursary::Model>>> {
    let mut query = Bursary::find();
    if let Some(search) = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        query = query.filter(bursary::Column::Title.contains(search));
    }

    let bursaries = query
        .order_by_asc(bursary::Column::Deadline)
        .order_by_asc(bursary::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(bursaries))
}

/// Get a bursary by ID
async fn get_bursary(
    State(state): State<AppState>,
    AppPath(bursary_id): AppPath<i64>,
) -> Result<Json<bursary::Model>> {
    Ok(Json(find_bursary(&state, bursary_id).await?))
}

/// Create a bursary
async fn create_bursary(
    State(state): State<AppState>,
    admin: AdminUser,
    AppJson(req): AppJson<CreateBursary>,
) -> Result<(StatusCode, Json<bursary::Model>)> {
    req.validate()?;

    let created = bursary::ActiveModel {
        title: Set(req.title.trim().to_string()),
        description: Set(req.description),
        provider: Set(req.provider),
        amount: Set(req.amount),
        deadline: Set(req.deadline),
        created_by: Set(Some(admin.id())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!("Admin {} created bursary {} '{}'", admin.id(), created.id, created.title);

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a bursary; omitted fields are left unchanged
async fn update_bursary(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(bursary_id): AppPath<i64>,
    AppJson(req): AppJson<UpdateBursary>,
) -> Result<Json<bursary::Model>> {
    req.validate()?;

    let existing = find_bursary(&state, bursary_id).await?;
    let mut active: bursary::ActiveModel = existing.into();

    if let Some(title) = req.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = req.description {
        active.description = Set(Some(description));
    }
    if let Some(provider) = req.provider {
        active.provider = Set(Some(provider));
    }
    if let Some(amount) = req.amount {
        active.amount = Set(Some(amount));
    }
    if let Some(deadline) = req.deadline {
        active.deadline = Set(Some(deadline));
    }

    let updated = active.update(&state.db).await?;
    tracing::info!("Admin {} updated bursary {}", admin.id(), updated.id);

    Ok(Json(updated))
}

/// Delete a bursary along with its applications and their documents
async fn delete_bursary(
    State(state): State<AppState>,
    admin: AdminUser,
    AppPath(bursary_id): AppPath<i64>,
) -> Result<StatusCode> {
    let txn = state.db.begin().await?;

    let application_ids: Vec<i64> = Application::find()
        .filter(application::Column::BursaryId.eq(bursary_id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect();

    let removed_files: Vec<String> = Document::find()
        .filter(document::Column::ApplicationId.is_in(application_ids.clone()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|d| d.file_path)
        .collect();

    Document::delete_many()
        .filter(document::Column::ApplicationId.is_in(application_ids.clone()))
        .exec(&txn)
        .await?;
    StatusUpdate::delete_many()
        .filter(status_update::Column::ApplicationId.is_in(application_ids.clone()))
        .exec(&txn)
        .await?;
    Application::delete_many()
        .filter(application::Column::BursaryId.eq(bursary_id))
        .exec(&txn)
        .await?;

    let result = Bursary::delete_by_id(bursary_id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Bursary not found".to_string()));
    }

    txn.commit().await?;
    state.documents.remove_all(&removed_files).await;

    tracing::info!(
        "Admin {} deleted bursary {} with {} application(s)",
        admin.id(),
        bursary_id,
        application_ids.len()
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn find_bursary(state: &AppState, bursary_id: i64) -> Result<bursary::Model> {
    Bursary::find_by_id(bursary_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bursary not found".to_string()))
}
