use crate::date_key::DateKey;
use crate::errors::AppError;
use crate::models::{
    AddTaskRequest, ListResponse, MoveTaskRequest, ReorderRequest, SelectDateRequest, TaskId,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut guard = state.checklist.lock().await;
    let checklist = &mut *guard;
    checklist
        .session
        .select_date(&mut checklist.store, DateKey::today())
        .await?;
    Ok(Html(render_index(&checklist.snapshot())))
}

pub async fn add_task_form(
    State(state): State<AppState>,
    Form(payload): Form<AddTaskRequest>,
) -> Result<Redirect, AppError> {
    let mut guard = state.checklist.lock().await;
    let checklist = &mut *guard;
    checklist.session.add_task(&mut checklist.store, &payload.text).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<ListResponse>, AppError> {
    let mut guard = state.checklist.lock().await;
    let checklist = &mut *guard;
    checklist
        .session
        .select_date(&mut checklist.store, DateKey::today())
        .await?;
    Ok(Json(checklist.snapshot()))
}

pub async fn get_list(State(state): State<AppState>) -> Json<ListResponse> {
    let checklist = state.checklist.lock().await;
    Json(checklist.snapshot())
}

pub async fn get_dates(State(state): State<AppState>) -> Json<Vec<DateKey>> {
    let checklist = state.checklist.lock().await;
    Json(checklist.store.list_date_keys())
}

pub async fn select_date(
    State(state): State<AppState>,
    Json(payload): Json<SelectDateRequest>,
) -> Result<Json<ListResponse>, AppError> {
    let date = DateKey::new(&payload.date).ok_or_else(|| AppError::bad_request("date must not be blank"))?;

    let mut guard = state.checklist.lock().await;
    let checklist = &mut *guard;
    checklist.session.select_date(&mut checklist.store, date).await?;
    Ok(Json(checklist.snapshot()))
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<AddTaskRequest>,
) -> Result<Json<ListResponse>, AppError> {
    let mut guard = state.checklist.lock().await;
    let checklist = &mut *guard;
    checklist.session.add_task(&mut checklist.store, &payload.text).await?;
    Ok(Json(checklist.snapshot()))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<ListResponse>, AppError> {
    let mut guard = state.checklist.lock().await;
    let checklist = &mut *guard;
    checklist.session.toggle(&mut checklist.store, id).await?;
    Ok(Json(checklist.snapshot()))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<ListResponse>, AppError> {
    let mut guard = state.checklist.lock().await;
    let checklist = &mut *guard;
    checklist.session.delete(&mut checklist.store, id).await?;
    Ok(Json(checklist.snapshot()))
}

pub async fn move_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(payload): Json<MoveTaskRequest>,
) -> Result<Json<ListResponse>, AppError> {
    let mut guard = state.checklist.lock().await;
    let checklist = &mut *guard;
    checklist
        .session
        .move_task(&mut checklist.store, id, payload.to)
        .await?;
    Ok(Json(checklist.snapshot()))
}

pub async fn reorder(
    State(state): State<AppState>,
    Json(payload): Json<ReorderRequest>,
) -> Result<Json<ListResponse>, AppError> {
    let mut guard = state.checklist.lock().await;
    let checklist = &mut *guard;
    checklist
        .session
        .reorder_ids(&mut checklist.store, &payload.order)
        .await?;
    Ok(Json(checklist.snapshot()))
}
