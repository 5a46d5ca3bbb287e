use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::CurrentUser,
    error::AppError,
    state::AppState,
    tasks::{
        dto::{AddTaskForm, EditTaskForm},
        repo,
    },
    views,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks))
        .route("/add", get(add_page))
        .route("/add", post(add_task))
        .route("/delete/:id", get(delete_task))
        .route("/update/:id", get(edit_page))
        .route("/update/:id", post(update_task))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn list_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, AppError> {
    let tasks = repo::list_all(&state.db).await?;
    Ok(Html(views::render_tasks(&tasks, &user.0)))
}

pub async fn add_page(_user: CurrentUser) -> Html<String> {
    Html(views::render_add(None))
}

#[instrument(skip(state, user, form), fields(user_id = %user.0.id))]
pub async fn add_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<AddTaskForm>,
) -> Result<Redirect, AppError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Ok(Redirect::to("/add"));
    }
    let task = repo::create(&state.db, &user.0, title, form.description.trim()).await?;
    info!(task_id = %task.id, "task created");
    Ok(Redirect::to("/"))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn edit_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let task = repo::find_owned(&state.db, id, user.0.id)
        .await?
        .ok_or(AppError::NotOwnedOrMissing)?;
    Ok(Html(views::render_edit(&task)))
}

#[instrument(skip(state, user, form), fields(user_id = %user.0.id))]
pub async fn update_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Form(form): Form<EditTaskForm>,
) -> Result<Redirect, AppError> {
    repo::update_owned(&state.db, id, user.0.id, form.title.trim(), &form.description).await?;
    info!(task_id = %id, "task updated");
    Ok(Redirect::to("/"))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn delete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    repo::delete_owned(&state.db, id, user.0.id).await?;
    info!(task_id = %id, "task deleted");
    Ok(Redirect::to("/"))
}
