use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Widget {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
pub struct NewWidget {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
pub struct WidgetPatch {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
}

pub struct Store {
    widgets: RwLock<BTreeMap<u64, Widget>>,
    next_id: AtomicU64,
}

pub type Db = Arc<Store>;

/// How long `/faults/slow` waits before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(5);

pub fn app() -> Router {
    let db: Db = Arc::new(Store {
        widgets: RwLock::new(BTreeMap::new()),
        next_id: AtomicU64::new(1),
    });
    Router::new()
        .route("/widgets", get(list_widgets).post(create_widget))
        .route(
            "/widgets/{id}",
            get(get_widget)
                .put(replace_widget)
                .patch(patch_widget)
                .delete(delete_widget),
        )
        .route("/faults/extra", get(extra_fields))
        .route("/faults/malformed", any(malformed))
        .route("/faults/empty", any(empty))
        .route("/faults/slow", any(slow))
        .route("/faults/status/{code}", any(status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_widgets(State(db): State<Db>) -> Json<Vec<Widget>> {
    let widgets = db.widgets.read().await;
    Json(widgets.values().cloned().collect())
}

async fn create_widget(
    State(db): State<Db>,
    Json(input): Json<NewWidget>,
) -> (StatusCode, Json<Widget>) {
    let widget = Widget {
        id: db.next_id.fetch_add(1, Ordering::Relaxed),
        name: input.name,
        tags: input.tags,
    };
    debug!(id = widget.id, "created widget");
    db.widgets.write().await.insert(widget.id, widget.clone());
    (StatusCode::CREATED, Json(widget))
}

async fn get_widget(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Widget>, StatusCode> {
    let widgets = db.widgets.read().await;
    widgets.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_widget(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<NewWidget>,
) -> Result<Json<Widget>, StatusCode> {
    let mut widgets = db.widgets.write().await;
    let widget = widgets.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    widget.name = input.name;
    widget.tags = input.tags;
    Ok(Json(widget.clone()))
}

async fn patch_widget(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<WidgetPatch>,
) -> Result<Json<Widget>, StatusCode> {
    let mut widgets = db.widgets.write().await;
    let widget = widgets.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        widget.name = name;
    }
    if let Some(tags) = input.tags {
        widget.tags = tags;
    }
    Ok(Json(widget.clone()))
}

async fn delete_widget(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut widgets = db.widgets.write().await;
    widgets.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

// Canned responses for exercising client failure paths.

async fn extra_fields() -> Response {
    json_text(StatusCode::OK, r#"{"id":1,"name":"a","extra":"ignored"}"#)
}

async fn malformed() -> Response {
    json_text(StatusCode::OK, r#"{"id":1,"name":"#)
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

async fn slow() -> StatusCode {
    tokio::time::sleep(SLOW_DELAY).await;
    StatusCode::OK
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    json_text(status, r#"{"error":"requested status"}"#)
}

fn json_text(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
