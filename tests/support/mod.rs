//! 結合テスト用の推論APIモックと記録用View

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tumor_ai_common::{
    ActionState, AnnotatedImage, ClassificationDisplay, ConnectivityStatus, DrawingSurface,
    StagedImage, Variant, View,
};

/// モックが受け取ったアップロード
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub path: String,
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

pub type Uploads = Arc<Mutex<Vec<Upload>>>;

/// 各エンドポイントの応答
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Ok,
    ServerError,
}

#[derive(Clone)]
struct MockState {
    uploads: Uploads,
    classify: Mode,
    detect: Mode,
    segment: Mode,
    health: Mode,
}

pub struct MockApi {
    pub base_url: String,
    pub uploads: Uploads,
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image::RgbImage::new(width, height)
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("PNG書き込み失敗");
    buf.into_inner()
}

async fn record(state: &MockState, path: &str, mut multipart: Multipart) -> Result<(), StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let upload = Upload {
            path: path.to_string(),
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            size: 0,
        };
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        state
            .uploads
            .lock()
            .unwrap()
            .push(Upload { size: bytes.len(), ..upload });
    }
    Ok(())
}

fn server_error(detail: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": detail })),
    )
        .into_response()
}

fn annotated_png() -> Response {
    ([(header::CONTENT_TYPE, "image/png")], png_bytes(4, 4)).into_response()
}

async fn health(State(state): State<MockState>) -> Response {
    match state.health {
        Mode::Ok => Json(json!({ "message": "Brain Tumor Detection API is running" })).into_response(),
        Mode::ServerError => server_error("down"),
    }
}

async fn predict_vgg(State(state): State<MockState>, multipart: Multipart) -> Response {
    if let Err(status) = record(&state, "/predict_vgg", multipart).await {
        return status.into_response();
    }
    match state.classify {
        Mode::Ok => Json(json!({ "prediction": "cat", "confidence": 0.92 })).into_response(),
        Mode::ServerError => server_error("VGG prediction failed"),
    }
}

async fn detect_yolo(State(state): State<MockState>, multipart: Multipart) -> Response {
    if let Err(status) = record(&state, "/detect_yolo", multipart).await {
        return status.into_response();
    }
    match state.detect {
        Mode::Ok => annotated_png(),
        Mode::ServerError => server_error("YOLO detection failed"),
    }
}

async fn segment_sam(State(state): State<MockState>, multipart: Multipart) -> Response {
    if let Err(status) = record(&state, "/segment_sam", multipart).await {
        return status.into_response();
    }
    match state.segment {
        Mode::Ok => annotated_png(),
        Mode::ServerError => server_error("SAM segmentation failed"),
    }
}

impl MockApi {
    pub async fn start() -> Self {
        Self::start_with(Mode::Ok, Mode::Ok, Mode::Ok, Mode::Ok).await
    }

    pub async fn start_with(health_mode: Mode, classify: Mode, detect: Mode, segment: Mode) -> Self {
        let uploads: Uploads = Arc::default();
        let state = MockState {
            uploads: uploads.clone(),
            classify,
            detect,
            segment,
            health: health_mode,
        };
        let router = Router::new()
            .route("/api", get(health))
            .route("/predict_vgg", post(predict_vgg))
            .route("/detect_yolo", post(detect_yolo))
            .route("/segment_sam", post(segment_sam))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind失敗");
        let addr = listener.local_addr().expect("アドレス取得失敗");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("モックサーバ停止");
        });

        Self {
            base_url: format!("http://{}", addr),
            uploads,
        }
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }
}

/// 接続を拒否されるURL
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind失敗");
    let addr = listener.local_addr().expect("アドレス取得失敗");
    drop(listener);
    format!("http://{}", addr)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Alert(String),
    Action(Variant, ActionState),
    Preview(String),
    Surface(DrawingSurface),
    Classification(ClassificationDisplay),
    Annotated(Variant, String),
    Connectivity(ConnectivityStatus),
    Clear,
}

#[derive(Default)]
pub struct RecordingView {
    pub events: RefCell<Vec<Event>>,
}

impl RecordingView {
    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Alert(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, event: &Event) -> bool {
        self.events.borrow().contains(event)
    }

    pub fn last_action(&self, variant: Variant) -> Option<ActionState> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            Event::Action(v, s) if *v == variant => Some(*s),
            _ => None,
        })
    }
}

impl View for RecordingView {
    fn alert(&self, message: &str) {
        self.push(Event::Alert(message.to_string()));
    }
    fn set_action(&self, variant: Variant, state: ActionState) {
        self.push(Event::Action(variant, state));
    }
    fn show_preview(&self, image: &StagedImage) {
        self.push(Event::Preview(image.name().to_string()));
    }
    fn set_surface(&self, surface: DrawingSurface) {
        self.push(Event::Surface(surface));
    }
    fn show_classification(&self, display: &ClassificationDisplay) {
        self.push(Event::Classification(display.clone()));
    }
    fn show_annotated(
        &self,
        variant: Variant,
        image: &AnnotatedImage,
    ) -> tumor_ai_common::Result<()> {
        self.push(Event::Annotated(variant, image.mime.clone()));
        Ok(())
    }
    fn set_connectivity(&self, status: &ConnectivityStatus) {
        self.push(Event::Connectivity(status.clone()));
    }
    fn clear(&self) {
        self.push(Event::Clear);
    }
}
