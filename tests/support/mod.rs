//! テスト用の Classification Service（axum でローカルに立てる）

#![allow(dead_code)]

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use std::sync::{Arc, Mutex};

/// 受信したマルチパートの1項目
#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

struct ServiceState {
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<ReceivedPart>>>,
}

/// 起動済みのフェイクサービス
pub struct FakeServer {
    pub base_url: String,
    pub received: Arc<Mutex<Vec<ReceivedPart>>>,
}

impl FakeServer {
    /// `/identify_species` が固定の応答を返すサービス
    pub async fn identify(status: StatusCode, body: &'static str) -> Self {
        Self::start(status, body, None).await
    }

    /// `/identify_species` に加えて `image_path` で画像を返すサービス
    pub async fn with_image(body: &'static str, image_path: &str, image: Vec<u8>) -> Self {
        Self::start(StatusCode::OK, body, Some((image_path.to_string(), image))).await
    }

    async fn start(
        status: StatusCode,
        body: &'static str,
        image: Option<(String, Vec<u8>)>,
    ) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(ServiceState {
            status,
            body,
            received: received.clone(),
        });

        let mut app = Router::new()
            .route("/identify_species", post(identify_species))
            .with_state(state);
        if let Some((path, bytes)) = image {
            app = app.route(
                &path,
                get(move || {
                    let bytes = bytes.clone();
                    async move { ([(header::CONTENT_TYPE, "image/png")], bytes) }
                }),
            );
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, received }
    }

    pub fn parts(&self) -> Vec<ReceivedPart> {
        self.received.lock().unwrap().clone()
    }
}

async fn identify_species(
    State(state): State<Arc<ServiceState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap().to_vec();
        state.received.lock().unwrap().push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

/// 単色のPNGを作る
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 140, 60]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageOutputFormat::Png).unwrap();
    bytes.into_inner()
}
