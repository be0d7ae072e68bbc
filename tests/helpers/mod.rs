//! Stub prediction backend for the end-to-end tests.
//!
//! Serves the two endpoints the client speaks to, on an ephemeral local
//! port: `POST /api/predict` (JSON) and `POST /predict` (multipart).

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

/// Spawn a backend that answers both endpoints successfully.
/// Returns the base URL.
pub async fn spawn_stub_backend() -> String {
    let app = Router::new()
        .route("/api/predict", post(predict_single))
        .route("/predict", post(predict_batch));
    serve(app).await
}

/// Spawn a backend where every prediction fails with a 500.
pub async fn spawn_failing_backend() -> String {
    async fn fail() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
    let app = Router::new()
        .route("/api/predict", post(fail))
        .route("/predict", post(fail));
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().expect("Failed to read stub address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub backend error");
    });

    format!("http://{addr}")
}

/// `POST /api/predict` — checks the wire contract and answers a fixed price.
async fn predict_single(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    // The date must arrive as a plain calendar string, not a timestamp.
    let date = body
        .get("date")
        .and_then(Value::as_str)
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    for field in ["location", "cpi_food_items", "pms_price", "central_rate_usd", "mpr"] {
        if body.get(field).is_none() {
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    Ok(Json(json!({ "price": 245.5 })))
}

/// `POST /predict` — consumes the uploaded file and answers a fixed,
/// ordered collection.
async fn predict_batch(mut multipart: Multipart) -> Result<Json<Value>, StatusCode> {
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() == Some("file") {
            let data = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            file_bytes = Some(data.to_vec());
        }
    }

    match file_bytes {
        Some(bytes) if !bytes.is_empty() => Ok(Json(json!({
            "predictions": [
                { "location": "Lagos", "price": 210.0 },
                { "location": "Abuja", "price": 198.0 },
            ]
        }))),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}
