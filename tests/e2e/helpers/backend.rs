//! In-process stand-in for the storefront backend.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub const CUSTOMER_EMAIL: &str = "fan@example.com";
pub const STAFF_EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "correct-horse";
pub const CSRF_TOKEN: &str = "csrf-e2e-token";
pub const ORDER_ID: i64 = 42;
pub const VALID_TICKET: &str = "0b7e1c52-6a35-4f0e-9a51-1f5f0a3c9d21";
pub const USED_TICKET: &str = "6f2d8e14-93c1-4b7a-8e0f-52a9c1d4e3b7";

#[derive(Default)]
pub struct BackendState {
    next_token: AtomicU32,
    /// access token -> email
    access_tokens: Mutex<HashMap<String, String>>,
    /// refresh token -> email
    refresh_tokens: Mutex<HashMap<String, String>>,
    hits: Mutex<HashMap<String, u32>>,
    csrf_headers: Mutex<Vec<Option<String>>>,
    cart: Mutex<Vec<(i64, u32)>>,
    payment_script: Mutex<VecDeque<String>>,
    used_tickets: Mutex<HashSet<Uuid>>,
    upload_fields: Mutex<Vec<(String, Option<String>)>>,
}

impl BackendState {
    /// Invalidate every access token, as if they all expired
    pub fn expire_access_tokens(&self) {
        self.access_tokens.lock().clear();
    }

    pub fn revoke_refresh_tokens(&self) {
        self.refresh_tokens.lock().clear();
    }

    pub fn hits(&self, path: &str) -> u32 {
        self.hits.lock().get(path).copied().unwrap_or(0)
    }

    /// `X-CSRFToken` of every write, in order
    pub fn csrf_headers(&self) -> Vec<Option<String>> {
        self.csrf_headers.lock().clone()
    }

    pub fn script_payment(&self, statuses: &[&str]) {
        *self.payment_script.lock() = statuses.iter().map(|s| s.to_string()).collect();
    }

    pub fn upload_fields(&self) -> Vec<(String, Option<String>)> {
        self.upload_fields.lock().clone()
    }

    fn record(&self, path: &str) {
        *self.hits.lock().entry(path.to_string()).or_default() += 1;
    }

    fn record_write(&self, path: &str, headers: &HeaderMap) {
        self.record(path);
        let csrf = headers
            .get("x-csrftoken")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.csrf_headers.lock().push(csrf);
    }

    fn issue_access(&self, email: &str) -> String {
        let token = format!("access-{}", self.next_token.fetch_add(1, Ordering::SeqCst) + 1);
        self.access_tokens
            .lock()
            .insert(token.clone(), email.to_string());
        token
    }

    /// `Ok(None)` for anonymous calls, `Err` for a rejected bearer token
    fn caller(&self, headers: &HeaderMap) -> Result<Option<String>, Response> {
        let Some(auth) = headers.get(header::AUTHORIZATION) else {
            return Ok(None);
        };
        let token = auth
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or_default();

        match self.access_tokens.lock().get(token) {
            Some(email) => Ok(Some(email.clone())),
            None => Err(token_not_valid()),
        }
    }

    fn staff(&self, headers: &HeaderMap) -> Result<String, Response> {
        match self.caller(headers)? {
            Some(email) if email == STAFF_EMAIL => Ok(email),
            Some(_) => Err((
                StatusCode::FORBIDDEN,
                Json(json!({"detail": "You do not have permission to perform this action."})),
            )
                .into_response()),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Authentication credentials were not provided."})),
            )
                .into_response()),
        }
    }

    fn cart_json(&self) -> Value {
        let cart = self.cart.lock();
        let items: Vec<Value> = cart
            .iter()
            .enumerate()
            .map(|(i, (product_id, quantity))| {
                json!({
                    "id": i as i64 + 1,
                    "product": {"id": product_id, "title": format!("Product {}", product_id)},
                    "quantity": quantity,
                    "unit_price": "12.50",
                })
            })
            .collect();
        let units: u32 = cart.iter().map(|(_, q)| q).sum();
        json!({"id": 7, "items": items, "total": format!("{:.2}", units as f64 * 12.5)})
    }
}

fn token_not_valid() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Given token not valid for any token type", "code": "token_not_valid"})),
    )
        .into_response()
}

pub fn router(state: Arc<BackendState>) -> Router {
    Router::new()
        .route("/api/auth/token/", post(login))
        .route("/api/auth/token/refresh/", post(refresh))
        .route("/api/auth/user/", get(current_user))
        .route("/api/auth/full-logout/", post(full_logout))
        .route("/api/categories/", get(categories))
        .route("/api/products/", get(products))
        .route("/api/orders/", get(orders))
        .route("/api/cart/add_item/", post(add_item))
        .route("/api/cart/checkout/", post(checkout))
        .route("/api/payment_status/:id/", get(payment_status))
        .route("/api/events/verify/:code/", get(verify_ticket))
        .route("/api/products/bulk-upload/", post(bulk_upload))
        .route("/api/products/download-csv/", get(download_csv))
        .with_state(state)
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<LoginBody>) -> Response {
    state.record("/api/auth/token/");

    let known = body.username == CUSTOMER_EMAIL || body.username == STAFF_EMAIL;
    if !known || body.password != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
            .into_response();
    }

    let access = state.issue_access(&body.username);
    let refresh = format!("refresh-{}", Uuid::new_v4());
    state
        .refresh_tokens
        .lock()
        .insert(refresh.clone(), body.username.clone());

    (
        StatusCode::OK,
        [(header::SET_COOKIE, format!("csrftoken={}; Path=/", CSRF_TOKEN))],
        Json(json!({"access": access, "refresh": refresh})),
    )
        .into_response()
}

#[derive(Deserialize)]
struct RefreshBody {
    refresh: String,
}

async fn refresh(State(state): State<Arc<BackendState>>, Json(body): Json<RefreshBody>) -> Response {
    state.record("/api/auth/token/refresh/");

    let email = state.refresh_tokens.lock().get(&body.refresh).cloned();
    match email {
        Some(email) => {
            let access = state.issue_access(&email);
            Json(json!({"access": access})).into_response()
        }
        None => token_not_valid(),
    }
}

async fn current_user(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.record("/api/auth/user/");

    match state.caller(&headers) {
        Ok(Some(email)) => {
            let is_staff = email == STAFF_EMAIL;
            let (pk, first_name) = if is_staff { (1, "Ada") } else { (2, "Frank") };
            Json(json!({
                "pk": pk,
                "email": email,
                "username": email,
                "first_name": first_name,
                "last_name": "",
                "is_staff": is_staff,
                "is_superuser": false,
            }))
            .into_response()
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Authentication credentials were not provided."})),
        )
            .into_response(),
        Err(rejected) => rejected,
    }
}

async fn full_logout(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.record_write("/api/auth/full-logout/", &headers);
    state.expire_access_tokens();
    state.revoke_refresh_tokens();
    Json(json!({"detail": "Logged out"})).into_response()
}

async fn categories(State(state): State<Arc<BackendState>>) -> Response {
    state.record("/api/categories/");
    Json(json!([
        {"id": 1, "name": "Comics", "slug": "comics", "parent": null, "image_url": null},
        {"id": 2, "name": "Manga", "slug": "manga", "parent": 1, "image_url": null},
    ]))
    .into_response()
}

async fn products(
    State(state): State<Arc<BackendState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record("/api/products/");

    let title = match query.get("search") {
        Some(search) => format!("{} special", search),
        None => "Issue #1".to_string(),
    };
    Json(json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [{
            "id": 3,
            "title": title,
            "slug": "issue-1",
            "category": 2,
            "price": "12.50",
            "stock": 4,
            "images": [],
        }],
    }))
    .into_response()
}

async fn orders(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.record("/api/orders/");

    match state.caller(&headers) {
        Ok(Some(_)) => Json(json!([
            {"id": ORDER_ID, "status": "paid", "total": "25.00", "items": []}
        ]))
        .into_response(),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Authentication credentials were not provided."})),
        )
            .into_response(),
        Err(rejected) => rejected,
    }
}

#[derive(Deserialize)]
struct AddItemBody {
    product_id: i64,
    quantity: u32,
}

async fn add_item(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<AddItemBody>,
) -> Response {
    state.record_write("/api/cart/add_item/", &headers);
    if let Err(rejected) = state.caller(&headers) {
        return rejected;
    }

    state.cart.lock().push((body.product_id, body.quantity));
    Json(state.cart_json()).into_response()
}

async fn checkout(State(state): State<Arc<BackendState>>, headers: HeaderMap, Json(_body): Json<Value>) -> Response {
    state.record_write("/api/cart/checkout/", &headers);
    if let Err(rejected) = state.caller(&headers) {
        return rejected;
    }

    if state.cart.lock().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Your cart is empty."})),
        )
            .into_response();
    }

    Json(json!({
        "payment_url": format!("https://pay.example/checkout/{}", ORDER_ID),
        "order_id": ORDER_ID,
    }))
    .into_response()
}

async fn payment_status(State(state): State<Arc<BackendState>>, Path(id): Path<i64>) -> Response {
    state.record("/api/payment_status/");

    if id != ORDER_ID {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response();
    }

    let mut script = state.payment_script.lock();
    let status = if script.len() > 1 {
        script.pop_front()
    } else {
        script.front().cloned()
    };
    Json(json!({"status": status.unwrap_or_else(|| "pending".to_string())})).into_response()
}

async fn verify_ticket(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Path(code): Path<Uuid>,
) -> Response {
    state.record("/api/events/verify/");
    if let Err(rejected) = state.staff(&headers) {
        return rejected;
    }

    let known = code.to_string() == VALID_TICKET || code.to_string() == USED_TICKET;
    if !known {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Invalid ticket"}))).into_response();
    }

    let mut used = state.used_tickets.lock();
    if code.to_string() == USED_TICKET || !used.insert(code) {
        return (StatusCode::BAD_REQUEST, Json(json!({"detail": "Already used"}))).into_response();
    }

    Json(json!({
        "valid": true,
        "event": "Launch Party",
        "ticket": code,
        "used_at": "2024-06-01T19:00:00Z",
    }))
    .into_response()
}

async fn bulk_upload(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.record_write("/api/products/bulk-upload/", &headers);
    if let Err(rejected) = state.staff(&headers) {
        return rejected;
    }

    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        fields.push((name, file_name));
    }

    if !fields.iter().any(|(name, _)| name == "excel_file") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Excel file is required."})),
        )
            .into_response();
    }
    *state.upload_fields.lock() = fields;

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "2 products created successfully.",
            "created_products": ["Issue #1", "Issue #2"],
            "skipped": [],
            "images_uploaded": 0,
        })),
    )
        .into_response()
}

async fn download_csv(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.record("/api/products/download-csv/");
    if let Err(rejected) = state.staff(&headers) {
        return rejected;
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv")],
        "id,title,price\n3,Issue #1,12.50\n",
    )
        .into_response()
}
