//! In-process json-server style backend for the users and roles collections.
//!
//! The server is spawned onto the current `LocalSet` with
//! `actix_web::rt::spawn`, so callers must run inside an Actix runtime
//! (`#[actix_rt::test]`) or a Tokio `LocalSet`.

use std::io;
use std::net::TcpListener;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use admin_console::outbound::rest::RestClient;
use serde_json::{Value, json};
use url::Url;

/// A request as the backend received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Backing data plus failure injection knobs.
#[derive(Debug, Default)]
pub struct Store {
    users: Vec<Value>,
    roles: Vec<Value>,
    requests: Vec<RecordedRequest>,
    failure: Option<u16>,
    delay: Option<Duration>,
}

impl Store {
    pub fn with_user(mut self, user: Value) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_role(mut self, role: Value) -> Self {
        self.roles.push(role);
        self
    }

    pub fn users(&self) -> &[Value] {
        &self.users
    }

    pub fn roles(&self) -> &[Value] {
        &self.roles
    }

    pub fn requests(&self) -> &[RecordedRequest] {
        &self.requests
    }

    /// Requests whose method matches `method`.
    pub fn requests_with(&self, method: &str) -> Vec<&RecordedRequest> {
        self.requests
            .iter()
            .filter(|request| request.method == method)
            .collect()
    }

    /// Answer every subsequent request with `status`.
    pub fn fail_with(&mut self, status: u16) {
        self.failure = Some(status);
    }

    /// Hold every subsequent response for `delay`.
    pub fn delay_by(&mut self, delay: Duration) {
        self.delay = Some(delay);
    }

    fn collection(&self, name: &str) -> Option<&Vec<Value>> {
        match name {
            "users" => Some(&self.users),
            "roles" => Some(&self.roles),
            _ => None,
        }
    }

    fn collection_mut(&mut self, name: &str) -> Option<&mut Vec<Value>> {
        match name {
            "users" => Some(&mut self.users),
            "roles" => Some(&mut self.roles),
            _ => None,
        }
    }

    fn next_id(&self, name: &str) -> i64 {
        self.collection(name)
            .into_iter()
            .flatten()
            .filter_map(|item| item.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0)
            + 1
    }

    fn record(&mut self, method: &'static str, path: String, body: Option<Value>) {
        self.requests.push(RecordedRequest { method, path, body });
    }
}

type SharedStore = Arc<Mutex<Store>>;

/// Running fake backend bound to an ephemeral local port.
pub struct FakeBackend {
    base_url: Url,
    handle: ServerHandle,
    store: SharedStore,
}

impl FakeBackend {
    /// Bind and start serving `store`.
    pub fn start(store: Store) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let store = Arc::new(Mutex::new(store));
        let data = web::Data::from(Arc::clone(&store));

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .service(
                    web::resource("/{collection}")
                        .route(web::get().to(list))
                        .route(web::post().to(create)),
                )
                .service(
                    web::resource("/{collection}/{id}")
                        .route(web::put().to(replace))
                        .route(web::delete().to(remove)),
                )
        })
        .disable_signals()
        .workers(1)
        .listen(listener)?
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        let base_url = Url::parse(&format!("http://{addr}"))
            .map_err(|error| io::Error::other(error.to_string()))?;
        Ok(Self {
            base_url,
            handle,
            store,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client with no timeout pointed at this backend.
    pub fn client(&self) -> RestClient {
        RestClient::new(self.base_url.clone()).expect("client for fake backend")
    }

    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

type Data = web::Data<Mutex<Store>>;

fn lock(data: &Data) -> MutexGuard<'_, Store> {
    data.lock().unwrap_or_else(PoisonError::into_inner)
}

fn rendered_id(item: &Value) -> Option<String> {
    match item.get("id")? {
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}

fn injected_failure(status: u16) -> HttpResponse {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(json!({ "error": "injected failure" }))
}

/// Record the request, then return an injected failure if one is armed.
async fn admit(
    data: &Data,
    method: &'static str,
    path: String,
    body: Option<Value>,
) -> Option<HttpResponse> {
    let (failure, delay) = {
        let mut store = lock(data);
        store.record(method, path, body);
        (store.failure, store.delay)
    };
    if let Some(delay) = delay {
        actix_web::rt::time::sleep(delay).await;
    }
    failure.map(injected_failure)
}

async fn list(data: Data, path: web::Path<String>) -> HttpResponse {
    let collection = path.into_inner();
    if let Some(response) = admit(&data, "GET", format!("/{collection}"), None).await {
        return response;
    }
    let store = lock(&data);
    match store.collection(&collection) {
        Some(items) => HttpResponse::Ok().json(items),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn create(data: Data, path: web::Path<String>, body: web::Json<Value>) -> HttpResponse {
    let collection = path.into_inner();
    let mut body = body.into_inner();
    if let Some(response) = admit(&data, "POST", format!("/{collection}"), Some(body.clone())).await
    {
        return response;
    }
    let mut store = lock(&data);
    let id = store.next_id(&collection);
    let Some(items) = store.collection_mut(&collection) else {
        return HttpResponse::NotFound().finish();
    };
    if let Some(object) = body.as_object_mut() {
        object.insert("id".to_owned(), json!(id));
    }
    items.push(body.clone());
    HttpResponse::Created().json(body)
}

async fn replace(
    data: Data,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> HttpResponse {
    let (collection, id) = path.into_inner();
    let body = body.into_inner();
    if let Some(response) = admit(
        &data,
        "PUT",
        format!("/{collection}/{id}"),
        Some(body.clone()),
    )
    .await
    {
        return response;
    }
    let mut store = lock(&data);
    let Some(items) = store.collection_mut(&collection) else {
        return HttpResponse::NotFound().finish();
    };
    let Some(slot) = items
        .iter_mut()
        .find(|item| rendered_id(item).as_deref() == Some(id.as_str()))
    else {
        return HttpResponse::NotFound().json(json!({}));
    };
    let original_id = slot.get("id").cloned();
    *slot = body;
    if let (Some(object), Some(original_id)) = (slot.as_object_mut(), original_id) {
        object.insert("id".to_owned(), original_id);
    }
    HttpResponse::Ok().json(slot.clone())
}

async fn remove(data: Data, path: web::Path<(String, String)>) -> HttpResponse {
    let (collection, id) = path.into_inner();
    if let Some(response) = admit(&data, "DELETE", format!("/{collection}/{id}"), None).await {
        return response;
    }
    let mut store = lock(&data);
    let Some(items) = store.collection_mut(&collection) else {
        return HttpResponse::NotFound().finish();
    };
    let Some(position) = items
        .iter()
        .position(|item| rendered_id(item).as_deref() == Some(id.as_str()))
    else {
        return HttpResponse::NotFound().json(json!({}));
    };
    items.remove(position);
    HttpResponse::Ok().json(json!({}))
}
