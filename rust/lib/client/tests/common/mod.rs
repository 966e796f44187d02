//! In-process mock of the Shuxiang backend.
//!
//! Answers the REST API with the backend's `{success, message, data}`
//! envelope and records every request so tests can assert on exactly what
//! the client sent.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use shuxiang_client::{App, ClientError, TokenSource};
use shuxiang_kv::{KVStore, MemoryKV};

pub const PASSWORD: &str = "secret1";

/// Sends no Authorization header.
pub struct Anonymous;

#[async_trait::async_trait]
impl TokenSource for Anonymous {
    async fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(None)
    }
}

/// A bearer token fixed at construction.
pub struct Bearer(pub &'static str);

#[async_trait::async_trait]
impl TokenSource for Bearer {
    async fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(Some(self.0.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct Backend {
    pub requests: Mutex<Vec<Recorded>>,
    pub novels: Mutex<Vec<Value>>,
    pub collections: Mutex<Vec<Value>>,
    pub categories: Mutex<Vec<Value>>,
    pub rankings: Mutex<Vec<Value>>,
    next_id: AtomicI64,
    /// Make `POST /collections` fail with HTTP 500.
    pub fail_collections: AtomicBool,
    /// Make `GET /novels` fail with HTTP 500.
    pub fail_lookup: AtomicBool,
    /// Make `DELETE /collections/:id` and `DELETE /categories/:id` fail.
    pub fail_deletes: AtomicBool,
}

impl Backend {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 100
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Count requests with this method and path.
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    pub fn seed_novel(&self, title: &str, source_url: &str) -> i64 {
        let id = self.next_id();
        self.novels.lock().unwrap().push(json!({
            "id": id,
            "title": title,
            "author": null,
            "source_url": source_url,
            "source_site": "unknown",
            "total_chapters": 0,
            "status": null,
        }));
        id
    }

    pub fn seed_collection(&self, title: &str, author: &str, category_id: Option<i64>, updated_at: &str) -> i64 {
        let novel_id = self.next_id();
        let novel = json!({
            "id": novel_id,
            "title": title,
            "author": author,
            "source_url": format!("https://x/{}", novel_id),
            "total_chapters": 10,
        });
        self.novels.lock().unwrap().push(novel.clone());
        let id = self.next_id();
        self.collections.lock().unwrap().push(json!({
            "id": id,
            "user_id": 1,
            "novel": novel,
            "novel_id": novel_id,
            "category_id": category_id,
            "rating": null,
            "reading_status": "reading",
            "current_chapter": 0,
            "notes": null,
            "createdAt": updated_at,
            "updatedAt": updated_at,
        }));
        id
    }

    pub fn seed_category(&self, name: &str) -> i64 {
        let id = self.next_id();
        self.categories.lock().unwrap().push(json!({
            "id": id,
            "user_id": 1,
            "name": name,
            "color": "#3b82f6",
            "icon": null,
        }));
        id
    }

    pub fn seed_ranking(&self, site: &str, ranking_type: &str, novels: Value) {
        self.rankings.lock().unwrap().push(json!({
            "siteName": site,
            "rankingType": ranking_type,
            "title": format!("{} {}", site, ranking_type),
            "novels": novels,
            "updatedAt": "2024-05-01T10:00:00",
        }));
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub backend: Arc<Backend>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let backend = Arc::new(Backend::default());
        let app = Router::new().fallback(dispatch).with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base_url = format!("http://{}/api", addr);
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(format!("{}/health", base_url)).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        }
        backend.clear_requests();

        MockBackend { base_url, backend }
    }

    /// A fresh client over in-memory storage.
    pub fn app(&self) -> (App, Arc<MemoryKV>) {
        let kv = Arc::new(MemoryKV::new());
        let app = App::new(self.base_url.clone(), kv.clone() as Arc<dyn KVStore>).unwrap();
        (app, kv)
    }
}

fn ok(data: Value) -> Response {
    Json(json!({"success": true, "message": "ok", "data": data})).into_response()
}

fn refused(message: &str) -> Response {
    Json(json!({"success": false, "message": message, "data": null})).into_response()
}

fn status(code: StatusCode, message: &str) -> Response {
    (code, Json(json!({"message": message}))).into_response()
}

async fn dispatch(
    State(b): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().trim_start_matches("/api").to_string();
    let query: Vec<(String, String)> = reqwest::Url::parse(&format!("http://mock{}", uri))
        .map(|u| u.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect())
        .unwrap_or_default();
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    let authorization = header("authorization");
    let body: Option<Value> = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    b.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        authorization: authorization.clone(),
        content_type: header("content-type"),
        body: body.clone(),
    });

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let authed = authorization.as_deref().is_some_and(|a| a.starts_with("Bearer "));
    let body = body.unwrap_or(Value::Null);

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["health"]) => ok(Value::Null),
        ("GET", ["bare"]) => Json(json!({"id": 1})).into_response(),
        ("GET", ["wrapped"]) => ok(json!({"id": 1})),
        ("GET", ["broken"]) => (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response(),
        ("GET", ["teapot"]) => status(StatusCode::IM_A_TEAPOT, "short and stout"),
        ("DELETE", ["empty"]) => StatusCode::OK.into_response(),

        ("POST", ["auth", "login"]) => {
            let email = body["email"].as_str().unwrap_or_default();
            if body["password"] == PASSWORD {
                ok(json!({
                    "token": format!("jwt-{}", email),
                    "user": {"id": 1, "username": "reader", "email": email},
                }))
            } else {
                status(StatusCode::UNAUTHORIZED, "邮箱或密码错误")
            }
        }
        ("POST", ["auth", "register"]) => ok(json!({
            "token": "jwt-new",
            "user": {"id": 2, "username": body["username"], "email": body["email"]},
        })),
        ("GET", ["auth", "me"]) if authed => {
            ok(json!({"id": 1, "username": "reader", "email": "reader@example.com"}))
        }

        ("GET", ["novels"]) => {
            if b.fail_lookup.load(Ordering::Relaxed) {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            let wanted = query.iter().find(|(k, _)| k == "source_url").map(|(_, v)| v.clone());
            let content: Vec<Value> = b
                .novels
                .lock()
                .unwrap()
                .iter()
                .filter(|n| wanted.as_deref().map_or(true, |w| n["source_url"] == w))
                .cloned()
                .collect();
            let total = content.len();
            ok(json!({"content": content, "totalElements": total}))
        }
        ("GET", ["novels", id]) => {
            let found = b.novels.lock().unwrap().iter().find(|n| n["id"].to_string() == *id).cloned();
            match found {
                Some(n) => ok(n),
                None => status(StatusCode::NOT_FOUND, "小说不存在"),
            }
        }
        ("POST", ["novels"]) => {
            let mut novel = body;
            novel["id"] = json!(b.next_id());
            b.novels.lock().unwrap().push(novel.clone());
            ok(novel)
        }

        (_, ["collections", ..]) | (_, ["categories", ..]) | ("GET", ["auth", "me"]) if !authed => {
            status(StatusCode::UNAUTHORIZED, "未登录")
        }

        ("GET", ["collections"]) => ok(Value::Array(b.collections.lock().unwrap().clone())),
        ("POST", ["collections"]) => {
            if b.fail_collections.load(Ordering::Relaxed) {
                return status(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
            }
            let novel_id = body["novel_id"].clone();
            let mut collections = b.collections.lock().unwrap();
            if collections.iter().any(|c| c["novel_id"] == novel_id) {
                return refused("已经收藏过该小说");
            }
            let novel = b
                .novels
                .lock()
                .unwrap()
                .iter()
                .find(|n| n["id"] == novel_id)
                .cloned();
            let Some(novel) = novel else {
                return refused("小说不存在");
            };
            let collection = json!({
                "id": b.next_id(),
                "user_id": 1,
                "novel": novel,
                "novel_id": novel_id,
                "category_id": body.get("category_id").cloned().unwrap_or(Value::Null),
                "reading_status": "reading",
                "current_chapter": 0,
                "updatedAt": "2024-05-02T12:00:00",
            });
            collections.push(collection.clone());
            ok(collection)
        }
        ("PUT", ["collections", id]) => {
            let mut collections = b.collections.lock().unwrap();
            let Some(c) = collections.iter_mut().find(|c| c["id"].to_string() == *id) else {
                return refused("收藏不存在");
            };
            if let Value::Object(fields) = body {
                for (k, v) in fields {
                    c[k.as_str()] = v;
                }
            }
            ok(c.clone())
        }
        ("DELETE", ["collections", id]) => {
            if b.fail_deletes.load(Ordering::Relaxed) {
                return status(StatusCode::INTERNAL_SERVER_ERROR, "delete failed");
            }
            b.collections.lock().unwrap().retain(|c| c["id"].to_string() != *id);
            ok(Value::Null)
        }

        ("GET", ["categories"]) => ok(Value::Array(b.categories.lock().unwrap().clone())),
        ("POST", ["categories"]) => {
            let mut categories = b.categories.lock().unwrap();
            if categories.iter().any(|c| c["name"] == body["name"]) {
                return refused("分类名称已存在");
            }
            let category = json!({
                "id": b.next_id(),
                "user_id": 1,
                "name": body["name"],
                "color": body["color"],
                "icon": body.get("icon").cloned().unwrap_or(Value::Null),
            });
            categories.push(category.clone());
            ok(category)
        }
        ("PUT", ["categories", id]) => {
            let mut categories = b.categories.lock().unwrap();
            let Some(c) = categories.iter_mut().find(|c| c["id"].to_string() == *id) else {
                return refused("分类不存在");
            };
            c["name"] = body["name"].clone();
            c["color"] = body["color"].clone();
            ok(c.clone())
        }
        ("DELETE", ["categories", id]) => {
            if b.fail_deletes.load(Ordering::Relaxed) {
                return status(StatusCode::INTERNAL_SERVER_ERROR, "delete failed");
            }
            b.categories.lock().unwrap().retain(|c| c["id"].to_string() != *id);
            ok(Value::Null)
        }

        ("GET", ["rankings"]) => {
            let summaries: Vec<Value> = b
                .rankings
                .lock()
                .unwrap()
                .iter()
                .map(|r| {
                    json!({
                        "siteName": r["siteName"],
                        "rankingType": r["rankingType"],
                        "title": r["title"],
                        "novelCount": r["novels"].as_array().map_or(0, |n| n.len()),
                        "updatedAt": r["updatedAt"],
                    })
                })
                .collect();
            ok(Value::Array(summaries))
        }
        ("GET", ["rankings", site]) => {
            let summaries: Vec<Value> = b
                .rankings
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r["siteName"] == *site)
                .map(|r| json!({"siteName": r["siteName"], "rankingType": r["rankingType"], "title": r["title"]}))
                .collect();
            ok(Value::Array(summaries))
        }
        ("GET", ["rankings", site, ranking_type]) => {
            if *site == "broken" {
                return status(StatusCode::INTERNAL_SERVER_ERROR, "scraper offline");
            }
            let found = b
                .rankings
                .lock()
                .unwrap()
                .iter()
                .find(|r| r["siteName"] == *site && r["rankingType"] == *ranking_type)
                .cloned();
            match found {
                Some(r) => ok(r),
                None => status(StatusCode::NOT_FOUND, "排行榜不存在"),
            }
        }
        ("POST", ["rankings", "fetch", _, _]) | ("POST", ["rankings", "fetch-all"]) => ok(Value::Null),

        _ => status(StatusCode::NOT_FOUND, "not found"),
    }
}

/// A ranking entry as the home view would hand it to `handle_collect`.
pub fn ranking_entry(title: &str, author: &str, source_url: &str) -> shuxiang_client::model::NovelInfo {
    shuxiang_client::model::NovelInfo {
        rank: 1,
        title: title.into(),
        author: author.into(),
        cover_url: None,
        source_url: source_url.into(),
        description: None,
        status: None,
        total_chapters: None,
    }
}
