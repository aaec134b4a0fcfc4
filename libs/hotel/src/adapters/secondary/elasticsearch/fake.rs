//! An in-process stand-in for Elasticsearch, answering with canned responses.
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;
use warp::http::{Method, Response, StatusCode};
use warp::hyper::body::Bytes;
use warp::path::FullPath;
use warp::Filter;

use super::remote::connection_pool_url;
use super::{ElasticsearchStorage, ElasticsearchStorageConfig};
use crate::domain::ports::secondary::remote::Remote;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Value,
}

pub struct FakeElasticsearch {
    pub url: Url,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeElasticsearch {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn storage(&self) -> ElasticsearchStorage {
        connection_pool_url(&self.url)
            .conn(config(self.url.clone()))
            .await
            .expect("Elasticsearch Connection Established")
    }
}

pub fn config(url: Url) -> ElasticsearchStorageConfig {
    ElasticsearchStorageConfig {
        url,
        api_key: None,
        index: String::from("hotel"),
        analyzer: String::from("ik_max_word"),
        timeout: Duration::from_millis(10000),
        insecure: false,
        insertion_chunk_size: 2,
    }
}

/// Bodies made of several JSON lines, like bulk requests, are recorded as an array.
fn parse_body(body: &[u8]) -> Value {
    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or_else(|_| {
        Value::Array(
            text.lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| serde_json::from_str(line).unwrap_or(Value::Null))
                .collect(),
        )
    })
}

pub async fn serve<F>(respond: F) -> FakeElasticsearch
where
    F: Fn(&Method, &str, &Value) -> (StatusCode, Value) + Clone + Send + Sync + 'static,
{
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    let route = warp::method()
        .and(warp::path::full())
        .and(warp::body::bytes())
        .map(move |method: Method, path: FullPath, body: Bytes| {
            let body = parse_body(&body);
            let (status, reply) = respond(&method, path.as_str(), &body);
            recorded.lock().unwrap().push(Recorded {
                method,
                path: String::from(path.as_str()),
                body,
            });
            Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .header("x-elastic-product", "Elasticsearch")
                .body(reply.to_string())
                .unwrap()
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    FakeElasticsearch {
        url: Url::parse(&format!("http://{}", addr)).unwrap(),
        requests,
    }
}

pub fn exception(status: StatusCode, err_type: &str, reason: &str) -> (StatusCode, Value) {
    (
        status,
        json!({
            "error": {
                "root_cause": [{ "type": err_type, "reason": reason }],
                "type": err_type,
                "reason": reason
            },
            "status": status.as_u16()
        }),
    )
}

pub fn not_found() -> (StatusCode, Value) {
    exception(
        StatusCode::NOT_FOUND,
        "index_not_found_exception",
        "no such index [unknown]",
    )
}
