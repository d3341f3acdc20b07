//! In-process fake backend for integration tests, built on `tiny_http`.

#![allow(dead_code)]

use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use exam_api::{ExamApi, Navigator};
use exam_config::ApiConfig;
use exam_session::SessionStore;
use serde_json::Value;

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path plus query string, as sent.
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// What the fake backend answers.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(status: u16, value: &Value) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: serde_json::to_vec(value).expect("encode reply"),
        }
    }

    pub fn bytes(status: u16, content_type: &str, body: &[u8]) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), content_type.into())],
            body: body.to_vec(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP server on `127.0.0.1:<random>` answering with a caller-supplied handler.
pub struct FakeBackend {
    server: Arc<tiny_http::Server>,
    worker: Option<JoinHandle<()>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    pub base_url: String,
}

impl FakeBackend {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Recorded) -> Reply + Send + 'static,
    {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind fake backend"));
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("tcp listener");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let worker = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            std::thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = Vec::new();
                    let _ = request.as_reader().read_to_end(&mut body);
                    let header = |name: &'static str| {
                        request
                            .headers()
                            .iter()
                            .find(|h| h.field.equiv(name))
                            .map(|h| h.value.as_str().to_string())
                    };
                    let recorded = Recorded {
                        method: request.method().to_string(),
                        url: request.url().to_string(),
                        authorization: header("Authorization"),
                        content_type: header("Content-Type"),
                        body,
                    };

                    let reply = handler(&recorded);
                    requests.lock().unwrap().push(recorded);

                    let mut response =
                        tiny_http::Response::from_data(reply.body).with_status_code(reply.status);
                    for (name, value) in &reply.headers {
                        response = response.with_header(
                            tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes())
                                .expect("valid header"),
                        );
                    }
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            worker: Some(worker),
            requests,
            base_url: format!("http://127.0.0.1:{port}"),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("at least one request")
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Counts redirects to the login entry point.
#[derive(Default)]
pub struct LoginRedirects(AtomicUsize);

impl LoginRedirects {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Navigator for LoginRedirects {
    fn redirect_to_login(&self, _reason: &str) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        use_system_proxy: false,
        ..ApiConfig::default()
    }
}

/// An `ExamApi` against `base_url` with its own store and redirect counter.
pub fn api_with(
    base_url: &str,
    session: Arc<SessionStore>,
) -> (ExamApi, Arc<LoginRedirects>) {
    let redirects = Arc::new(LoginRedirects::default());
    let api = ExamApi::from_config(&api_config(base_url), session, redirects.clone())
        .expect("client builds");
    (api, redirects)
}

pub fn login_reply() -> Reply {
    Reply::json(
        200,
        &serde_json::json!({
            "access_token": "abc",
            "token_type": "bearer",
            "user": {"id": "u1", "role": "ADMIN"},
            "user_exams": []
        }),
    )
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
