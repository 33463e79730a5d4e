//! In-process HTTP stub standing in for the Daybook backend and the
//! decorative quote/image services.

#![allow(dead_code)]

use std::io::Read;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path including the query string.
    pub url: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }

    pub fn is(&self, method: &str, path: &str) -> bool {
        self.method == method && self.path() == path
    }

    pub fn bearer(&self) -> Option<&str> {
        self.authorization.as_deref()?.strip_prefix("Bearer ")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::json(
            401,
            serde_json::json!({"detail": "Given token not valid for any token type"}),
        )
    }
}

pub struct StubServer {
    pub base_url: String,
    server: Arc<tiny_http::Server>,
    log: Arc<Mutex<Vec<Recorded>>>,
    thread: Option<JoinHandle<()>>,
}

impl StubServer {
    pub fn start<H>(handler: H) -> Self
    where
        H: Fn(&Recorded) -> Reply + Send + 'static,
    {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind stub"));
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("stub port");
        let log = Arc::new(Mutex::new(Vec::new()));

        let thread = {
            let server = Arc::clone(&server);
            let log = Arc::clone(&log);
            std::thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);
                    let recorded = Recorded {
                        method: request.method().to_string().to_uppercase(),
                        url: request.url().to_string(),
                        authorization: request
                            .headers()
                            .iter()
                            .find(|header| header.field.equiv("Authorization"))
                            .map(|header| header.value.as_str().to_string()),
                        body,
                    };
                    let reply = handler(&recorded);
                    log.lock().expect("log lock").push(recorded);

                    let response = tiny_http::Response::from_string(reply.body)
                        .with_status_code(reply.status)
                        .with_header(
                            tiny_http::Header::from_bytes("Content-Type", "application/json")
                                .expect("header"),
                        );
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            server,
            log,
            thread: Some(thread),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().expect("log lock").clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.is(method, path))
            .count()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// A base URL nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Answer the login call; everything else goes to `routes`.
pub fn backend<H>(routes: H) -> StubServer
where
    H: Fn(&Recorded) -> Reply + Send + 'static,
{
    StubServer::start(move |request| {
        if request.is("POST", "/api/auth/login/") {
            return Reply::json(
                200,
                serde_json::json!({
                    "user": {"id": 4, "email": "ada@example.com", "first_name": "Ada", "last_name": "Lovelace"},
                    "tokens": {"access": "access-1", "refresh": "refresh-1"}
                }),
            );
        }
        if request.bearer() != Some("access-1") {
            return Reply::unauthorized();
        }
        routes(request)
    })
}
