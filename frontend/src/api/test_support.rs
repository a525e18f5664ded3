#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod mock {
    use crate::api::client::{register_mock, MockResponse, TestResponder};
    use crate::api::ApiError;
    use reqwest::Method;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PUT: Method = Method::PUT;
    pub const DELETE: Method = Method::DELETE;

    #[derive(Clone)]
    pub struct MockServer {
        inner: Arc<Mutex<Inner>>,
        base: String,
    }

    struct Inner {
        routes: Vec<Route>,
    }

    #[derive(Clone)]
    struct Route {
        method: Method,
        path: String,
        headers: Vec<(String, String)>,
        body: Option<Value>,
        response: MockResponse,
        hits: Arc<AtomicUsize>,
    }

    impl Route {
        fn matches(&self, request: &reqwest::Request) -> bool {
            if self.method != *request.method() || self.path != request.url().path() {
                return false;
            }
            let headers_match = self.headers.iter().all(|(name, value)| {
                request
                    .headers()
                    .get(name.as_str())
                    .and_then(|v| v.to_str().ok())
                    == Some(value.as_str())
            });
            let body_matches = match &self.body {
                None => true,
                Some(expected) => request
                    .body()
                    .and_then(|body| body.as_bytes())
                    .and_then(|bytes| serde_json::from_slice::<Value>(bytes).ok())
                    .as_ref()
                    == Some(expected),
            };
            headers_match && body_matches
        }
    }

    /// Handle to a registered route for hit-count assertions.
    pub struct MockRef {
        hits: Arc<AtomicUsize>,
    }

    impl MockRef {
        pub fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }

        pub fn assert_hits(&self, expected: usize) {
            assert_eq!(self.hits(), expected, "unexpected mock hit count");
        }
    }

    impl MockServer {
        pub async fn start_async() -> Self {
            Self::start()
        }

        pub fn start() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            Self {
                inner: Arc::new(Mutex::new(Inner { routes: Vec::new() })),
                base: format!("http://mock-{}", id),
            }
        }

        pub fn url(&self, path: &str) -> String {
            let base_url = format!("{}{}", self.base, path);
            register_mock(base_url.clone(), Arc::new(self.clone()));
            base_url
        }

        pub fn mock<F>(&self, f: F) -> MockRef
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.clone().expect("mock requires method");
            let path = when.path.clone().expect("mock requires path");
            let status = then.status.unwrap_or(200);
            let response = match then.body {
                Some(body) => MockResponse::json(status, body),
                None => MockResponse::empty(status),
            };
            let hits = Arc::new(AtomicUsize::new(0));

            let mut inner = self.inner.lock().expect("mock lock");
            inner.routes.push(Route {
                method,
                path,
                headers: when.headers,
                body: when.body,
                response,
                hits: Arc::clone(&hits),
            });
            MockRef { hits }
        }
    }

    impl TestResponder for MockServer {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError> {
            let inner = self
                .inner
                .lock()
                .map_err(|_| ApiError::unknown("mock lock"))?;

            let route = inner
                .routes
                .iter()
                .rev()
                .find(|route| route.matches(request))
                .ok_or_else(|| {
                    ApiError::request_failed(format!(
                        "No mock for {} {}",
                        request.method(),
                        request.url().path()
                    ))
                })?;
            route.hits.fetch_add(1, Ordering::SeqCst);
            Ok(route.response.clone())
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
        headers: Vec<(String, String)>,
        body: Option<Value>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }

        pub fn header(&mut self, name: &str, value: &str) -> &mut Self {
            self.headers.push((name.to_ascii_lowercase(), value.to_string()));
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }
    }
}
