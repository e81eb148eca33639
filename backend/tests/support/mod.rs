//! Shared helpers for the HTTP integration suites.
//!
//! [`Browser`] drives the full application against a migrated SQLite file and
//! carries the session cookie from one response into the next request.

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use inventory::inbound::http::session_config::SESSION_COOKIE_NAME;
use inventory::test_support::{TestDatabase, app, session_settings};

/// A response reduced to the parts the suites assert on.
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Page {
    /// Assert a `302` to `target`.
    #[track_caller]
    pub fn assert_redirect(&self, target: &str) {
        assert_eq!(self.status, StatusCode::FOUND, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(target));
    }

    /// Confirmation token embedded in the page's delete forms.
    pub fn confirmation_token(&self) -> Option<String> {
        let marker = r#"name="csrf_token" value=""#;
        let start = self.body.find(marker)? + marker.len();
        let len = self.body[start..].find('"')?;
        Some(self.body[start..start + len].to_owned())
    }

    /// Identifier of the table row showing `name`.
    pub fn item_id(&self, name: &str) -> Option<i64> {
        let cell = format!("<td>{name}</td>");
        self.body
            .lines()
            .find(|line| line.contains(&cell))?
            .strip_prefix("<tr><td>")?
            .split("</td>")
            .next()?
            .parse()
            .ok()
    }
}

/// Test client that remembers the session cookie.
pub struct Browser<S> {
    app: S,
    cookie: Option<Cookie<'static>>,
}

impl<S> Browser<S>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    pub async fn get(&mut self, uri: &str) -> Page {
        self.send(TestRequest::get().uri(uri)).await
    }

    pub async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Page {
        self.send(TestRequest::post().uri(uri).set_form(form)).await
    }

    /// `POST` with no body at all.
    pub async fn post_empty(&mut self, uri: &str) -> Page {
        self.send(TestRequest::post().uri(uri)).await
    }

    /// Drop the stored cookie, as if the browser were closed.
    pub fn forget_session(&mut self) {
        self.cookie = None;
    }

    async fn send(&mut self, request: TestRequest) -> Page {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let response = test::call_service(&self.app, request.to_request()).await;
        if let Some(cookie) = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        {
            self.cookie = (!cookie.value().is_empty()).then(|| cookie.into_owned());
        }
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = test::read_body(response).await;
        Page {
            status,
            location,
            body: String::from_utf8(body.to_vec()).expect("utf-8 body"),
        }
    }

    /// Register `username` and sign in, asserting both steps succeed.
    pub async fn sign_up_and_in(&mut self, username: &str, password: &str) {
        let form = [("username", username), ("password", password)];
        self.post("/register", &form).await.assert_redirect("/login");
        self.post("/login", &form).await.assert_redirect("/");
    }
}

/// Start the application over a fresh database.
///
/// Keep the returned database alive for the length of the test; dropping it
/// deletes the file.
pub async fn open() -> (
    TestDatabase,
    Browser<impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>>,
) {
    let database = TestDatabase::new().await.expect("test database");
    let service = test::init_service(app(database.http_state(), session_settings())).await;
    (
        database,
        Browser {
            app: service,
            cookie: None,
        },
    )
}
