//! Helpers for handler tests.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web};
use argon2::Params;
use serde_json::{Value, json};

use crate::domain::test_fixtures::fixture_clock;
use crate::inbound::http::api_routes;
use crate::inbound::http::state::{HttpState, Repositories};
use crate::inbound::http::validation::{json_config, query_config};
use crate::middleware::Trace;
use crate::outbound::credentials::Argon2PasswordHasher;
use crate::outbound::memory::InMemoryStore;

/// Well-formed id that no stored record carries.
pub const UNKNOWN_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Cookie session middleware with a fresh key and no `Secure` flag.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Handler state over a fresh in-memory store with cheap hashing.
pub fn memory_state() -> HttpState {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid argon2 params");
    HttpState::from_repositories(
        Repositories::shared(Arc::new(InMemoryStore::new())),
        Arc::new(Argon2PasswordHasher::with_params(params)),
        fixture_clock(),
    )
}

/// Full API under `/api/v1` with the given state, test sessions and trace ids.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(api_routes),
        )
}

/// Register `name` through the API and return its session cookie and body.
pub async fn sign_up<S, B>(app: &S, name: &str) -> (Cookie<'static>, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "password": "correct horse",
        }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED, "register {name}");
    let cookie = session_cookie(&response).expect("session cookie");
    let body: Value = test::read_body_json(response).await;
    (cookie, body)
}

/// Send a JSON request as the holder of `cookie`.
pub async fn send<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    method: Method,
    uri: &str,
    payload: Option<Value>,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut request = test::TestRequest::default()
        .method(method)
        .uri(uri)
        .cookie(cookie.clone());
    if let Some(payload) = payload {
        request = request.set_json(payload);
    }
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}
