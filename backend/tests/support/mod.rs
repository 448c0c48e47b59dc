//! In-process API harness over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web};
use argon2::Params;
use mockable::DefaultClock;
use serde_json::{Value, json};

use bug_tracker::Trace;
use bug_tracker::inbound::http::api_routes;
use bug_tracker::inbound::http::state::{HttpState, Repositories};
use bug_tracker::inbound::http::validation::{json_config, query_config};
use bug_tracker::outbound::credentials::Argon2PasswordHasher;
use bug_tracker::outbound::memory::InMemoryStore;

pub fn app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("argon2 params");
    let state = HttpState::from_repositories(
        Repositories::shared(Arc::new(InMemoryStore::new())),
        Arc::new(Argon2PasswordHasher::with_params(params)),
        Arc::new(DefaultClock),
    );
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(web::scope("/api/v1").wrap(session).configure(api_routes))
}

/// A signed-in account.
pub struct Client {
    pub id: String,
    pub cookie: Cookie<'static>,
}

pub async fn register<S, B>(app: &S, name: &str) -> Client
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
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie");
    let body: Value = test::read_body_json(response).await;
    Client {
        id: body["id"].as_str().expect("id").to_owned(),
        cookie,
    }
}

/// Call the API as `client`, returning the status and JSON body (`null` when empty).
pub async fn call<S, B>(
    app: &S,
    client: &Client,
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
        .cookie(client.cookie.clone());
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

pub fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("entity id").to_owned()
}
