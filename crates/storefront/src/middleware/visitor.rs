use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::debug;
use uuid::Uuid;

pub const VISITOR_COOKIE: &str = "visitor_id";

/// Opaque identity of the browser session the cart belongs to. Minted on
/// first contact and carried in a long-lived cookie; there is no account
/// linkage at this layer.
#[derive(Debug, Clone)]
pub struct VisitorId(pub String);

pub async fn visitor_middleware(jar: CookieJar, mut req: Request, next: Next) -> Response {
    let (jar, visitor_id) = match jar.get(VISITOR_COOKIE) {
        Some(cookie) => (jar.clone(), cookie.value().to_string()),
        None => {
            let visitor_id = Uuid::new_v4().to_string();
            debug!("Minting visitor id {visitor_id}");

            let cookie = Cookie::build((VISITOR_COOKIE, visitor_id.clone()))
                .path("/")
                .http_only(true)
                .permanent()
                .build();

            (jar.add(cookie), visitor_id)
        }
    };

    req.extensions_mut().insert(VisitorId(visitor_id));

    let response = next.run(req).await;

    (jar, response).into_response()
}
