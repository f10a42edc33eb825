use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::server::state::AppState;
use crate::subscribe::{ProviderOutcome, SubscribeError};

/// Where browsers land after a successful sign-up
pub const THANKS_LOCATION: &str = "/thanks";

/// Where browsers land when a sign-up fails
pub const ERROR_LOCATION: &str = "/?error=1#cta";

#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SubscribeReply {
    pub success: bool,
    pub message: String,
}

/// Programmatic callers identify themselves with `X-Requested-With`
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

fn reply(status: StatusCode, success: bool, message: &str) -> Response {
    (status, Json(SubscribeReply { success, message: message.to_string() })).into_response()
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.to_ascii_lowercase().starts_with("multipart/form-data"))
}

/// Read the `email` field from a urlencoded or multipart body.
/// A body that cannot be read yields `None`.
async fn read_email(request: Request) -> Option<String> {
    if is_multipart(request.headers()) {
        let mut multipart = match Multipart::from_request(request, &()).await {
            Ok(multipart) => multipart,
            Err(e) => {
                log::debug!("Rejected multipart body: {}", e);
                return None;
            }
        };
        while let Some(field) = multipart.next_field().await.ok()? {
            if field.name() == Some("email") {
                return field.text().await.ok();
            }
        }
        return None;
    }

    match Form::<SubscribeForm>::from_request(request, &()).await {
        Ok(Form(form)) => Some(form.email),
        Err(e) => {
            log::debug!("Rejected form body: {}", e);
            None
        }
    }
}

/// `POST /subscribe` with a single `email` field, urlencoded or multipart
pub async fn handle_subscribe(State(state): State<AppState>, request: Request) -> Response {
    let json = wants_json(request.headers());
    let email = read_email(request).await.unwrap_or_default();
    let result = state.subscriptions.subscribe(&email, Utc::now()).await;

    match (result, json) {
        (Ok(ProviderOutcome::Added), true) => {
            reply(StatusCode::OK, true, "Successfully subscribed!")
        }
        (Ok(ProviderOutcome::AlreadySubscribed), true) => {
            reply(StatusCode::OK, true, "You're already on the list!")
        }
        (Ok(_), false) => Redirect::to(THANKS_LOCATION).into_response(),
        (Err(SubscribeError::InvalidEmail), true) => {
            reply(StatusCode::BAD_REQUEST, false, &SubscribeError::InvalidEmail.to_string())
        }
        (Err(SubscribeError::Log(e)), true) => {
            log::error!("{}", e);
            reply(StatusCode::INTERNAL_SERVER_ERROR, false, "An error occurred. Please try again.")
        }
        (Err(SubscribeError::Provider(_)), true) => {
            reply(StatusCode::BAD_GATEWAY, false, "Subscription failed. Please try again.")
        }
        (Err(e), false) => {
            log::debug!("Redirecting failed subscription: {}", e);
            Redirect::to(ERROR_LOCATION).into_response()
        }
    }
}
