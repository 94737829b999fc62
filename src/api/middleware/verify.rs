//! Webhook authentication middleware.
//!
//! Runs before the webhook route: pulls the exact raw body bytes, checks the
//! `X-Hub-Signature-256` header against them, and rejects with 401 before
//! any parsing or business logic. On success the verified bytes are stashed
//! as a request extension so the handler never re-reads (and never diverges
//! from) what was actually signed.

use std::sync::LazyLock;

use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Request};
use axum::middleware::Next;
use axum::response::Response;
use http::StatusCode;
use tokio::sync::OnceCell;

use super::MiddlewareResult;
use crate::constants::GITHUB_SIGNATURE_HEADER;
use crate::util::env::{EnvResult, Var};
use crate::util::verify::SignatureVerifier;
use crate::var;

static VERIFIER: LazyLock<OnceCell<SignatureVerifier>> = LazyLock::new(OnceCell::new);
async fn get_verifier() -> EnvResult<&'static SignatureVerifier> {
    VERIFIER
        .get_or_try_init(|| async {
            let secret = var!(Var::GithubWebhookSecret).await?;
            Ok(SignatureVerifier::new(secret))
        })
        .await
}

#[derive(Clone)]
pub struct VerifiedBody(pub Bytes);

impl VerifiedBody {
    pub fn as_json<T>(&self) -> Result<T, serde_json::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_slice(&self.0)
    }
}

pub async fn verify_sender_ident(mut req: Request, next: Next) -> MiddlewareResult<Response> {
    let headers = req.headers().clone();
    let body = match extract_body(&mut req).await {
        Ok(bytes) => bytes,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };

    let supplied = headers
        .get(GITHUB_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let verifier = get_verifier()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !verifier.verify(&body, supplied) {
        tracing::error!("unable to verify webhook signature");
        return Err(StatusCode::UNAUTHORIZED);
    }

    req.extensions_mut().insert(VerifiedBody(body));
    Ok(next.run(req).await)
}

async fn extract_body(request: &mut Request) -> Result<Bytes, ()> {
    let body = std::mem::replace(request.body_mut(), Body::empty());
    axum::body::to_bytes(body, usize::MAX).await.map_err(|_| ())
}

impl<S> FromRequest<S> for VerifiedBody
where
    S: Send + Sync,
{
    type Rejection = StatusCode;
    async fn from_request(req: Request, _: &S) -> Result<Self, Self::Rejection> {
        req.extensions()
            .get::<VerifiedBody>()
            .cloned()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
