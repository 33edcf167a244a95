//! Request extractors shared by the JSON endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::error::AppError;

/// JSON body extractor that answers rejections in the service's envelope.
///
/// `axum::Json` replies to malformed bodies with its own status codes and
/// plain-text messages; wrapping it routes every rejection through
/// [`AppError::InvalidBody`] so clients always see a 400 with the standard
/// `{"success": false, "error": ...}` body.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;
        Ok(Self(value))
    }
}
