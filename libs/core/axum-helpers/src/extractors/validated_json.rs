//! JSON extractor that validates the body before the handler runs.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// `Json<T>` plus a `validator::Validate` pass.
///
/// Malformed bodies and failed validation both reject as [`AppError`],
/// which renders the uniform `{status, detail}` envelope with a 4xx
/// status.
///
/// ```ignore
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateSweet>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
