//! JSON body extractor that runs `validator` rules before the handler sees it.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

/// Deserialize and validate a request body.
///
/// Malformed JSON, missing required fields and rule violations all reject
/// with [`AppError::Validation`] (400).
///
/// ```rust,ignore
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUserRequest>) {
///     // every field rule has already passed
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::validation(describe(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// One message per failed rule, ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: invalid ({})", field, e.code),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
