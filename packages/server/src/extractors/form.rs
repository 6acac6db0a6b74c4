use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// A form extractor accepting both `application/x-www-form-urlencoded` and
/// `multipart/form-data` bodies.
///
/// Multipart text fields are collected by name; file parts are ignored.
/// Deserialization failures become `AppError::Validation`.
pub struct AppForm<T>(pub T);

impl<S, T> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return Ok(AppForm(value));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let mut fields = Map::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Read(format!("Multipart error: {e}")))?
        {
            if field.file_name().is_some() {
                continue;
            }
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Read(format!("Failed to read field '{name}': {e}")))?;
            fields.insert(name, Value::String(text));
        }

        serde_json::from_value(Value::Object(fields))
            .map(AppForm)
            .map_err(|e| AppError::Validation(format!("Invalid form: {e}")))
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}
