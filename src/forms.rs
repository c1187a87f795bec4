//! Submitted-form handling: trimming, required-field checks and `validator`
//! rules, with per-field messages kept for redisplay.

use std::collections::BTreeMap;

use serde::de::value::{Error as DeError, MapDeserializer};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::db::models::NewComment;
use crate::error::AppError;

pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Field-level error messages, in stable field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages for one field; empty when the field is clean.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Merge `validator` output, skipping fields already flagged as missing.
    fn extend_from(&mut self, errors: &ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            let field: &str = field.as_ref();
            if self.field(field).iter().any(|m| m == REQUIRED_MESSAGE) {
                continue;
            }
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                self.add(field, message);
            }
        }
    }
}

/// A form type that can be bound to submitted data.
pub trait FormFields: Validate + Default {
    /// Fields that must be non-blank after trimming.
    const REQUIRED: &'static [&'static str];

    fn value(&self, field: &str) -> &str;

    fn trim(&mut self);
}

/// Form state: unbound (fresh) or bound to submitted data with its errors.
#[derive(Debug, Clone)]
pub struct BoundForm<T> {
    pub data: T,
    pub errors: FormErrors,
    bound: bool,
}

impl<T: FormFields> BoundForm<T> {
    pub fn unbound() -> Self {
        Self {
            data: T::default(),
            errors: FormErrors::default(),
            bound: false,
        }
    }

    pub fn bind(mut data: T) -> Self {
        data.trim();

        let mut errors = FormErrors::default();
        for field in T::REQUIRED {
            if data.value(field).is_empty() {
                errors.add(field, REQUIRED_MESSAGE);
            }
        }
        if let Err(e) = data.validate() {
            errors.extend_from(&e);
        }

        Self {
            data,
            errors,
            bound: true,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn is_valid(&self) -> bool {
        self.bound && self.errors.is_empty()
    }
}

/// Decode an `application/x-www-form-urlencoded` body. A repeated field keeps
/// its last value; the content type is not checked.
pub fn from_urlencoded<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    let fields: BTreeMap<String, String> = url::form_urlencoded::parse(body)
        .into_owned()
        .collect();
    let deserializer: MapDeserializer<'_, _, DeError> = MapDeserializer::new(fields.into_iter());
    T::deserialize(deserializer).map_err(|e| AppError::BadRequest(format!("Invalid form data: {e}")))
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Recommend-a-post form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EmailPostForm {
    #[validate(length(max = 25, message = "Ensure this value has at most 25 characters."))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub to: String,
    pub comments: String,
}

impl FormFields for EmailPostForm {
    const REQUIRED: &'static [&'static str] = &["name", "email", "to"];

    fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "email" => &self.email,
            "to" => &self.to,
            "comments" => &self.comments,
            _ => "",
        }
    }

    fn trim(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.email);
        trim_in_place(&mut self.to);
        trim_in_place(&mut self.comments);
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CommentForm {
    #[validate(length(max = 80, message = "Ensure this value has at most 80 characters."))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    pub body: String,
}

impl FormFields for CommentForm {
    const REQUIRED: &'static [&'static str] = &["name", "email", "body"];

    fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "email" => &self.email,
            "body" => &self.body,
            _ => "",
        }
    }

    fn trim(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.email);
        trim_in_place(&mut self.body);
    }
}

impl BoundForm<CommentForm> {
    /// The unsaved comment this form describes, if it validated.
    pub fn new_comment(&self) -> Option<NewComment> {
        self.is_valid().then(|| NewComment {
            name: self.data.name.clone(),
            email: self.data.email.clone(),
            body: self.data.body.clone(),
        })
    }
}
