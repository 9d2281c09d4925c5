//! Vitrine Validation
//!
//! Fluent validator for submitted form fields. Rules are chained on a
//! [`Validator`] built over a borrowed [`Params`] set; each failing rule
//! records one [`ValidationError`] per field.

pub mod date;
pub mod error;
pub mod params;
pub mod predicates;
pub mod upload;
pub mod validator;

pub use error::{Rule, ValidationError};
pub use params::{Params, Value};
pub use upload::{FileUpload, UploadStatus, UploadedFile};
pub use validator::{SuccessEnvelope, Validator};
