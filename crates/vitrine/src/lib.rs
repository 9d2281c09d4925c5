// Vitrine - marketing site toolkit
// Maud pages, Vite asset tags, site configuration and the contact form flow

pub mod assets;
pub mod config;
pub mod contact;
pub mod form_context;
pub mod form_data;
pub mod helpers;
pub mod pages;

// Re-export framework types
pub use assets::{asset, vite_assets};
pub use config::Config;
pub use contact::{validate_contact, ContactOutcome};
pub use form_context::FormContext;
pub use form_data::FormData;

// Re-export Maud for templates
pub use maud::{html as maud, Markup, PreEscaped, DOCTYPE};

// Re-export the validator
pub use vitrine_validation as validation;
