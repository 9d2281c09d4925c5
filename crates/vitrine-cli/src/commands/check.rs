use anyhow::{Context, Result};
use colored::Colorize;
use vitrine::{validate_contact, ContactOutcome, FormData};

/// Decode a contact form body
pub fn decode(body: &str, json: bool) -> Result<FormData> {
    if json {
        let value = serde_json::from_str(body).context("Body is not valid JSON")?;
        Ok(FormData::from_json(value))
    } else {
        Ok(FormData::from_urlencoded(body))
    }
}

/// Validate the submission, print the result and report whether it passed
pub fn execute(body: &str, json: bool) -> Result<bool> {
    let form = decode(body, json)?;

    match validate_contact(&form.to_params()) {
        ContactOutcome::Sent(envelope) => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            eprintln!("{} {}", "✓".green(), envelope.success);
            Ok(true)
        }
        ContactOutcome::Invalid(errors) => {
            println!("{}", serde_json::to_string_pretty(&errors)?);
            for error in errors.values() {
                eprintln!("{} {}: {}", "✗".red(), error.field.bold(), error);
            }
            Ok(false)
        }
    }
}
