//! Validate command - check a registration form

use anyhow::{bail, Result};
use bookbuddy_core::services::validation::validate_registration;
use bookbuddy_core::services::RegistrationData;
use dialoguer::Password;
use serde_json::json;

use crate::output;

fn prompt_password(label: &str) -> Result<String> {
    if atty::isnt(atty::Stream::Stdin) {
        bail!("{} not given and stdin is not a terminal", label);
    }
    Ok(Password::new()
        .with_prompt(label)
        .allow_empty_password(true)
        .interact()?)
}

pub fn run(
    username: String,
    email: String,
    password: Option<String>,
    confirm: Option<String>,
    agree_terms: bool,
    json: bool,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password("Password")?,
    };
    let confirm_password = match confirm {
        Some(c) => c,
        None => prompt_password("Confirm password")?,
    };

    let data = RegistrationData {
        username,
        email,
        password,
        confirm_password,
        agree_to_terms: agree_terms,
    };
    let errors = validate_registration(&data);

    if json {
        let value = json!({
            "valid": errors.is_empty(),
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        if errors.is_empty() {
            return Ok(());
        }
        bail!("Registration form is invalid");
    }

    if errors.is_empty() {
        output::success("Registration form is valid");
        return Ok(());
    }

    errors.into_result()?;
    Ok(())
}
