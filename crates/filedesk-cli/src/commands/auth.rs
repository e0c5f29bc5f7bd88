//! Login, signup and session commands.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use filedesk_core::error::AppError;
use filedesk_entity::user::SignupForm;
use filedesk_service::DriveContext;

use super::input_error;

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for `signup`
#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Account email (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Full name (prompted when omitted)
    #[arg(short, long)]
    pub name: Option<String>,
    /// Password (prompted with confirmation when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Identity shown by `whoami`
#[derive(Debug, Serialize)]
struct Identity {
    email: String,
    name: String,
    server: String,
}

/// Execute `login`
pub async fn login(args: &LoginArgs, ctx: &DriveContext, format: OutputFormat) -> Result<(), AppError> {
    let email = match &args.email {
        Some(e) => e.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(input_error)?,
    };

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(input_error)?,
    };

    let user = ctx.session.login(email.trim(), &password).await?;
    match format {
        OutputFormat::Json => output::print_item(&user, format),
        OutputFormat::Table => {
            output::print_success(&format!("Logged in as {}", user.display_name()))
        }
    }
    Ok(())
}

/// Execute `signup`
pub async fn signup(
    args: &SignupArgs,
    ctx: &DriveContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let full_name = match &args.name {
        Some(n) => n.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Full name")
            .interact_text()
            .map_err(input_error)?,
    };

    let email = match &args.email {
        Some(e) => e.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(input_error)?,
    };

    let (password, confirm_password) = match &args.password {
        Some(p) => (p.clone(), p.clone()),
        None => {
            let password: String = dialoguer::Password::new()
                .with_prompt("Password")
                .interact()
                .map_err(input_error)?;
            let confirm: String = dialoguer::Password::new()
                .with_prompt("Confirm password")
                .interact()
                .map_err(input_error)?;
            (password, confirm)
        }
    };

    let form = SignupForm {
        email,
        password,
        confirm_password,
        full_name,
    };

    let user = ctx.session.signup(&form).await?;
    match format {
        OutputFormat::Json => output::print_item(&user, format),
        OutputFormat::Table => output::print_success(&format!(
            "Account created, logged in as {}",
            user.display_name()
        )),
    }
    Ok(())
}

/// Execute `logout`
pub async fn logout(ctx: &DriveContext) -> Result<(), AppError> {
    if !ctx.session.is_authenticated().await {
        output::print_warning("Not logged in");
        return Ok(());
    }
    ctx.session.logout().await?;
    output::print_success("Logged out");
    Ok(())
}

/// Execute `whoami`
pub async fn whoami(ctx: &DriveContext, format: OutputFormat) -> Result<(), AppError> {
    let user = ctx
        .session
        .current_user()
        .await
        .ok_or_else(|| AppError::authentication("You are not logged in"))?;

    let identity = Identity {
        name: user.display_name().to_string(),
        email: user.email,
        server: ctx.config.api.base_url.clone(),
    };
    output::print_item(&identity, format);
    Ok(())
}
