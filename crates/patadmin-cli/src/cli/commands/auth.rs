//! Sign-in, registration and sign-out.

use anyhow::{Context, Result, bail};
use patadmin_core::auth::AuthSignal;
use patadmin_core::session::SessionFile;
use patadmin_core::users::UserForm;
use patadmin_types::{AuthIntent, Credentials, RegistrationRequest, Route};

use super::{password_or_prompt, report_field_errors, users};
use crate::cli::ProfileArgs;
use crate::cli::app::App;

pub async fn login(app: &mut App, email: &str, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let mut signals = app.auth.subscribe();

    app.auth
        .dispatch(AuthIntent::SignInRequested(Credentials::new(email.trim(), password)));
    app.auth.run_until_idle().await;

    if !matches!(signals.try_recv(), Ok(AuthSignal::SignInSuccess)) {
        bail!("Sign-in failed");
    }

    let profile = app.profile()?;
    println!("Signed in as {} ({})", profile.full_name(), profile.role());

    if app.navigator.take() == Some(Route::UsersListing) {
        users::list(app, 1, None, false).await?;
    }
    Ok(())
}

pub async fn register(app: &mut App, profile: ProfileArgs, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let request = RegistrationRequest {
        name: profile.name.trim().to_string(),
        last_name: profile.last_name.trim().to_string(),
        cpf: profile.cpf.trim().to_string(),
        birth_date: profile.birth_date.trim().to_string(),
        municipality: profile.municipality.trim().to_string(),
        email: profile.email.trim().to_string(),
        password,
    };
    if let Err(errors) = UserForm::for_registration(&request).validate() {
        report_field_errors(&errors);
        bail!("Invalid registration details");
    }

    let email = request.email.clone();
    let mut signals = app.auth.subscribe();
    app.auth.dispatch(AuthIntent::SignUpRequested(request));
    app.auth.run_until_idle().await;

    if !matches!(signals.try_recv(), Ok(AuthSignal::SignUpSuccess)) {
        bail!("Registration failed");
    }
    app.inform(format!("Account created. Sign in with `patadmin login --email {email}`."));
    Ok(())
}

pub fn logout(app: &mut App) {
    app.auth.dispatch(AuthIntent::SignOutRequested);
    app.inform("Signed out.");
}

/// Reads the stored session directly; no backend call.
pub fn whoami(json: bool) -> Result<()> {
    let session = SessionFile::default_location()
        .load()
        .context("load session")?
        .filter(|s| s.is_signed_in());
    let user = session.and_then(|s| s.user);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&user).context("serialize profile")?
        );
        return Ok(());
    }

    match user {
        Some(user) => println!("{} <{}> ({})", user.full_name(), user.email, user.role()),
        None => println!("Not signed in."),
    }
    Ok(())
}
