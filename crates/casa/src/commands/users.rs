//! Login, registration, and user account handlers.

use std::io::IsTerminal;

use secrecy::SecretString;
use tabled::Tabled;

use casa_core::{Casa, NewAccount, User};

use crate::cli::{LoginArgs, RegisterArgs, UsersArgs, UsersCommand};
use crate::config::Settings;
use crate::error::{CliError, During};
use crate::output;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            status: u.status.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Use the given password, or prompt for one without echo.
fn password(given: Option<String>) -> Result<SecretString, CliError> {
    if let Some(pw) = given {
        return Ok(SecretString::from(pw));
    }
    let pw = rpassword::prompt_password("Password: ")?;
    Ok(SecretString::from(pw))
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
fn confirm(message: &str, yes_flag: bool, action: &str) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn login(casa: &Casa, args: LoginArgs, settings: &Settings) -> Result<(), CliError> {
    let secret = password(args.password)?;
    let session = casa.login(&args.email, &secret).await.during("login")?;
    let out = output::render_single(
        settings.output,
        &session,
        |s| format!("Logged in as {}", s.email),
        |s| s.email.clone(),
    );
    output::print_output(&out, settings.quiet);
    Ok(())
}

pub async fn register(casa: &Casa, args: RegisterArgs, settings: &Settings) -> Result<(), CliError> {
    let account = NewAccount {
        name: args.name,
        email: args.email,
        password: password(args.password)?,
        status: args.status,
    };
    casa.register(&account).await.during("register")?;
    output::print_status(&format!("Account created for {}", account.email), settings.quiet);
    Ok(())
}

pub async fn handle(casa: &Casa, args: UsersArgs, settings: &Settings) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List => {
            let users = casa.list_users().await.during("list users")?;
            let out = output::render_list(
                settings.output,
                &users,
                |u| UserRow::from(u),
                |u| u.id.to_string(),
            );
            output::print_output(&out, settings.quiet);
        }

        UsersCommand::Delete { id } => {
            if !confirm(&format!("Delete user {id}?"), settings.yes, "users delete")? {
                return Ok(());
            }
            casa.delete_user(id).await.during(&format!("delete user {id}"))?;
            output::print_status(&format!("User {id} deleted"), settings.quiet);
        }
    }
    Ok(())
}
