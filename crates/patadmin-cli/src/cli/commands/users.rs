//! User administration commands.

use anyhow::{Context, Result, bail};
use comfy_table::{ContentArrangement, Table};
use patadmin_core::users::{Action, Pagination, Permissions, UserForm};
use patadmin_types::{UserDraft, UserRecord};

use super::{password_or_prompt, read_line, report_field_errors};
use crate::cli::ProfileArgs;
use crate::cli::app::App;

/// Optional field overrides for `users update`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct UserChanges {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    cpf: Option<String>,
    #[arg(long, value_name = "DATE")]
    birth_date: Option<String>,
    #[arg(long)]
    municipality: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// New password (keeps the current one when omitted)
    #[arg(long)]
    password: Option<String>,
    /// Grant or revoke administrator rights
    #[arg(long, value_name = "BOOL")]
    admin: Option<bool>,
    /// Activate or deactivate the account
    #[arg(long, value_name = "BOOL")]
    active: Option<bool>,
}

impl UserChanges {
    fn apply(self, draft: &mut UserDraft) {
        let set = |target: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *target = value.trim().to_string();
            }
        };
        set(&mut draft.name, self.name);
        set(&mut draft.last_name, self.last_name);
        set(&mut draft.cpf, self.cpf);
        set(&mut draft.birth_date, self.birth_date);
        set(&mut draft.municipality, self.municipality);
        set(&mut draft.email, self.email);
        if self.password.is_some() {
            draft.password = self.password;
        }
        if let Some(admin) = self.admin {
            draft.is_admin = admin;
        }
        if let Some(active) = self.active {
            draft.active = active;
        }
    }
}

fn ensure_allowed(app: &App, action: Action) -> Result<()> {
    app.profile()?;
    if !Permissions::for_session(&app.auth.session().get()).allows(action) {
        bail!("Only administrators can {action}");
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn users_table(users: &[UserRecord]) -> Table {
    let mut table = new_table();
    table.set_header(["ID", "Name", "Email", "CPF", "Municipality", "Type", "Active"]);
    for user in users {
        table.add_row([
            user.id.to_string(),
            user.full_name(),
            user.email.clone(),
            user.cpf.clone(),
            user.municipality.clone(),
            user.role().label().to_string(),
            yes_no(user.active).to_string(),
        ]);
    }
    table
}

fn user_detail_table(user: &UserRecord) -> Table {
    let mut table = new_table();
    table.set_header(["Field", "Value"]);
    let rows = [
        ("ID", user.id.to_string()),
        ("Name", user.full_name()),
        ("Email", user.email.clone()),
        ("CPF", user.cpf.clone()),
        ("Birth date", user.birth_date.clone()),
        ("Municipality", user.municipality.clone()),
        ("Type", user.role().label().to_string()),
        ("Active", yes_no(user.active).to_string()),
    ];
    for (field, value) in rows {
        table.add_row([field.to_string(), value]);
    }
    table
}

/// Lists one page. `page` starts at 1.
pub async fn list(app: &App, page: u32, search: Option<&str>, json: bool) -> Result<()> {
    ensure_allowed(app, Action::View)?;

    let mut pagination = Pagination::new(app.config.page_size());
    if let Some(search) = search {
        pagination.set_search(search);
    }
    pagination.go_to(page.saturating_sub(1));

    let result = app
        .users()
        .list(&pagination.query())
        .await
        .context("list users")?;
    pagination.set_total(result.total);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("serialize users")?
        );
        return Ok(());
    }

    if result.users.is_empty() {
        println!("No users found.");
    } else {
        println!("{}", users_table(&result.users));
    }
    println!(
        "{}  (page {} of {})",
        pagination.range_label(),
        pagination.page() + 1,
        pagination.page_count()
    );

    let last = pagination.clamp(pagination.page());
    if last < pagination.page() {
        println!("The last page is {}.", last + 1);
    } else if pagination.has_next() {
        println!("More users: --page {}", pagination.page() + 2);
    }
    Ok(())
}

pub async fn show(app: &App, id: u64, json: bool) -> Result<()> {
    ensure_allowed(app, Action::View)?;
    let user = app
        .users()
        .get(id)
        .await
        .with_context(|| format!("load user {id}"))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&user).context("serialize user")?
        );
    } else {
        println!("{}", user_detail_table(&user));
    }
    Ok(())
}

pub async fn create(
    app: &App,
    profile: ProfileArgs,
    password: Option<String>,
    admin: bool,
    active: bool,
) -> Result<()> {
    ensure_allowed(app, Action::Create)?;
    let password = password_or_prompt(password)?;

    let draft = UserDraft {
        id: None,
        name: profile.name.trim().to_string(),
        last_name: profile.last_name.trim().to_string(),
        email: profile.email.trim().to_string(),
        cpf: profile.cpf.trim().to_string(),
        birth_date: profile.birth_date.trim().to_string(),
        municipality: profile.municipality.trim().to_string(),
        password: Some(password),
        is_admin: admin,
        active,
    };
    if let Err(errors) = UserForm::for_draft(&draft).validate() {
        report_field_errors(&errors);
        bail!("Invalid user details");
    }

    let user = app
        .users()
        .create(&draft)
        .await
        .context("create user")?;
    println!("Created user {} ({})", user.id, user.full_name());
    Ok(())
}

pub async fn update(app: &App, id: u64, changes: UserChanges) -> Result<()> {
    ensure_allowed(app, Action::Edit)?;
    let users = app.users();

    let existing = users
        .get(id)
        .await
        .with_context(|| format!("load user {id}"))?;
    let mut draft = UserDraft::from_record(&existing);
    changes.apply(&mut draft);

    if let Err(errors) = UserForm::for_draft(&draft).validate() {
        report_field_errors(&errors);
        bail!("Invalid user details");
    }

    let user = users
        .update(id, &draft)
        .await
        .with_context(|| format!("update user {id}"))?;
    println!("Updated user {} ({})", user.id, user.full_name());
    Ok(())
}

pub async fn remove(app: &App, id: u64, yes: bool) -> Result<()> {
    ensure_allowed(app, Action::Remove)?;
    let users = app.users();

    let user = users
        .get(id)
        .await
        .with_context(|| format!("load user {id}"))?;
    let name = user.full_name();

    if !yes {
        let answer = read_line(&format!(
            "Confirm removal of user \"{name}\"? This action cannot be undone. [y/N] "
        ))?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            app.inform("Cancelled.");
            return Ok(());
        }
    }

    users
        .remove(id)
        .await
        .with_context(|| format!("remove user {id}"))?;
    app.inform(format!("Removed user {id} ({name})"));
    Ok(())
}
