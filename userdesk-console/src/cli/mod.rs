//! `userdesk` command-line front-end.
//!
//! Each subcommand drives the user management domain through the
//! [`Runtime`], then prints the resulting state. Remote failures arrive as
//! notices and turn into a non-zero exit code.

pub mod prompt;
pub mod render;

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{LevelFilter, debug, info};
use userdesk_model::{FieldKey, UserId};

use crate::domains::user_management::{
    form::FormMode,
    messages::{Message, UserManagementEvent},
};
use crate::infra::{
    api_client::ApiClient,
    config::Config,
    services::{UserAdminApiAdapter, UserAdminService},
    testing::stubs::StubUserAdminService,
};
use crate::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(
    name = "userdesk",
    version,
    about = "List, search, create, edit and delete users on a remote REST service"
)]
pub struct Cli {
    /// Base URL of the user service (overrides USERDESK_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Work against an in-memory service seeded with demo users
    #[arg(long, global = true)]
    pub offline_demo: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and print the user list
    List {
        /// Only show users whose name contains TERM (case-insensitive)
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
    },
    /// Fetch and print one user
    Show { id: UserId },
    /// Create a user, prompting for fields not given as flags
    Create {
        #[command(flatten)]
        fields: FieldArgs,
        /// Never prompt; fail if the flags do not form a valid user
        #[arg(long)]
        non_interactive: bool,
    },
    /// Edit an existing user
    Edit {
        id: UserId,
        #[command(flatten)]
        fields: FieldArgs,
        /// Never prompt; submit the flags as given
        #[arg(long)]
        non_interactive: bool,
    },
    /// Delete a user
    Delete {
        id: UserId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
}

impl FieldArgs {
    /// Fields given on the command line, in form order.
    pub fn provided(&self) -> Vec<(FieldKey, String)> {
        [
            (FieldKey::Name, &self.name),
            (FieldKey::Email, &self.email),
            (FieldKey::Phone, &self.phone),
            (FieldKey::AddressStreet, &self.street),
            (FieldKey::AddressCity, &self.city),
            (FieldKey::CompanyName, &self.company),
            (FieldKey::Website, &self.website),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }
}

fn build_service(cli: &Cli) -> Result<Arc<dyn UserAdminService>> {
    if cli.offline_demo {
        info!("Using in-memory demo service");
        return Ok(Arc::new(StubUserAdminService::with_demo_users()));
    }
    let config = Config::load(cli.config.as_deref(), cli.api_url.clone())
        .context("Failed to load configuration")?;
    info!("Using user service at {}", config.api_url);
    let client = ApiClient::new(&config.api_url, config.request_timeout())
        .context("Failed to set up the HTTP client")?;
    Ok(Arc::new(UserAdminApiAdapter::new(Arc::new(client))))
}

/// Print and dismiss pending notices; true if there were any.
fn report_notices(runtime: &mut Runtime) -> bool {
    let notices = runtime.domain().notices();
    if notices.is_empty() {
        return false;
    }
    eprint!("{}", render::notices(notices));
    runtime.dispatch(Message::DismissNotices);
    true
}

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let service = build_service(&cli)?;
    let mut runtime = Runtime::new(service);

    let code = match cli.command {
        Command::List { search } => list(&mut runtime, search).await,
        Command::Show { id } => show(&mut runtime, id).await,
        Command::Create {
            fields,
            non_interactive,
        } => {
            runtime.dispatch(Message::CreateUser);
            fill_and_submit(&mut runtime, &fields, non_interactive).await?
        }
        Command::Edit {
            id,
            fields,
            non_interactive,
        } => edit(&mut runtime, id, &fields, non_interactive).await?,
        Command::Delete { id, yes } => delete(&mut runtime, id, yes).await?,
    };

    runtime.dispatch(Message::Unmount);
    Ok(code)
}

async fn load(runtime: &mut Runtime) -> bool {
    runtime.dispatch(Message::LoadUsers);
    runtime.run_until_idle().await;
    !report_notices(runtime)
}

async fn list(runtime: &mut Runtime, search: Option<String>) -> ExitCode {
    if !load(runtime).await {
        return ExitCode::FAILURE;
    }
    if let Some(term) = search {
        runtime.dispatch(Message::SearchChanged(term));
    }
    print!("{}", render::user_table(&runtime.domain().filtered_users()));
    ExitCode::SUCCESS
}

async fn show(runtime: &mut Runtime, id: UserId) -> ExitCode {
    runtime.dispatch(Message::ShowUser(id));
    runtime.run_until_idle().await;
    if report_notices(runtime) {
        return ExitCode::FAILURE;
    }
    match runtime.domain().state.detail.user() {
        Some(user) => {
            print!("{}", render::user_detail(user));
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}

async fn edit(
    runtime: &mut Runtime,
    id: UserId,
    fields: &FieldArgs,
    non_interactive: bool,
) -> Result<ExitCode> {
    if !load(runtime).await {
        return Ok(ExitCode::FAILURE);
    }
    runtime.dispatch(Message::EditUser(id));
    if !runtime.domain().state.form.is_open() {
        eprintln!("User {id} not found");
        return Ok(ExitCode::FAILURE);
    }
    fill_and_submit(runtime, fields, non_interactive).await
}

fn current_value(runtime: &Runtime, key: FieldKey) -> String {
    runtime
        .domain()
        .state
        .form
        .open_form()
        .map(|form| form.draft.get(key).to_string())
        .unwrap_or_default()
}

fn prompt_fields(
    runtime: &mut Runtime,
    keys: impl IntoIterator<Item = FieldKey>,
) -> Result<()> {
    for key in keys {
        let value = prompt::field(key, &current_value(runtime, key))?;
        runtime.dispatch(Message::FormFieldChanged(key, value));
    }
    Ok(())
}

/// Drive an open form to completion: apply flags, prompt, submit, and
/// re-prompt for whatever fails validation.
async fn fill_and_submit(
    runtime: &mut Runtime,
    fields: &FieldArgs,
    non_interactive: bool,
) -> Result<ExitCode> {
    let provided = fields.provided();
    let given: Vec<FieldKey> = provided.iter().map(|(key, _)| *key).collect();
    for (key, value) in provided {
        runtime.dispatch(Message::FormFieldChanged(key, value));
    }

    let is_create = runtime
        .domain()
        .state
        .form
        .open_form()
        .is_some_and(|form| form.mode == FormMode::Create);
    // Edits with explicit flags only touch those fields.
    if !non_interactive && (is_create || given.is_empty()) {
        let missing = FieldKey::ALL.into_iter().filter(|k| !given.contains(k));
        prompt_fields(runtime, missing)?;
    }

    loop {
        runtime.dispatch(Message::FormSubmit);
        runtime.run_until_idle().await;

        for event in runtime.drain_events() {
            match event {
                UserManagementEvent::UserCreated(user) => {
                    println!("Created user {}", user.name);
                }
                UserManagementEvent::UserUpdated(user) => {
                    println!("Updated user {}", user.name);
                }
                UserManagementEvent::ValidationFailed(errors) => {
                    eprintln!("Please fix the following:");
                    eprint!("{}", render::validation_errors(&errors));
                    if non_interactive {
                        return Ok(ExitCode::FAILURE);
                    }
                    prompt_fields(runtime, errors.iter().map(|(key, _)| key))?;
                }
                other => debug!("Ignoring event {:?}", other),
            }
        }

        let had_notices = report_notices(runtime);
        // A closed form means the write went through; a failed refetch
        // afterwards does not undo it.
        if !runtime.domain().state.form.is_open() {
            return Ok(ExitCode::SUCCESS);
        }
        if had_notices
            && (non_interactive || !prompt::confirm("Try again?", true)?)
        {
            return Ok(ExitCode::FAILURE);
        }
    }
}

async fn delete(
    runtime: &mut Runtime,
    id: UserId,
    yes: bool,
) -> Result<ExitCode> {
    runtime.dispatch(Message::DeleteUser(id));
    let confirmed = yes
        || prompt::confirm(
            &format!("Are you sure you want to delete user {id}?"),
            false,
        )?;
    if !confirmed {
        runtime.dispatch(Message::DeleteUserCancel);
        eprintln!("Cancelled");
        return Ok(ExitCode::FAILURE);
    }

    runtime.dispatch(Message::DeleteUserConfirm(id));
    runtime.run_until_idle().await;
    if report_notices(runtime) {
        return Ok(ExitCode::FAILURE);
    }
    println!("Deleted user {id}");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::stubs::StubOperation;

    #[test]
    fn field_flags_map_to_form_keys() {
        let cli = Cli::try_parse_from([
            "userdesk",
            "create",
            "--name",
            "Ann Lee",
            "--city",
            "Springfield",
            "--non-interactive",
        ])
        .unwrap();
        let Command::Create {
            fields,
            non_interactive,
        } = cli.command
        else {
            panic!("expected create");
        };
        assert!(non_interactive);
        assert_eq!(
            fields.provided(),
            vec![
                (FieldKey::Name, "Ann Lee".to_string()),
                (FieldKey::AddressCity, "Springfield".to_string()),
            ]
        );
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "userdesk",
            "delete",
            "3",
            "--yes",
            "--offline-demo",
            "-vv",
        ])
        .unwrap();
        assert!(cli.offline_demo);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
        assert!(matches!(
            cli.command,
            Command::Delete {
                id: UserId(3),
                yes: true
            }
        ));
    }

    #[test]
    fn bad_id_is_rejected() {
        assert!(Cli::try_parse_from(["userdesk", "show", "abc"]).is_err());
    }

    #[tokio::test]
    async fn non_interactive_create_against_demo_service() {
        let cli = Cli::try_parse_from([
            "userdesk",
            "--offline-demo",
            "create",
            "--non-interactive",
            "--name",
            "Ann Lee",
            "--email",
            "ann@example.com",
            "--phone",
            "+15550100",
            "--street",
            "1 Main St",
            "--city",
            "Springfield",
        ])
        .unwrap();
        assert_eq!(run(cli).await.unwrap(), ExitCode::SUCCESS);
    }

    #[tokio::test]
    async fn non_interactive_create_with_invalid_fields_fails() {
        let cli = Cli::try_parse_from([
            "userdesk",
            "--offline-demo",
            "create",
            "--non-interactive",
            "--name",
            "Al",
        ])
        .unwrap();
        assert_eq!(run(cli).await.unwrap(), ExitCode::FAILURE);
    }

    fn valid_fields() -> FieldArgs {
        FieldArgs {
            name: Some("Ann Lee".into()),
            email: Some("ann@example.com".into()),
            phone: Some("+15550100".into()),
            street: Some("1 Main St".into()),
            city: Some("Springfield".into()),
            ..FieldArgs::default()
        }
    }

    #[tokio::test]
    async fn create_succeeds_even_if_the_refetch_fails() {
        let stub = StubUserAdminService::with_demo_users();
        stub.fail(StubOperation::List);
        let mut runtime = Runtime::new(Arc::new(stub.clone()));
        runtime.dispatch(Message::CreateUser);

        let code = fill_and_submit(&mut runtime, &valid_fields(), true)
            .await
            .unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(stub.users().len(), 5);
        assert!(!runtime.domain().state.form.is_open());
        assert!(runtime.domain().notices().is_empty());
    }

    #[tokio::test]
    async fn failed_create_exits_with_failure_when_non_interactive() {
        let stub = StubUserAdminService::with_demo_users();
        stub.fail(StubOperation::Create);
        let mut runtime = Runtime::new(Arc::new(stub.clone()));
        runtime.dispatch(Message::CreateUser);

        let code = fill_and_submit(&mut runtime, &valid_fields(), true)
            .await
            .unwrap();

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(stub.users().len(), 4);
        assert!(runtime.domain().state.form.is_open());
    }
}
