//! Command-line surface of LifeScope.
//!
//! Each subcommand corresponds to one view of the application. Commands for
//! protected views pass through the route guard first; when there is no valid
//! session the user is asked to log in and the command then resumes.

pub mod categories;
pub mod dashboard;
pub mod init;
pub mod login;
pub mod logout;
pub mod matrix;
pub mod profile;
pub mod register;
pub mod roles;
pub mod tasks;
pub mod theme;
pub mod today;
pub mod weekly;

use crate::{
    api::Api,
    libs::{
        config::Config,
        error::ApiError,
        guard::{GuardDecision, RouteGuard},
        messages::Message,
        navigation::{Navigator, Route},
        scope::{ScopeGuard, ViewScope},
        session::SessionStore,
        storage::{FileStorage, Storage},
        theme::ThemeMode,
        view::View,
    },
    msg_debug, msg_info,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Log in to the LifeScope service")]
    Login(login::LoginArgs),
    #[command(about = "Create an account")]
    Register(register::RegisterArgs),
    #[command(about = "Log out and forget the stored session")]
    Logout,
    #[command(about = "Show or edit the profile")]
    Profile(profile::ProfileArgs),
    #[command(about = "Manage roles")]
    Roles(roles::RolesArgs),
    #[command(about = "Manage task categories")]
    Categories(categories::CategoriesArgs),
    #[command(about = "List and manage tasks")]
    Tasks(tasks::TasksArgs),
    #[command(about = "Weekly planner grouped by day and role")]
    Weekly(weekly::WeeklyArgs),
    #[command(about = "Tasks due today grouped by role")]
    Today,
    #[command(about = "Eisenhower matrix")]
    Matrix(matrix::MatrixArgs),
    #[command(about = "Completion analytics")]
    Dashboard(dashboard::DashboardArgs),
    #[command(about = "Show or switch the color theme")]
    Theme(theme::ThemeArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        if let Commands::Init(args) = cli.command {
            return init::cmd(args);
        }

        let ctx = AppContext::open()?;
        let shutdown = ctx.shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
                msg_info!(Message::OperationCancelled);
                std::process::exit(130);
            }
        });

        let result = match cli.command {
            Commands::Init(_) => Ok(()),
            Commands::Login(args) => login::cmd(&ctx, args).await,
            Commands::Register(args) => register::cmd(&ctx, args).await,
            Commands::Logout => logout::cmd(&ctx),
            Commands::Profile(args) => profile::cmd(&ctx, args).await,
            Commands::Roles(args) => roles::cmd(&ctx, args).await,
            Commands::Categories(args) => categories::cmd(&ctx, args).await,
            Commands::Tasks(args) => tasks::cmd(&ctx, args).await,
            Commands::Weekly(args) => weekly::cmd(&ctx, args).await,
            Commands::Today => today::cmd(&ctx).await,
            Commands::Matrix(args) => matrix::cmd(&ctx, args).await,
            Commands::Dashboard(args) => dashboard::cmd(&ctx, args).await,
            Commands::Theme(args) => theme::cmd(&ctx, args),
        };

        if let Err(e) = &result {
            tracing::error!(error = %e, "command failed");
        }
        result
    }
}

/// Everything a command needs: configuration, the persisted session and the API client.
pub struct AppContext {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub session: Arc<SessionStore>,
    pub api: Api,
    pub shutdown: CancellationToken,
}

impl AppContext {
    /// Context over the on-disk storage and configuration.
    pub fn open() -> Result<Self> {
        let config = Config::read()?;
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open_default()?);
        Ok(Self::with_storage(config, storage))
    }

    pub fn with_storage(config: Config, storage: Arc<dyn Storage>) -> Self {
        let navigator = Arc::new(Navigator::default());
        let session = Arc::new(SessionStore::new(storage.clone(), navigator));
        let api = Api::new(&config.api_url(), session.clone());
        tracing::debug!(api_url = %api.base_url(), "context ready");
        Self {
            config,
            storage,
            session,
            api,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        self.session.navigator()
    }

    pub fn view(&self) -> View {
        View::new(ThemeMode::load(self.storage.as_ref()))
    }

    /// Scope for one view's fetches; cancelled on Ctrl-C or when the guard is dropped.
    pub fn scope(&self) -> ScopeGuard {
        ScopeGuard::new(ViewScope::child_of(&self.shutdown))
    }

    /// Opens a protected view, logging in interactively first when needed.
    pub async fn enter(&self, route: Route) -> Result<()> {
        let mut guard = RouteGuard::new();
        match guard.check(&self.session, route) {
            GuardDecision::Allow(_) => Ok(()),
            GuardDecision::RedirectToLogin { from } => {
                msg_info!(Message::LoginRequired(from.path()));
                login::interactive(self, None).await?;
                let resumed = self.navigator().resume();
                msg_debug!(Message::ResumingView(resumed.path()));
                match guard.check(&self.session, resumed) {
                    GuardDecision::Allow(_) => Ok(()),
                    GuardDecision::RedirectToLogin { .. } => anyhow::bail!("{}", Message::NotLoggedIn),
                }
            }
        }
    }
}

/// Runs a view-bound request. A cancelled view yields `Ok(None)`.
pub(crate) async fn fetch<F, T>(scope: &ScopeGuard, fut: F) -> Result<Option<T>>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match scope.scope().run(fut).await {
        Some(Ok(value)) => Ok(Some(value)),
        Some(Err(e)) => Err(e.into()),
        None => {
            msg_debug!(Message::ViewCancelled);
            Ok(None)
        }
    }
}
