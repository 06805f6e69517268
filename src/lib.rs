//! # LifeScope
//!
//! A command-line client for the LifeScope task service. Tasks belong to
//! roles, are placed in Eisenhower quadrants and are planned across the week.
//!
//! ## Features
//!
//! - **Accounts**: register, log in and out, edit the profile
//! - **Roles and Categories**: organize tasks by the roles you play
//! - **Task Management**: create, edit, complete and reschedule tasks
//! - **Planning Views**: weekly planner, due today and the Eisenhower matrix
//! - **Analytics**: completion rate, overdue count and quadrant distribution
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lifescope::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
