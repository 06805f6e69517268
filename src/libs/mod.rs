//! Core library modules for LifeScope.
//!
//! - **Session and storage**: persisted token and user, self-healing reads
//! - **Navigation**: routes, the login guard and view-bound cancellation
//! - **Task model**: roles, categories, tasks and analytics records
//! - **Aggregation**: weekly planner, due-today and Eisenhower groupings
//! - **Presentation**: tables, formatting, theme preference and messages
//!
//! ## Usage
//!
//! ```rust
//! use lifescope::libs::aggregation::{group_by_quadrant, percentage};
//!
//! let groups = group_by_quadrant(&[]);
//! assert!(groups.is_empty());
//! assert_eq!(percentage(1, 3), 33.3);
//! ```

pub mod aggregation;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod guard;
pub mod messages;
pub mod navigation;
pub mod scope;
pub mod session;
pub mod storage;
pub mod task;
pub mod theme;
pub mod view;
