/// Every user-facing message of the application.
///
/// Text lives in one place, the `Display` implementation in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleApi,
    ConfigModulePlanner,

    // === SESSION MESSAGES ===
    LoginRequired(String), // requested view
    LoggedIn(String),      // username
    LoggedInAs(String, String), // username, email
    LoggedOut,
    Registered(String), // username
    LoginFailed(String),
    RegisterFailed(String),
    NotLoggedIn,
    ResumingView(String), // view path
    PasswordsDoNotMatch,

    // === ROLE MESSAGES ===
    RolesHeader,
    NoRoles,
    NoRolesCreateFirst,
    RoleCreated(String),
    RoleUpdated(String),
    RoleDeleted(i64),
    ConfirmDeleteRole(String),
    RoleNotFound(i64),

    // === CATEGORY MESSAGES ===
    CategoriesHeader,
    NoCategories,
    CategoryCreated(String),
    CategoryUpdated(String),
    CategoryDeleted(i64),
    ConfirmDeleteCategory(String),
    CategoryNotFound(i64),
    InvalidColor(String),

    // === TASK MESSAGES ===
    TasksHeader,
    NoTasksFound,
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(i64),
    TaskCompleted(String),
    TaskReopened(String),
    TaskMoved(String, String), // title, day
    ConfirmDeleteTask(String),
    CompletionRate(f64),
    InvalidDate(String),
    NoChangesDetected,
    NothingDeleted,

    // === PLANNER MESSAGES ===
    WeekHeader(String, String), // first day, last day
    NoTasksForDay,
    DueTodayHeader,
    NoTasksDueToday,
    MatrixHeader,
    NoTasksInQuadrant,
    DashboardHeader,
    LocalAnalyticsNote,

    // === PROFILE MESSAGES ===
    ProfileHeader,
    ProfileUpdated,

    // === THEME MESSAGES ===
    ThemeCurrent(String),
    ThemeChanged(String),

    // === PROMPTS ===
    PromptSelectModules,
    PromptApiUrl,
    PromptWeekStart,
    PromptEmail,
    PromptPassword,
    PromptPasswordConfirm,
    PromptUsername,
    PromptCurrentPassword,
    PromptNewPassword,
    PromptChangePassword,
    PromptRoleName,
    PromptRoleDescription,
    PromptSelectRole,
    PromptCategoryName,
    PromptCategoryDescription,
    PromptCategoryColor,
    PromptSelectCategory,
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskStatus,
    PromptTaskPriority,
    PromptTaskQuadrant,
    PromptTaskDueDate,
    PromptTaskRecurrence,
    PromptEstimatedHours,
    PromptActualHours,

    // === GENERAL MESSAGES ===
    OperationCancelled,
    RequestFailed(String),
    ViewCancelled,
}
