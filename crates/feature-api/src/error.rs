use thiserror::Error;

/// Errors raised when an external caller asks to open the search results page.
///
/// Permission verification is the only operation on the capability boundary
/// that fails loud; every other operation degrades to an absent value or a
/// no-op so UI code never crashes because search is unavailable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    /// The caller reference was absent. An argument problem, never a
    /// security decision.
    #[error("caller identity is missing")]
    MissingCaller,

    /// The caller is known but not allowed to open the search results page.
    #[error("caller '{caller}' is not allowed to launch the search page")]
    Denied { caller: String },
}
