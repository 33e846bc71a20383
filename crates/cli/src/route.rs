//! Navigation route table

use strum::{Display, EnumIter, IntoEnumIterator};

/// Top-level screens of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Route {
    #[strum(to_string = "HOME")]
    Home,
    #[strum(to_string = "CREATE")]
    Create,
    #[strum(to_string = "SEAL")]
    Seal,
    #[strum(to_string = "COMPLIANCE")]
    Compliance,
    #[strum(to_string = "AUDIT")]
    Audit,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Create => "/create",
            Route::Seal => "/upload",
            Route::Compliance => "/check",
            Route::Audit => "/audit",
        }
    }

    /// Resolve a path; unknown paths have no route
    pub fn from_path(path: &str) -> Option<Route> {
        Route::iter().find(|r| r.path() == path)
    }

    /// Subcommand that opens this screen
    pub fn command(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Create => "create",
            Route::Seal => "seal",
            Route::Compliance => "check",
            Route::Audit => "audit",
        }
    }

    /// Card title and description on the home screen
    pub fn card(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Route::Home => None,
            Route::Create => Some((
                "CREATE TENDER",
                "Define requirements and compliance criteria for procurement process.",
            )),
            Route::Seal => Some((
                "BID ENCRYPTION",
                "Seal a bid document; the service encrypts, hashes and notifies.",
            )),
            Route::Compliance => Some((
                "AI COMPLIANCE",
                "Check a bid summary against the tender requirements.",
            )),
            Route::Audit => Some((
                "AUDIT LOG",
                "Immutable record of every sealed bid with its hash.",
            )),
        }
    }
}
