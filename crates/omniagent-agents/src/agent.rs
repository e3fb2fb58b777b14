use omniagent_types::AgentId;
use serde::Serialize;

/// What the dispatcher hands back when a remote call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// A short fixed apology
    ErrorNotice,
    /// A synthesized multi-expert answer quoting the query
    TeamFallback,
}

/// How a message for an agent is delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    Remote {
        path: String,
        forwards_team_mode: bool,
        failure: FailurePolicy,
    },
    /// Answered locally after a delay, no network call
    Simulated,
}

impl Route {
    pub fn remote(path: impl Into<String>) -> Self {
        Route::Remote {
            path: path.into(),
            forwards_team_mode: false,
            failure: FailurePolicy::ErrorNotice,
        }
    }

    pub fn team(path: impl Into<String>) -> Self {
        Route::Remote {
            path: path.into(),
            forwards_team_mode: true,
            failure: FailurePolicy::TeamFallback,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Route::Remote { path, .. } => Some(path),
            Route::Simulated => None,
        }
    }
}

/// A conversational backend the user can pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub description: String,
    pub route: Route,
}

impl Agent {
    pub fn new(
        id: AgentId,
        name: impl Into<String>,
        description: impl Into<String>,
        route: Route,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            route,
        }
    }

    /// True for the multi-agent backend, the only one that takes a team mode
    pub fn is_team(&self) -> bool {
        matches!(
            self.route,
            Route::Remote {
                forwards_team_mode: true,
                ..
            }
        )
    }
}
