//! # omniagent-api
//!
//! Request dispatch for the omniagent chat agents.
//!
//! - **Transport**: the `Transport` trait and its reqwest implementation
//! - **Normalizer**: turns any decoded response body into display text
//! - **Dispatcher**: routes a query to the agent's endpoint and always
//!   produces display text, substituting fallback text on failure
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use omniagent_agents::AgentRegistry;
//! use omniagent_api::{Dispatcher, DispatcherConfig, HttpTransport};
//! use omniagent_types::{AgentId, TeamMode};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let transport = Arc::new(HttpTransport::new(None, false)?);
//!     let dispatcher = Dispatcher::new(
//!         Arc::new(AgentRegistry::builtin()),
//!         transport,
//!         DispatcherConfig::default(),
//!     );
//!
//!     let reply = dispatcher
//!         .dispatch(&AgentId::Omni, "Plan a release", Some(TeamMode::Coordinate))
//!         .await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod dispatcher;
pub mod fallback;
pub mod normalizer;
pub mod transport;

pub use dispatcher::{AskRequest, Dispatcher, DispatcherConfig};
pub use fallback::{simulated_reply, team_fallback, ERROR_NOTICE};
pub use normalizer::{normalize_response, UNEXPECTED_FORMAT};
pub use transport::{HttpTransport, Transport, TransportError};
