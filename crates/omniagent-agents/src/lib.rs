//! Agent registry for omniagent
//!
//! Maps agent identifiers to their display metadata and to the route the
//! dispatcher uses to reach them.

pub mod agent;
pub mod agents_file;
pub mod registry;

pub use agent::{Agent, FailurePolicy, Route};
pub use agents_file::{AgentEntry, AgentsFile, AgentsFileError};
pub use registry::{AgentRegistry, RegistryError};
