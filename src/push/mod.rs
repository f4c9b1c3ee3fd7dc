// ABOUTME: Push module for sigsync
// ABOUTME: Hands rendered signatures to the external admin tool one account at a time

pub mod agent;
pub mod error;
pub mod result;

pub use agent::{locate_tool, Account, PushAgent};
pub use error::{PushError, Result};
pub use result::{PushResult, PushStatus};
