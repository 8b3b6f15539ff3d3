//! `nexusbot-api`: typed client for the NeuralNexus REST API.
//!
//! One `ApiClient` per process; every call is a single authenticated request
//! with no retry.

pub mod bng;
pub mod client;
pub mod error;
pub mod gss;
pub mod mcstatus;
pub mod users;

pub use bng::{BeeName, BeeNameSuggestions};
pub use client::ApiClient;
pub use error::{ApiError, ErrorBody};
pub use gss::ServerStatus;
pub use mcstatus::McServerStatus;
pub use users::{PlatformUser, User};
