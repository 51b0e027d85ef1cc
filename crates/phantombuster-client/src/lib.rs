//! HTTP client SDK for the PhantomBuster automation platform.
//!
//! This crate provides a typed client for the PhantomBuster v1 and v2 APIs.
//! All requests flow through one shared [`Gateway`] which applies
//! authentication, version routing, a process-wide rate limit, per-attempt
//! timeouts, retry with exponential backoff, and status-to-error mapping.
//!
//! # Example
//!
//! ```no_run
//! use phantombuster_client::{Config, PhantombusterClient, Result, SaveAgentRequest};
//!
//! # async fn example() -> Result<()> {
//! // First access initializes the shared gateway
//! let client = PhantombusterClient::get_instance(Some(Config::from_env()?))?;
//!
//! // Later accesses reuse it
//! let same = PhantombusterClient::get_instance(None)?;
//!
//! let agent = same
//!     .agents()
//!     .save(SaveAgentRequest::new("LinkedIn scraper", 42))
//!     .await?;
//! println!("Saved agent {:?}", agent.id);
//!
//! let csv = client.orgs().export_agent_usage().await?;
//! println!("{}", csv);
//!
//! client.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Agents**: List, fetch, launch, save, delete
//! - **Scripts**: Fetch, source code, visibility, access lists, save, delete
//! - **Containers**: Fetch runs and their result objects
//! - **Orgs**: Resources, usage exports, running containers, agent groups
//! - **Branches**: List, diff, create, delete, release
//! - **Org storage**: Leads and lead lists
//! - **Identities**: Save from token
//! - **AI**: Completions
//! - **Captcha**: hCaptcha and reCAPTCHA solving
//! - **Location**: IP geolocation
//! - **Bright Data**: SERP queries
//! - **v1**: Agent records, scripts by name, user account
//!
//! # Errors
//!
//! Failures are reported as [`Error`]. HTTP failures map to
//! [`Error::Authentication`] (401), [`Error::NotFound`] (404),
//! [`Error::RateLimited`] (429), [`Error::Server`] (5xx) or [`Error::Api`]
//! (anything else); failures before a status arrives are
//! [`Error::Transport`]. Only transport and server errors are retried.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod ratelimit;
pub mod retry;
pub mod types;

pub use client::{ClientBuilder, PhantombusterClient};
pub use config::Config;
pub use error::{Error, Result};
pub use gateway::{ApiRequest, ApiResponse, ApiVersion, Gateway, GatewayRegistry};
pub use ratelimit::RateLimitConfig;
pub use retry::RetryPolicy;
pub use types::*;

pub use reqwest::Method;
