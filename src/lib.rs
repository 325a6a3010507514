//! # dribbble - typed client for the Dribbble v1 REST API
//!
//! Each API call is one async method that sends exactly one HTTP request
//! and resolves to one typed value or one [`ApiError`]. There is no retry,
//! caching or token storage: the access token is passed to every call.
//!
//! ## Features
//!
//! - Shots, comments, likes, buckets and follows
//! - OAuth authorization-code exchange
//! - A declarative endpoint table ([`endpoint`]) driving a single request
//!   builder, so parameter placement is defined in one place
//! - A pluggable [`Transport`] for tests or custom HTTP stacks
//!
//! ## Basic Usage
//!
//! ```no_run
//! use dribbble::{DribbbleClient, ShotSort, ShotsQuery};
//!
//! # async fn run() -> Result<(), dribbble::ApiError> {
//! let client = DribbbleClient::new()?;
//! let token = "user access token";
//!
//! let shots = client
//!     .shots(token, ShotsQuery::new().sort(ShotSort::Recent).page(2))
//!     .await?;
//! for shot in &shots {
//!     println!("{} ({} likes)", shot.title, shot.likes_count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Authentication
//!
//! ```no_run
//! use dribbble::{Config, DribbbleClient};
//!
//! # async fn run() -> Result<(), dribbble::ApiError> {
//! let config = Config::default().with_credentials("client id", "client secret");
//! let client = DribbbleClient::with_config(config)?;
//!
//! let token = client.exchange_code("code from the redirect").await?;
//! let me = client.me(&token.access_token).await?;
//! println!("logged in as {}", me.username);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod models;
pub mod token;
pub mod transport;

// Re-export main types for convenience
pub use api::{DribbbleClient, USER_OTHER, USER_SELF};
pub use client::Config;
pub use endpoint::{Endpoint, Params};
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use models::{
    Bucket, Comment, Like, LikeShotResponse, NullResponse, Shot, ShotImages, ShotList, ShotSort,
    ShotsQuery, Timeframe, UnknownFilter, User,
};
pub use token::Token;
pub use transport::{HttpTransport, Transport};
