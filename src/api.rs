use crate::client::Config;
use crate::endpoint::{self, Endpoint, Params};
use crate::error::Result;
use crate::models::{Bucket, Comment, Like, LikeShotResponse, NullResponse, Shot, ShotsQuery, User};
use crate::token::Token;
use crate::transport::{HttpTransport, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};
use url::Url;

/// `user` value of [`DribbbleClient::user_shots`] for the authenticated account
pub const USER_SELF: &str = "user";
/// `user` value of [`DribbbleClient::user_shots`] for any other account
pub const USER_OTHER: &str = "users";

/// Client for the Dribbble v1 API.
///
/// Holds no per-user state: the access token is an argument of every call.
/// Cloning is cheap and clones share the transport, so one client can serve
/// any number of concurrent calls.
#[derive(Clone)]
pub struct DribbbleClient {
    transport: Arc<dyn Transport>,
    config: Config,
    base_url: Url,
}

impl DribbbleClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client sending requests through the given transport
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_url = config.base_url()?;
        Ok(DribbbleClient {
            transport,
            config,
            base_url,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build, send and decode one endpoint call.
    ///
    /// Parameter checks happen before the transport is touched.
    pub async fn call<T>(&self, endpoint: &Endpoint, params: Params) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = endpoint.build(&self.base_url, &self.config, &params)?;
        let method = request.method;
        let path = request.url.path().to_string();

        let start = Instant::now();
        let response = self.transport.execute(request).await?;

        debug!(
            operation = endpoint.name,
            %method,
            %path,
            status = response.status,
            shape = ?endpoint.shape,
            elapsed = ?start.elapsed(),
            "dribbble request"
        );

        // 404 is the normal "no" of the like/follow checks; only server errors warn
        if response.status >= 500 {
            warn!(
                operation = endpoint.name,
                status = response.status,
                "dribbble server error"
            );
        } else if !response.is_success() {
            debug!(
                operation = endpoint.name,
                status = response.status,
                "dribbble rejected request"
            );
        }

        response.decode().inspect_err(|_| {
            trace!(operation = endpoint.name, body = %response.text(), "response body");
        })
    }

    /// List shots, optionally filtered
    pub async fn shots(&self, access_token: &str, query: ShotsQuery) -> Result<Vec<Shot>> {
        let params = Params::new()
            .set("access_token", access_token)
            .set_opt("list", query.list)
            .set_opt("timeframe", query.timeframe)
            .set_opt("sort", query.sort)
            .set_opt("page", query.page);
        self.call(&endpoint::LIST_SHOTS, params).await
    }

    /// List the comments of a shot; `per_page` defaults to 100
    pub async fn comments(
        &self,
        id: u64,
        access_token: &str,
        page: Option<i32>,
        per_page: Option<i32>,
    ) -> Result<Vec<Comment>> {
        let params = Params::new()
            .set("id", id)
            .set("access_token", access_token)
            .set_opt("page", page)
            .set_opt("per_page", per_page);
        self.call(&endpoint::LIST_COMMENTS, params).await
    }

    /// Exchange an OAuth authorization code for an access token.
    ///
    /// `client_id` and `client_secret` come from the configuration.
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        let params = Params::new().set("code", code);
        self.call(&endpoint::EXCHANGE_CODE, params).await
    }

    /// Profile of the authenticated user
    pub async fn me(&self, access_token: &str) -> Result<User> {
        let params = Params::new().set("access_token", access_token);
        self.call(&endpoint::ME, params).await
    }

    pub async fn like_shot(&self, id: u64, access_token: &str) -> Result<LikeShotResponse> {
        self.call(&endpoint::LIKE_SHOT, id_params(id, access_token))
            .await
    }

    /// Whether the authenticated user likes a shot
    pub async fn shot_like(&self, id: u64, access_token: &str) -> Result<LikeShotResponse> {
        self.call(&endpoint::SHOT_LIKE, id_params(id, access_token))
            .await
    }

    pub async fn unlike_shot(&self, id: u64, access_token: &str) -> Result<LikeShotResponse> {
        self.call(&endpoint::UNLIKE_SHOT, id_params(id, access_token))
            .await
    }

    pub async fn create_comment(&self, id: u64, access_token: &str, body: &str) -> Result<Comment> {
        let params = id_params(id, access_token).set("body", body);
        self.call(&endpoint::CREATE_COMMENT, params).await
    }

    /// Shots liked by the authenticated user
    pub async fn my_likes(&self, access_token: &str, page: Option<i32>) -> Result<Vec<Like>> {
        let params = Params::new()
            .set("access_token", access_token)
            .set_opt("page", page);
        self.call(&endpoint::MY_LIKES, params).await
    }

    /// Buckets of the authenticated user; `page` defaults to 100
    pub async fn my_buckets(&self, access_token: &str, page: Option<i32>) -> Result<Vec<Bucket>> {
        let params = Params::new()
            .set("access_token", access_token)
            .set_opt("page", page);
        self.call(&endpoint::MY_BUCKETS, params).await
    }

    pub async fn create_bucket(
        &self,
        access_token: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Bucket> {
        let params = Params::new()
            .set("access_token", access_token)
            .set("name", name)
            .set_opt("description", description);
        self.call(&endpoint::CREATE_BUCKET, params).await
    }

    pub async fn delete_bucket(&self, id: u64, access_token: &str) -> Result<Bucket> {
        self.call(&endpoint::DELETE_BUCKET, id_params(id, access_token))
            .await
    }

    pub async fn modify_bucket(
        &self,
        id: u64,
        access_token: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Bucket> {
        let params = id_params(id, access_token)
            .set("name", name)
            .set_opt("description", description);
        self.call(&endpoint::MODIFY_BUCKET, params).await
    }

    pub async fn bucket_shots(
        &self,
        id: u64,
        access_token: &str,
        page: Option<i32>,
    ) -> Result<Vec<Shot>> {
        let params = id_params(id, access_token).set_opt("page", page);
        self.call(&endpoint::BUCKET_SHOTS, params).await
    }

    /// Remove a shot from a bucket; `id` is the bucket
    pub async fn remove_shot_from_bucket(
        &self,
        id: u64,
        access_token: &str,
        shot_id: Option<u64>,
    ) -> Result<Shot> {
        let params = id_params(id, access_token).set_opt("shot_id", shot_id);
        self.call(&endpoint::REMOVE_SHOT_FROM_BUCKET, params).await
    }

    /// Add a shot to a bucket; `id` is the bucket
    pub async fn add_shot_to_bucket(
        &self,
        id: u64,
        access_token: &str,
        shot_id: Option<u64>,
    ) -> Result<Shot> {
        let params = id_params(id, access_token).set_opt("shot_id", shot_id);
        self.call(&endpoint::ADD_SHOT_TO_BUCKET, params).await
    }

    /// Shots of an account.
    ///
    /// Pass [`USER_SELF`] with no `id` for the authenticated account, or
    /// [`USER_OTHER`] with the account id for anyone else. [`USER_OTHER`]
    /// without an id requests `users//shots`, which the API rejects with 404.
    pub async fn user_shots(
        &self,
        user: &str,
        id: Option<&str>,
        access_token: &str,
        page: Option<i32>,
    ) -> Result<Vec<Shot>> {
        let params = Params::new()
            .set("user", user)
            .set_opt("id", id)
            .set("access_token", access_token)
            .set_opt("page", page);
        self.call(&endpoint::USER_SHOTS, params).await
    }

    /// Succeeds when the authenticated user follows `id`; the API answers
    /// 404 otherwise
    pub async fn is_following(&self, id: u64, access_token: &str) -> Result<NullResponse> {
        self.call(&endpoint::IS_FOLLOWING, id_params(id, access_token))
            .await
    }

    pub async fn follow_user(&self, id: u64, access_token: &str) -> Result<NullResponse> {
        self.call(&endpoint::FOLLOW_USER, id_params(id, access_token))
            .await
    }

    pub async fn unfollow_user(&self, id: u64, access_token: &str) -> Result<NullResponse> {
        self.call(&endpoint::UNFOLLOW_USER, id_params(id, access_token))
            .await
    }
}

/// `id` + `access_token`, shared by most endpoints
fn id_params(id: u64, access_token: &str) -> Params {
    Params::new().set("id", id).set("access_token", access_token)
}

impl std::fmt::Debug for DribbbleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DribbbleClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
