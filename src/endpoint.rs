//! The endpoint contract table.
//!
//! Every supported API call is one [`Endpoint`] constant describing its
//! method, path template, parameters and response shape. [`Endpoint::build`]
//! turns a descriptor plus caller-supplied [`Params`] into an
//! [`HttpRequest`]; nothing else in the crate knows where a parameter goes.
//!
//! Parameter placement follows two rules:
//! - [`Location::Path`] parameters replace `{name}` in the template.
//! - [`Location::Field`] parameters go in the query string for
//!   [`Encoding::Query`] endpoints and in a form-url-encoded body for
//!   [`Encoding::Form`] endpoints.
//!
//! Absent parameters fall back to the descriptor's default; absent or empty
//! required parameters fail before a request exists, absent optional ones
//! are left out of the request entirely. An empty optional value is sent
//! as given.

use crate::client::Config;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest};
use std::fmt::Display;
use url::{form_urlencoded, Url};

/// Where a parameter ends up in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Path,
    Field,
}

/// How an endpoint sends its field parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Query,
    Form,
}

/// Whether the response body is one entity or a page of them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    List,
}

/// Value used when the caller leaves a parameter out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Literal(&'static str),
    ClientId,
    ClientSecret,
}

impl Fallback {
    fn resolve(&self, config: &Config) -> Option<String> {
        let value = match self {
            Fallback::Literal(value) => Some((*value).to_string()),
            Fallback::ClientId => config.client_id.clone(),
            Fallback::ClientSecret => config.client_secret.clone(),
        };
        value.filter(|v| !v.is_empty())
    }
}

/// One declared parameter of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Wire name: the placeholder name for path parameters, the key otherwise
    pub name: &'static str,
    pub location: Location,
    pub required: bool,
    pub default: Option<Fallback>,
}

const fn required(name: &'static str, location: Location) -> Param {
    Param {
        name,
        location,
        required: true,
        default: None,
    }
}

const fn optional(name: &'static str, location: Location) -> Param {
    Param {
        name,
        location,
        required: false,
        default: None,
    }
}

const fn defaulted(name: &'static str, location: Location, default: Fallback) -> Param {
    Param {
        name,
        location,
        required: false,
        default: Some(default),
    }
}

const ID: Param = required("id", Location::Path);
const ACCESS_TOKEN: Param = required("access_token", Location::Field);
const PAGE: Param = optional("page", Location::Field);

/// Descriptor of one API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path relative to the API root; a leading `/` resolves against the host
    pub path: &'static str,
    pub encoding: Encoding,
    pub params: &'static [Param],
    pub shape: Shape,
}

pub const LIST_SHOTS: Endpoint = Endpoint {
    name: "shots",
    method: HttpMethod::Get,
    path: "shots",
    encoding: Encoding::Query,
    params: &[
        ACCESS_TOKEN,
        optional("list", Location::Field),
        optional("timeframe", Location::Field),
        optional("sort", Location::Field),
        PAGE,
    ],
    shape: Shape::List,
};

pub const LIST_COMMENTS: Endpoint = Endpoint {
    name: "comments",
    method: HttpMethod::Get,
    path: "shots/{id}/comments",
    encoding: Encoding::Query,
    params: &[
        ID,
        ACCESS_TOKEN,
        PAGE,
        defaulted("per_page", Location::Field, Fallback::Literal("100")),
    ],
    shape: Shape::List,
};

pub const EXCHANGE_CODE: Endpoint = Endpoint {
    name: "exchange_code",
    method: HttpMethod::Post,
    path: "/oauth/token",
    encoding: Encoding::Form,
    params: &[
        defaulted("client_id", Location::Field, Fallback::ClientId),
        defaulted("client_secret", Location::Field, Fallback::ClientSecret),
        required("code", Location::Field),
    ],
    shape: Shape::Object,
};

pub const ME: Endpoint = Endpoint {
    name: "me",
    method: HttpMethod::Get,
    path: "user",
    encoding: Encoding::Query,
    params: &[ACCESS_TOKEN],
    shape: Shape::Object,
};

pub const LIKE_SHOT: Endpoint = Endpoint {
    name: "like_shot",
    method: HttpMethod::Post,
    path: "shots/{id}/like",
    encoding: Encoding::Form,
    params: &[ID, ACCESS_TOKEN],
    shape: Shape::Object,
};

pub const SHOT_LIKE: Endpoint = Endpoint {
    name: "shot_like",
    method: HttpMethod::Get,
    path: "shots/{id}/like",
    encoding: Encoding::Query,
    params: &[ID, ACCESS_TOKEN],
    shape: Shape::Object,
};

pub const UNLIKE_SHOT: Endpoint = Endpoint {
    name: "unlike_shot",
    method: HttpMethod::Delete,
    path: "shots/{id}/like",
    encoding: Encoding::Query,
    params: &[ID, ACCESS_TOKEN],
    shape: Shape::Object,
};

pub const CREATE_COMMENT: Endpoint = Endpoint {
    name: "create_comment",
    method: HttpMethod::Post,
    path: "shots/{id}/comments",
    encoding: Encoding::Form,
    params: &[ID, ACCESS_TOKEN, required("body", Location::Field)],
    shape: Shape::Object,
};

pub const MY_LIKES: Endpoint = Endpoint {
    name: "my_likes",
    method: HttpMethod::Get,
    path: "user/likes",
    encoding: Encoding::Query,
    params: &[ACCESS_TOKEN, PAGE],
    shape: Shape::List,
};

pub const MY_BUCKETS: Endpoint = Endpoint {
    name: "my_buckets",
    method: HttpMethod::Get,
    path: "user/buckets",
    encoding: Encoding::Query,
    params: &[
        ACCESS_TOKEN,
        defaulted("page", Location::Field, Fallback::Literal("100")),
    ],
    shape: Shape::List,
};

pub const CREATE_BUCKET: Endpoint = Endpoint {
    name: "create_bucket",
    method: HttpMethod::Post,
    path: "buckets",
    encoding: Encoding::Form,
    params: &[
        ACCESS_TOKEN,
        required("name", Location::Field),
        optional("description", Location::Field),
    ],
    shape: Shape::Object,
};

pub const DELETE_BUCKET: Endpoint = Endpoint {
    name: "delete_bucket",
    method: HttpMethod::Delete,
    path: "buckets/{id}",
    encoding: Encoding::Query,
    params: &[ID, ACCESS_TOKEN],
    shape: Shape::Object,
};

pub const MODIFY_BUCKET: Endpoint = Endpoint {
    name: "modify_bucket",
    method: HttpMethod::Put,
    path: "buckets/{id}",
    encoding: Encoding::Form,
    params: &[
        ID,
        ACCESS_TOKEN,
        required("name", Location::Field),
        optional("description", Location::Field),
    ],
    shape: Shape::Object,
};

pub const BUCKET_SHOTS: Endpoint = Endpoint {
    name: "bucket_shots",
    method: HttpMethod::Get,
    path: "buckets/{id}/shots",
    encoding: Encoding::Query,
    params: &[ID, ACCESS_TOKEN, PAGE],
    shape: Shape::List,
};

pub const REMOVE_SHOT_FROM_BUCKET: Endpoint = Endpoint {
    name: "remove_shot_from_bucket",
    method: HttpMethod::Delete,
    path: "buckets/{id}/shots",
    encoding: Encoding::Query,
    params: &[ID, ACCESS_TOKEN, optional("shot_id", Location::Field)],
    shape: Shape::Object,
};

pub const ADD_SHOT_TO_BUCKET: Endpoint = Endpoint {
    name: "add_shot_to_bucket",
    method: HttpMethod::Put,
    path: "buckets/{id}/shots",
    encoding: Encoding::Form,
    params: &[ID, ACCESS_TOKEN, optional("shot_id", Location::Field)],
    shape: Shape::Object,
};

pub const USER_SHOTS: Endpoint = Endpoint {
    name: "user_shots",
    method: HttpMethod::Get,
    path: "{user}/{id}/shots",
    encoding: Encoding::Query,
    params: &[
        required("user", Location::Path),
        optional("id", Location::Path),
        ACCESS_TOKEN,
        PAGE,
    ],
    shape: Shape::List,
};

pub const IS_FOLLOWING: Endpoint = Endpoint {
    name: "is_following",
    method: HttpMethod::Get,
    path: "user/following/{id}",
    encoding: Encoding::Query,
    params: &[ID, ACCESS_TOKEN],
    shape: Shape::Object,
};

pub const FOLLOW_USER: Endpoint = Endpoint {
    name: "follow_user",
    method: HttpMethod::Put,
    path: "users/{id}/follow",
    encoding: Encoding::Form,
    params: &[ID, ACCESS_TOKEN],
    shape: Shape::Object,
};

pub const UNFOLLOW_USER: Endpoint = Endpoint {
    name: "unfollow_user",
    method: HttpMethod::Delete,
    path: "users/{id}/follow",
    encoding: Encoding::Query,
    params: &[ID, ACCESS_TOKEN],
    shape: Shape::Object,
};

/// Every endpoint the client exposes
pub const ENDPOINTS: &[Endpoint] = &[
    LIST_SHOTS,
    LIST_COMMENTS,
    EXCHANGE_CODE,
    ME,
    LIKE_SHOT,
    SHOT_LIKE,
    UNLIKE_SHOT,
    CREATE_COMMENT,
    MY_LIKES,
    MY_BUCKETS,
    CREATE_BUCKET,
    DELETE_BUCKET,
    MODIFY_BUCKET,
    BUCKET_SHOTS,
    REMOVE_SHOT_FROM_BUCKET,
    ADD_SHOT_TO_BUCKET,
    USER_SHOTS,
    IS_FOLLOWING,
    FOLLOW_USER,
    UNFOLLOW_USER,
];

/// Look an endpoint up by name
pub fn find(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|e| e.name == name)
}

/// Caller-supplied parameter values, keyed by wire name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<(&'static str, String)>,
}

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    /// Set a parameter
    pub fn set(mut self, name: &'static str, value: impl Display) -> Self {
        self.values.push((name, value.to_string()));
        self
    }

    /// Set a parameter only when a value is given
    pub fn set_opt<V: Display>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    /// Value of a parameter, as given
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Endpoint {
    /// Declared parameter by name
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Build the request for this endpoint.
    ///
    /// `base` is the API root; `config` supplies credential defaults.
    pub fn build(&self, base: &Url, config: &Config, params: &Params) -> Result<HttpRequest> {
        if let Some((unknown, _)) = params.values.iter().find(|(k, _)| self.param(k).is_none()) {
            return Err(ApiError::UnknownParameter {
                operation: self.name,
                parameter: *unknown,
            });
        }

        let mut path = self.path.to_string();
        let mut fields = Vec::new();

        for param in self.params {
            let value = match params.get(param.name) {
                Some(value) => Some(value.to_string()),
                None => param.default.and_then(|d| d.resolve(config)),
            };

            // an empty required value is as good as none
            if param.required && value.as_deref().map_or(true, str::is_empty) {
                return Err(ApiError::MissingParameter {
                    operation: self.name,
                    parameter: param.name,
                });
            }

            match param.location {
                Location::Path => {
                    let value = value.unwrap_or_default();
                    if value == "." || value == ".." {
                        return Err(ApiError::InvalidParameter {
                            operation: self.name,
                            parameter: param.name,
                        });
                    }
                    let placeholder = format!("{{{}}}", param.name);
                    path = path.replace(&placeholder, &encode_segment(&value));
                }
                Location::Field => {
                    if let Some(value) = value {
                        fields.push((param.name.to_string(), value));
                    }
                }
            }
        }

        let url = base.join(&path)?;
        let (query, form) = match self.encoding {
            Encoding::Query => (fields, None),
            Encoding::Form => (Vec::new(), Some(fields)),
        };

        Ok(HttpRequest {
            operation: self.name,
            method: self.method,
            url,
            query,
            form,
        })
    }
}

/// Percent-encode a value for use as a single path segment
fn encode_segment(value: &str) -> String {
    // byte_serialize writes spaces as '+' and escapes literal '+' as %2B
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.dribbble.com/v1/").unwrap()
    }

    fn build(endpoint: &Endpoint, params: Params) -> Result<HttpRequest> {
        endpoint.build(&base(), &Config::default(), &params)
    }

    #[test]
    fn test_table_names_are_unique() {
        for (i, endpoint) in ENDPOINTS.iter().enumerate() {
            assert!(
                ENDPOINTS[i + 1..].iter().all(|e| e.name != endpoint.name),
                "duplicate endpoint {}",
                endpoint.name
            );
        }
        assert_eq!(ENDPOINTS.len(), 20);
    }

    #[test]
    fn test_every_placeholder_is_declared() {
        for endpoint in ENDPOINTS {
            let placeholders: Vec<&str> = endpoint
                .path
                .split('/')
                .filter_map(|s| s.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
                .collect();
            for name in &placeholders {
                let param = endpoint.param(name).expect("placeholder without param");
                assert_eq!(param.location, Location::Path, "{}", endpoint.name);
            }
            let path_params = endpoint
                .params
                .iter()
                .filter(|p| p.location == Location::Path)
                .count();
            assert_eq!(path_params, placeholders.len(), "{}", endpoint.name);
        }
    }

    #[test]
    fn test_access_token_everywhere_but_token_exchange() {
        for endpoint in ENDPOINTS {
            let token = endpoint.param("access_token");
            if endpoint.name == "exchange_code" {
                assert!(token.is_none());
            } else {
                assert!(token.is_some_and(|p| p.required), "{}", endpoint.name);
            }
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("follow_user"), Some(&FOLLOW_USER));
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_query_endpoint() {
        let request = build(
            &LIST_SHOTS,
            Params::new()
                .set("access_token", "tok")
                .set("sort", "views")
                .set("page", 2),
        )
        .unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url.as_str(), "https://api.dribbble.com/v1/shots");
        assert!(request.form.is_none());
        assert_eq!(
            request.query,
            vec![
                ("access_token".to_string(), "tok".to_string()),
                ("sort".to_string(), "views".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_endpoint() {
        let request = build(
            &CREATE_COMMENT,
            Params::new()
                .set("id", 42u64)
                .set("access_token", "tok")
                .set("body", "Nice colours"),
        )
        .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.url.as_str(),
            "https://api.dribbble.com/v1/shots/42/comments"
        );
        assert!(request.query.is_empty());
        assert_eq!(request.form_value("access_token"), Some("tok"));
        assert_eq!(request.form_value("body"), Some("Nice colours"));
        assert_eq!(request.form_value("id"), None);
    }

    #[test]
    fn test_missing_required() {
        let err = build(&CREATE_COMMENT, Params::new().set("id", 1).set("access_token", "tok"))
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingParameter {
                operation: "create_comment",
                parameter: "body"
            }
        ));
    }

    #[test]
    fn test_empty_required_counts_as_missing() {
        let err = build(&ME, Params::new().set("access_token", "")).unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingParameter {
                parameter: "access_token",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_parameter() {
        let err = build(&ME, Params::new().set("access_token", "t").set("page", 1)).unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnknownParameter {
                parameter: "page",
                ..
            }
        ));
    }

    #[test]
    fn test_literal_default() {
        let request = build(
            &LIST_COMMENTS,
            Params::new().set("id", 5).set("access_token", "t"),
        )
        .unwrap();
        assert_eq!(request.query_value("per_page"), Some("100"));
        assert_eq!(request.query_value("page"), None);

        let request = build(
            &LIST_COMMENTS,
            Params::new()
                .set("id", 5)
                .set("access_token", "t")
                .set("per_page", 12),
        )
        .unwrap();
        assert_eq!(request.query_value("per_page"), Some("12"));
    }

    #[test]
    fn test_credential_defaults() {
        let config = Config::default().with_credentials("app-id", "app-secret");
        let request = EXCHANGE_CODE
            .build(&base(), &config, &Params::new().set("code", "abc"))
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.dribbble.com/oauth/token"
        );
        assert_eq!(request.form_value("client_id"), Some("app-id"));
        assert_eq!(request.form_value("client_secret"), Some("app-secret"));
        assert_eq!(request.form_value("code"), Some("abc"));

        let request = build(&EXCHANGE_CODE, Params::new().set("code", "abc")).unwrap();
        assert_eq!(request.form_value("client_id"), None);
        assert_eq!(request.form_value("client_secret"), None);
    }

    #[test]
    fn test_path_values_are_encoded() {
        let request = build(
            &USER_SHOTS,
            Params::new()
                .set("user", "users")
                .set("id", "a b/c+d")
                .set("access_token", "t"),
        )
        .unwrap();
        assert_eq!(
            request.url.path(),
            "/v1/users/a%20b%2Fc%2Bd/shots"
        );
    }

    #[test]
    fn test_absent_optional_path_param_is_empty_segment() {
        let request = build(
            &USER_SHOTS,
            Params::new().set("user", "user").set("access_token", "t"),
        )
        .unwrap();
        assert_eq!(request.url.path(), "/v1/user//shots");
        assert_eq!(request.query_value("page"), None);
    }

    #[test]
    fn test_dot_segments_rejected() {
        let err = build(
            &USER_SHOTS,
            Params::new()
                .set("user", "users")
                .set("id", "..")
                .set("access_token", "t"),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter { parameter: "id", .. }));
    }

    #[test]
    fn test_empty_optional_is_sent() {
        let request = build(
            &MODIFY_BUCKET,
            Params::new()
                .set("id", 5)
                .set("access_token", "t")
                .set("name", "n")
                .set("description", ""),
        )
        .unwrap();
        assert_eq!(request.form_value("description"), Some(""));
    }

    #[test]
    fn test_form_endpoint_without_optional() {
        let request = build(
            &ADD_SHOT_TO_BUCKET,
            Params::new().set("id", 9).set("access_token", "t"),
        )
        .unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(
            request.form,
            Some(vec![("access_token".to_string(), "t".to_string())])
        );
    }
}
