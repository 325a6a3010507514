//! Response entities of the Dribbble v1 API.
//!
//! All of them are plain deserialization targets. Count fields and optional
//! strings default when the API leaves them out, so partial user objects
//! (as embedded in shots) still decode.

use chrono::{DateTime, Utc};
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A published design post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub images: ShotImages,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub attachments_count: u64,
    #[serde(default)]
    pub rebounds_count: u64,
    #[serde(default)]
    pub buckets_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Image URLs of a shot; `hidpi` only exists for retina uploads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotImages {
    #[serde(default)]
    pub hidpi: Option<String>,
    #[serde(default)]
    pub normal: Option<String>,
    #[serde(default)]
    pub teaser: Option<String>,
}

impl ShotImages {
    /// Largest available image
    pub fn best(&self) -> Option<&str> {
        self.hidpi
            .as_deref()
            .or(self.normal.as_deref())
            .or(self.teaser.as_deref())
    }
}

/// A comment on a shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub body: String,
    #[serde(default)]
    pub likes_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Profile of an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    pub username: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub followings_count: u64,
    #[serde(default)]
    pub shots_count: u64,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub buckets_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A named collection of shots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub shots_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<User>,
}

/// A shot liked by the authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub shot: Shot,
}

/// Result of liking, unliking or checking a like.
///
/// An empty or `null` body decodes to a response with both fields unset,
/// meaning the shot is not liked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<LikeShotWire>")]
pub struct LikeShotResponse {
    pub id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct LikeShotWire {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<Option<LikeShotWire>> for LikeShotResponse {
    fn from(wire: Option<LikeShotWire>) -> Self {
        match wire {
            Some(wire) => LikeShotResponse {
                id: wire.id,
                created_at: wire.created_at,
            },
            None => LikeShotResponse::default(),
        }
    }
}

impl LikeShotResponse {
    pub fn is_liked(&self) -> bool {
        self.created_at.is_some()
    }
}

/// Marker for calls whose outcome is the HTTP status alone.
///
/// Decodes from any body, including an empty one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NullResponse;

impl<'de> Deserialize<'de> for NullResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer)?;
        Ok(NullResponse)
    }
}

/// Error returned when a filter string is not one the API knows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter value: {0}")]
pub struct UnknownFilter(pub String);

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownFilter;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownFilter(other.to_string())),
                }
            }
        }
    };
}

wire_enum!(
    /// Kind of shots to list
    ShotList {
        Animated => "animated",
        Attachments => "attachments",
        Debuts => "debuts",
        Playoffs => "playoffs",
        Rebounds => "rebounds",
        Teams => "teams",
    }
);

wire_enum!(
    /// Ordering of a shot listing; the API defaults to popularity
    ShotSort {
        Comments => "comments",
        Recent => "recent",
        Views => "views",
    }
);

wire_enum!(
    /// Period a shot listing covers
    Timeframe {
        Week => "week",
        Month => "month",
        Year => "year",
        Ever => "ever",
    }
);

/// Filters for listing shots; every field is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotsQuery {
    pub list: Option<ShotList>,
    pub sort: Option<ShotSort>,
    pub timeframe: Option<Timeframe>,
    pub page: Option<i32>,
}

impl ShotsQuery {
    pub fn new() -> Self {
        ShotsQuery::default()
    }

    pub fn list(mut self, list: ShotList) -> Self {
        self.list = Some(list);
        self
    }

    pub fn sort(mut self, sort: ShotSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    pub fn page(mut self, page: i32) -> Self {
        self.page = Some(page);
        self
    }
}
