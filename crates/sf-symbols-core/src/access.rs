//! Swift access levels for the generated declaration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The four Swift access levels a generated `SFSymbol` type may carry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    Private,
    FilePrivate,
    #[default]
    Internal,
    Public,
}

/// Error returned when a tag is not one of the four access levels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a Swift access level")]
pub struct UnknownAccessLevel(pub String);

impl AccessLevel {
    pub const ALL: [Self; 4] = [Self::Private, Self::FilePrivate, Self::Internal, Self::Public];

    /// The Swift keyword for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::FilePrivate => "fileprivate",
            Self::Internal => "internal",
            Self::Public => "public",
        }
    }

    /// Modifier written before `enum`. Internal is Swift's default and is left
    /// implicit.
    #[must_use]
    pub const fn type_modifier(self) -> &'static str {
        match self {
            Self::Internal => "",
            Self::Private => "private ",
            Self::FilePrivate => "fileprivate ",
            Self::Public => "public ",
        }
    }

    /// Modifier written before each generated member.
    ///
    /// Only `public` is repeated on members: Swift members default to
    /// `internal`, which is already capped by a `private` or `fileprivate`
    /// container.
    #[must_use]
    pub const fn member_modifier(self) -> &'static str {
        match self {
            Self::Public => "public ",
            Self::Private | Self::FilePrivate | Self::Internal => "",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = UnknownAccessLevel;

    /// Parses a Swift access keyword, optionally written in member syntax
    /// (`.public`).
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let keyword = tag.strip_prefix('.').unwrap_or(tag);
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == keyword)
            .ok_or_else(|| UnknownAccessLevel(tag.to_string()))
    }
}
