use serde::{Deserialize, Serialize, Serializer};

pub const NOT_FOUND: &str = "NotFound";

/// Cached result of a profile lookup.
///
/// A failed lookup is remembered as [`UserInfo::NotFound`], which serializes
/// to the bare string `"NotFound"` so downstream consumers can tell it apart
/// from a profile object.
#[derive(Debug, Clone, PartialEq)]
pub enum UserInfo {
    Found(UserAvatar),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAvatar {
    pub avatar_url: String,
}

impl UserInfo {
    pub fn avatar_url(&self) -> Option<&str> {
        match self {
            UserInfo::Found(user) => Some(&user.avatar_url),
            UserInfo::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, UserInfo::NotFound)
    }
}

impl Serialize for UserInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            UserInfo::Found(user) => user.serialize(serializer),
            UserInfo::NotFound => serializer.serialize_str(NOT_FOUND),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatedUser {
    pub login: String,
}
