use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Avatar service used when a record carries no stored avatar.
const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// A user document as persisted in the `users` collection.
///
/// Seed records carry a legacy numeric `id` and gain a native `_id` on
/// insert; records without a legacy id are addressed by `_id` alone. Both
/// shapes collapse to a [`UserProfile`] at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserDocument {
    /// Collapse the dual id scheme and synthesize a missing avatar.
    ///
    /// The legacy numeric id wins when both ids are present. The password
    /// never crosses this boundary.
    pub fn normalize(self) -> UserProfile {
        let id = self
            .id
            .map(|legacy| legacy.to_string())
            .or_else(|| self.object_id.map(|oid| oid.to_hex()))
            .unwrap_or_default();
        let avatar = self
            .avatar
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| synthesized_avatar(&self.first_name, &self.last_name));

        UserProfile {
            id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            avatar,
        }
    }
}

/// Deterministic placeholder avatar keyed on the user's name.
pub fn synthesized_avatar(first_name: &str, last_name: &str) -> String {
    format!("{AVATAR_SERVICE}?name={first_name}+{last_name}&background=random")
}

/// The normalized user shape returned to clients.
///
/// Always carries a resolved `id` and a non-empty `avatar`; has no
/// password field at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

/// A client-supplied identifier, resolved once at the boundary.
///
/// Raw ids are either the 24-hex store-native `_id` or a small legacy
/// integer; the hex shape takes precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKey {
    Native(ObjectId),
    Legacy(i64),
}

impl UserKey {
    /// Parse a raw path id. `None` means the string matches neither shape
    /// and cannot address any stored record.
    pub fn parse(raw: &str) -> Option<Self> {
        if let Ok(oid) = ObjectId::parse_str(raw) {
            return Some(Self::Native(oid));
        }
        raw.parse::<i64>().ok().map(Self::Legacy)
    }
}

/// Merge-patch for the mutable profile fields.
///
/// Avatar, password, and both ids are not reachable through this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

/// One page of the directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPage {
    pub data: Vec<UserProfile>,
    pub page: i64,
    pub per_page: i64,
    pub total: u64,
    pub total_pages: u64,
}
