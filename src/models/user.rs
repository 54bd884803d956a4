use serde::{Deserialize, Serialize};

/// Row shape of the `users` table. The object key is stored alongside the
/// public URL so deletes never have to recover it from the URL string.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub profile_picture_url: String,
    pub profile_picture_key: String,
}

/// API-visible user shape.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub profile_picture_url: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            name: record.name,
            email: record.email,
            profile_picture_url: record.profile_picture_url,
        }
    }
}
