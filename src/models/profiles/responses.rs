use super::entities::Profile;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct ProfileResponse {
    pub profile: Profile,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct AvatarUploadResponse {
    pub avatar_url: String,
    pub profile: Profile,
}
