use crate::UserDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SyncUserResponse {
    pub success: bool,
    pub user: UserDto,
}
