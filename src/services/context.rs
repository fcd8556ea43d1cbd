use uuid::Uuid;

use crate::db::enums::UserRole;
use crate::db::models::AuthUser;

/// Who is asking. Built once per request from the authenticated user and
/// handed to every service call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl RequestContext {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

impl From<&AuthUser> for RequestContext {
    fn from(user: &AuthUser) -> Self {
        Self::new(user.id, user.role)
    }
}
