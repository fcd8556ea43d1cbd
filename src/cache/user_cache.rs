use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::models::auth::AuthUser;
use crate::error::AppError;

const USER_CACHE_PREFIX: &str = "user:";
const USER_GENERATION_PREFIX: &str = "user_gen:";

/// Snapshots expire on their own so a missed invalidation heals itself.
pub const USER_CACHE_TTL: u64 = 600;

/// A cached snapshot is only valid while its generation matches the user's
/// current generation counter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CachedUser {
    pub generation: u64,
    pub user: AuthUser,
}

impl CachedUser {
    /// `None` when the snapshot was taken before the last invalidation.
    pub fn current(self, generation: u64) -> Option<AuthUser> {
        (self.generation == generation).then_some(self.user)
    }
}

/// Caches the authenticated-user snapshot the auth middleware needs on every
/// request.
///
/// Writers read the generation before loading the row from the database and
/// store it with the snapshot. `invalidate_user` bumps the generation, so a
/// snapshot built from a row read before the bump is never served, even if
/// it lands in Redis after the invalidation.
#[derive(Clone)]
pub struct UserCache {
    redis_client: redis::Client,
}

impl UserCache {
    pub fn new(redis_client: redis::Client) -> Self {
        Self { redis_client }
    }

    fn key(user_id: Uuid) -> String {
        format!("{}{}", USER_CACHE_PREFIX, user_id)
    }

    fn generation_key(user_id: Uuid) -> String {
        format!("{}{}", USER_GENERATION_PREFIX, user_id)
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        Ok(self.redis_client.get_multiplexed_async_connection().await?)
    }

    /// Current generation. Must be read before the row it will be stored with.
    pub async fn generation(&self, user_id: Uuid) -> Result<u64, AppError> {
        let mut conn = self.get_connection().await?;
        let generation: Option<u64> = conn.get(Self::generation_key(user_id)).await?;
        Ok(generation.unwrap_or(0))
    }

    pub async fn cache_user(&self, user: &AuthUser, generation: u64) -> Result<(), AppError> {
        let mut conn = self.get_connection().await?;

        let snapshot = CachedUser {
            generation,
            user: user.clone(),
        };
        let user_json = serde_json::to_string(&snapshot)
            .map_err(|e| AppError::internal(format!("Failed to serialize user: {}", e)))?;

        let _: () = conn.set_ex(Self::key(user.id), user_json, USER_CACHE_TTL).await?;

        Ok(())
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<AuthUser>, AppError> {
        let mut conn = self.get_connection().await?;

        let (user_json, generation): (Option<String>, Option<u64>) = redis::pipe()
            .get(Self::key(user_id))
            .get(Self::generation_key(user_id))
            .query_async(&mut conn)
            .await?;

        match user_json {
            Some(json) => {
                let snapshot: CachedUser = serde_json::from_str(&json)
                    .map_err(|e| AppError::internal(format!("Failed to deserialize user: {}", e)))?;
                Ok(snapshot.current(generation.unwrap_or(0)))
            }
            None => Ok(None),
        }
    }

    /// Bumps the generation and drops the snapshot in one round trip.
    pub async fn invalidate_user(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut conn = self.get_connection().await?;

        let _: () = redis::pipe()
            .atomic()
            .incr(Self::generation_key(user_id), 1u64)
            .ignore()
            .del(Self::key(user_id))
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::UserRole;

    fn snapshot(generation: u64) -> CachedUser {
        CachedUser {
            generation,
            user: AuthUser {
                id: Uuid::nil(),
                name: "Morgan".to_string(),
                email: "morgan@example.com".to_string(),
                role: UserRole::Manager,
                profile_picture: None,
            },
        }
    }

    #[test]
    fn keys_are_prefixed_by_user_id() {
        let id = Uuid::nil();
        assert_eq!(
            UserCache::key(id),
            "user:00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            UserCache::generation_key(id),
            "user_gen:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn snapshot_from_an_older_generation_is_not_served() {
        // Row read at generation 0, role changed and generation bumped to 1,
        // then the stale snapshot is written.
        assert_eq!(snapshot(0).current(1), None);
    }

    #[test]
    fn snapshot_from_the_current_generation_is_served() {
        let user = snapshot(3).current(3).unwrap();
        assert_eq!(user.role, UserRole::Manager);
    }

    #[test]
    fn snapshot_survives_a_json_round_trip_with_its_generation() {
        let json = serde_json::to_string(&snapshot(7)).unwrap();
        let back: CachedUser = serde_json::from_str(&json).unwrap();
        assert_eq!(back.generation, 7);
        assert_eq!(back.current(7).map(|u| u.email), Some("morgan@example.com".to_string()));
    }
}
