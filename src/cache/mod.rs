pub mod user_cache;

pub use user_cache::UserCache;

use ::redis::{AsyncCommands, Client, cmd};

use crate::error::AppError;

const REVOKED_TOKEN_PREFIX: &str = "revoked_token:";

fn revoked_key(jti: &str) -> String {
    format!("{}{}", REVOKED_TOKEN_PREFIX, jti)
}

/// Marks a token id as revoked until the token would have expired anyway.
pub async fn revoke_token(redis_client: &Client, jti: &str, ttl_secs: u64) -> Result<(), AppError> {
    if ttl_secs == 0 {
        return Ok(());
    }

    let mut conn = redis_client.get_multiplexed_async_connection().await?;
    let _: () = conn.set_ex(revoked_key(jti), 1u8, ttl_secs).await?;

    Ok(())
}

pub async fn is_token_revoked(redis_client: &Client, jti: &str) -> Result<bool, AppError> {
    let mut conn = redis_client.get_multiplexed_async_connection().await?;
    let revoked: bool = conn.exists(revoked_key(jti)).await?;

    Ok(revoked)
}

pub async fn redis_health_check(redis_client: &Client) -> Result<bool, AppError> {
    let mut conn = redis_client.get_multiplexed_async_connection().await?;
    let pong: String = cmd("PING").query_async(&mut conn).await?;

    Ok(pong == "PONG")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_keys_are_namespaced() {
        assert_eq!(revoked_key("abc"), "revoked_token:abc");
    }
}
