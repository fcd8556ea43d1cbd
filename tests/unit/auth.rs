// Register/login input rules and the token round trip

use managemate_backend::config::AuthConfig;
use managemate_backend::db::enums::UserRole;
use managemate_backend::db::models::AuthUser;
use managemate_backend::middleware::auth::AuthService;
use uuid::Uuid;

fn auth_service() -> AuthService {
    AuthService::new(AuthConfig {
        jwt_secret: "integration-test-secret-value".to_string(),
        access_token_expires_in: 900,
        bcrypt_cost: 4,
    })
}

#[test]
fn validate_register_and_login_inputs() {
    use managemate_backend::validation::auth::{
        UpdateProfileChanges, validate_login_request, validate_register_request,
        validate_update_profile,
    };

    // register
    assert!(
        validate_register_request("John Doe", "john@example.com", "StrongP4ss!", UserRole::TeamMember)
            .is_ok()
    );
    assert!(validate_register_request("", "john@example.com", "StrongP4ss!", UserRole::Manager).is_err());
    assert!(validate_register_request("John", "bad-email", "StrongP4ss!", UserRole::Manager).is_err());
    assert!(validate_register_request("John", "john@example.com", "weak", UserRole::Manager).is_err());
    assert!(
        validate_register_request("John", "john@example.com", "StrongP4ss!", UserRole::Admin).is_err()
    );

    // login
    assert!(validate_login_request("john@example.com", "x").is_ok());
    assert!(validate_login_request("", "x").is_err());
    assert!(validate_login_request("john@example.com", "").is_err());

    // profile update
    let ok_changes = UpdateProfileChanges {
        name: Some("John"),
        password: None,
        profile_picture: None,
    };
    assert!(validate_update_profile(&ok_changes).is_ok());
    let empty_changes = UpdateProfileChanges {
        name: None,
        password: None,
        profile_picture: None,
    };
    assert!(validate_update_profile(&empty_changes).is_err());
}

#[test]
fn access_token_carries_role_and_expiry() {
    let service = auth_service();
    let user = AuthUser {
        id: Uuid::new_v4(),
        name: "Morgan".to_string(),
        email: "morgan@example.com".to_string(),
        role: UserRole::Manager,
        profile_picture: None,
    };

    let token = service.generate_access_token(&user).unwrap();
    let claims = service.verify_token(&token).unwrap();

    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, UserRole::Manager);
    assert_eq!(claims.exp - claims.iat, 900);
    assert_eq!(service.access_token_expires_in(), 900);
}

#[test]
fn tampered_tokens_are_rejected() {
    let service = auth_service();
    let user = AuthUser {
        id: Uuid::new_v4(),
        name: "Sam".to_string(),
        email: "sam@example.com".to_string(),
        role: UserRole::TeamMember,
        profile_picture: None,
    };
    let mut token = service.generate_access_token(&user).unwrap();
    token.push('x');
    assert!(service.verify_token(&token).is_err());
    assert!(service.verify_token("not-a-jwt").is_err());
}

#[test]
fn password_hashes_verify() {
    use managemate_backend::services::UsersService;

    tokio_test::block_on(async {
        let hash = UsersService::hash_password("Secr3t!pass".to_string(), 4)
            .await
            .unwrap();
        assert!(UsersService::verify_password("Secr3t!pass".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!UsersService::verify_password("wrong".to_string(), hash)
            .await
            .unwrap());
    });
}
