use bcr_auth::{JwtSigner, RoleClaim, TokenPayload, TokenSigner, create_access_token, verify_token};
use bcr_config::JwtConfig;

fn payload() -> TokenPayload {
    TokenPayload {
        id: 42,
        name: "Brian".to_string(),
        email: "brian@binar.co.id".to_string(),
        image: None,
        role: RoleClaim {
            id: 2,
            name: "CUSTOMER".to_string(),
        },
    }
}

fn config() -> JwtConfig {
    JwtConfig::new("test-secret", 3600)
}

#[test]
fn test_create_and_verify_roundtrip() {
    let token = create_access_token(&payload(), &config()).unwrap();
    let claims = verify_token(&token, &config()).unwrap();

    assert_eq!(claims.id, 42);
    assert_eq!(claims.email, "brian@binar.co.id");
    assert_eq!(claims.role.name, "CUSTOMER");
    assert!(claims.exp > claims.iat);
    assert_eq!(claims.payload(), payload());
}

#[test]
fn test_verify_with_wrong_secret_fails() {
    let token = create_access_token(&payload(), &config()).unwrap();
    let err = verify_token(&token, &JwtConfig::new("other-secret", 3600)).unwrap_err();
    assert_eq!(err.name(), "UnauthorizedError");
}

#[test]
fn test_verify_expired_token_fails() {
    use bcr_auth::Claims;
    use jsonwebtoken::{EncodingKey, Header, encode};

    let now = chrono::Utc::now().timestamp() as usize;
    let p = payload();
    let claims = Claims {
        id: p.id,
        name: p.name,
        email: p.email,
        image: p.image,
        role: p.role,
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap();

    let err = verify_token(&token, &config()).unwrap_err();
    assert_eq!(err.name(), "UnauthorizedError");
}

#[test]
fn test_verify_garbage_fails() {
    let err = verify_token("not.a.token", &config()).unwrap_err();
    assert_eq!(err.status().as_u16(), 401);
}

#[test]
fn test_jwt_signer_trait() {
    let signer: Box<dyn TokenSigner> = Box::new(JwtSigner::new(config()));
    let token = signer.sign(&payload()).unwrap();
    let claims = signer.verify(&token).unwrap();
    assert!(claims.has_role("CUSTOMER"));
    assert!(!claims.has_role("ADMIN"));
}
