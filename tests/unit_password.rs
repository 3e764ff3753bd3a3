use classbook_core::{hash_password, verify_password};

#[test]
fn test_hash_password_success() {
    let hashed = hash_password("testpassword123").unwrap();
    assert!(!hashed.is_empty());
    assert_ne!(hashed, "testpassword123");
}

#[test]
fn test_hash_password_is_salted() {
    let first = hash_password("samepassword").unwrap();
    let second = hash_password("samepassword").unwrap();
    assert_ne!(first, second);
    assert!(verify_password("samepassword", &first));
    assert!(verify_password("samepassword", &second));
}

#[test]
fn test_verify_password_wrong() {
    let hashed = hash_password("correctpassword").unwrap();
    assert!(!verify_password("wrongpassword", &hashed));
}

#[test]
fn test_verify_password_empty_hash() {
    assert!(!verify_password("anything", ""));
}

#[test]
fn test_hash_password_unicode() {
    let password = "пароль密码🔒";
    let hashed = hash_password(password).unwrap();
    assert!(verify_password(password, &hashed));
    assert!(!verify_password("пароль", &hashed));
}
