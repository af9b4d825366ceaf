use recipebook_core::db::open_db_in_memory;
use recipebook_core::{
    AccountError, AccountService, LoginRequest, SignupRequest, SqliteUserRepository,
    UserRepository, UserValidationError,
};
use rusqlite::Connection;

const TEST_COST: u32 = 4;

fn service(conn: &Connection) -> AccountService<SqliteUserRepository<'_>> {
    AccountService::new(SqliteUserRepository::try_new(conn).unwrap(), TEST_COST)
}

fn signup(username: &str, password: &str) -> SignupRequest {
    SignupRequest {
        username: username.to_string(),
        email: None,
        password1: password.to_string(),
        password2: password.to_string(),
    }
}

#[test]
fn sign_up_then_log_in_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);

    let user = accounts
        .sign_up(&SignupRequest {
            email: Some(" anna@example.com ".to_string()),
            ..signup(" anna ", "s3cret-pass")
        })
        .unwrap();
    assert_eq!(user.username, "anna");
    assert_eq!(user.email.as_deref(), Some("anna@example.com"));
    assert_ne!(user.password_hash, "s3cret-pass");
    assert!(user.password_hash.starts_with("$2"));

    let logged_in = accounts
        .log_in(&LoginRequest {
            username: "ANNA".to_string(),
            password: "s3cret-pass".to_string(),
        })
        .unwrap();
    assert_eq!(logged_in.id, user.id);
}

#[test]
fn password_hash_is_not_serialized() {
    let conn = open_db_in_memory().unwrap();
    let user = service(&conn).sign_up(&signup("ben", "pw")).unwrap();

    let json = serde_json::to_string(&user).unwrap();
    assert!(json.contains("\"username\":\"ben\""));
    assert!(!json.contains("password_hash"));
    assert!(!json.contains(&user.password_hash));
}

#[test]
fn duplicate_username_is_rejected_ignoring_case() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);
    accounts.sign_up(&signup("Chef", "pw-one")).unwrap();

    let err = accounts.sign_up(&signup("chef", "pw-two")).unwrap_err();
    assert!(matches!(err, AccountError::UsernameTaken(name) if name == "chef"));

    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    assert!(repo.username_exists("CHEF").unwrap());
}

#[test]
fn password_input_is_checked_before_hashing() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);

    let mismatch = accounts
        .sign_up(&SignupRequest {
            password2: "other".to_string(),
            ..signup("dora", "pw")
        })
        .unwrap_err();
    assert!(matches!(mismatch, AccountError::PasswordMismatch));

    let empty = accounts.sign_up(&signup("dora", "")).unwrap_err();
    assert!(matches!(empty, AccountError::EmptyPassword));

    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    assert!(!repo.username_exists("dora").unwrap());
}

#[test]
fn malformed_username_and_email_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);

    let bad_name = accounts.sign_up(&signup("has space", "pw")).unwrap_err();
    assert!(matches!(
        bad_name,
        AccountError::Validation(UserValidationError::InvalidUsername(_))
    ));

    let bad_email = accounts
        .sign_up(&SignupRequest {
            email: Some("not-an-email".to_string()),
            ..signup("eve", "pw")
        })
        .unwrap_err();
    assert!(matches!(
        bad_email,
        AccountError::Validation(UserValidationError::InvalidEmail(_))
    ));
}

#[test]
fn log_in_failures_are_indistinguishable() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);
    accounts.sign_up(&signup("finn", "right")).unwrap();

    let wrong_password = accounts
        .log_in(&LoginRequest {
            username: "finn".to_string(),
            password: "wrong".to_string(),
        })
        .unwrap_err();
    let unknown_user = accounts
        .log_in(&LoginRequest {
            username: "ghost".to_string(),
            password: "right".to_string(),
        })
        .unwrap_err();

    assert!(matches!(wrong_password, AccountError::InvalidCredentials));
    assert!(matches!(unknown_user, AccountError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[test]
fn unreadable_stored_hash_rejects_as_invalid_credentials() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);
    accounts.sign_up(&signup("hana", "right")).unwrap();
    conn.execute(
        "UPDATE users SET password_hash = 'not-a-bcrypt-hash' WHERE username = 'hana';",
        [],
    )
    .unwrap();

    let err = accounts
        .log_in(&LoginRequest {
            username: "hana".to_string(),
            password: "right".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, AccountError::InvalidCredentials));
}

#[test]
fn repeated_unknown_user_log_ins_stay_rejected() {
    let conn = open_db_in_memory().unwrap();
    let accounts = service(&conn);

    for _ in 0..2 {
        let err = accounts
            .log_in(&LoginRequest {
                username: "nobody".to_string(),
                password: "whatever".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }
}
