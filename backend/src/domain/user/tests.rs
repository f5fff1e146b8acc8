//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn new_user() -> NewUser {
    NewUser::try_from_parts("a@b.com", "A", "B", "secret").expect("valid user")
}

#[rstest]
#[case("a@b.com")]
#[case("first.last+tag@sub.example.org")]
#[case("user@localhost")]
fn email_accepts_valid_addresses(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), raw);
}

#[rstest]
#[case("plainaddress")]
#[case("@missing-local.com")]
#[case("two@@example.com")]
#[case("spaces in@example.com")]
#[case("dot@.example.com")]
#[case("trailing@example.com.")]
fn email_rejects_malformed_addresses(#[case] raw: &str) {
    assert_eq!(
        EmailAddress::new(raw),
        Err(UserValidationError::InvalidEmail)
    );
}

#[rstest]
fn email_is_trimmed() {
    let email = EmailAddress::new("  ada@example.com\t").expect("valid email");
    assert_eq!(email.as_ref(), "ada@example.com");
}

#[rstest]
#[case("")]
#[case("   ")]
fn email_rejects_blank(#[case] raw: &str) {
    assert_eq!(
        EmailAddress::new(raw),
        Err(UserValidationError::Blank {
            field: UserField::Email
        })
    );
}

#[rstest]
fn email_enforces_maximum_length() {
    let at_limit = format!("{}@b.co", "a".repeat(EMAIL_MAX - 5));
    assert!(EmailAddress::new(&at_limit).is_ok());

    let over_limit = format!("{}@b.co", "a".repeat(EMAIL_MAX - 4));
    assert_eq!(
        EmailAddress::new(&over_limit),
        Err(UserValidationError::TooLong {
            field: UserField::Email,
            max: EMAIL_MAX
        })
    );
}

#[rstest]
fn names_report_their_own_field() {
    assert_eq!(
        PersonName::first(" ").unwrap_err().field(),
        UserField::FirstName
    );
    assert_eq!(
        PersonName::last("").unwrap_err().field(),
        UserField::LastName
    );
}

#[rstest]
fn names_enforce_maximum_length() {
    assert!(PersonName::first("a".repeat(NAME_MAX)).is_ok());
    assert_eq!(
        PersonName::last("a".repeat(NAME_MAX + 1)),
        Err(UserValidationError::TooLong {
            field: UserField::LastName,
            max: NAME_MAX
        })
    );
}

#[rstest]
fn name_length_counts_characters_not_bytes() {
    let name = "é".repeat(NAME_MAX);
    assert!(PersonName::first(&name).is_ok());
}

#[rstest]
fn password_is_kept_verbatim() {
    let password = Password::new(" pa ss ").expect("valid password");
    assert_eq!(password.expose(), " pa ss ");
}

#[rstest]
fn password_rules() {
    assert!(matches!(
        Password::new(""),
        Err(UserValidationError::Blank {
            field: UserField::Password
        })
    ));
    assert!(Password::new(&"x".repeat(PASSWORD_MAX)).is_ok());
    assert!(matches!(
        Password::new(&"x".repeat(PASSWORD_MAX + 1)),
        Err(UserValidationError::TooLong {
            field: UserField::Password,
            ..
        })
    ));
}

#[rstest]
fn password_debug_is_redacted() {
    let password = Password::new("hunter2").expect("valid password");
    let rendered = format!("{password:?}");
    assert!(!rendered.contains("hunter2"));
}

#[rstest]
fn try_from_parts_reports_first_failure() {
    let err = NewUser::try_from_parts("bad", "", "", "").expect_err("invalid input");
    assert_eq!(err, UserValidationError::InvalidEmail);
}

#[rstest]
fn users_are_equal_by_identifier(new_user: NewUser) {
    let original = User::new(UserId::new(1), new_user);
    let renamed = original.clone().with_changes(UserChanges {
        first_name: Some(PersonName::first("Z").expect("valid name")),
        ..UserChanges::default()
    });
    let other = User::new(
        UserId::new(2),
        NewUser::try_from_parts("a@b.com", "A", "B", "secret").expect("valid user"),
    );

    assert_eq!(original, renamed);
    assert_ne!(original, other);
}

#[rstest]
fn with_changes_only_touches_supplied_fields(new_user: NewUser) {
    let user = User::new(UserId::new(9), new_user);
    let updated = user.with_changes(UserChanges {
        email: Some(EmailAddress::new("new@b.com").expect("valid email")),
        ..UserChanges::default()
    });

    assert_eq!(updated.id(), UserId::new(9));
    assert_eq!(updated.email().as_ref(), "new@b.com");
    assert_eq!(updated.first_name().as_ref(), "A");
    assert_eq!(updated.last_name().as_ref(), "B");
    assert_eq!(updated.password().expose(), "secret");
}

#[rstest]
fn full_change_set_from_new_user(new_user: NewUser) {
    let changes = UserChanges::from(new_user);
    assert!(!changes.is_empty());
    assert!(UserChanges::default().is_empty());
}
