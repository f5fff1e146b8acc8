//! User entity and its validated field types.
//!
//! Every field type validates on construction, so holding a [`NewUser`] or a
//! [`User`] means the data already satisfies the column constraints. A
//! [`NewUser`] has never been persisted; a [`User`] always carries the
//! identifier the store assigned to it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use zeroize::Zeroizing;

/// Maximum length of an email address, in characters.
pub const EMAIL_MAX: usize = 50;
/// Maximum length of a first or last name, in characters.
pub const NAME_MAX: usize = 20;
/// Maximum length of a password, in characters.
pub const PASSWORD_MAX: usize = 10;

/// Mutable user field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Email,
    FirstName,
    LastName,
    Password,
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Email => "email",
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Password => "password",
        };
        f.write_str(label)
    }
}

/// Validation errors raised while building user field values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Field was empty, or only whitespace where whitespace is trimmed.
    #[error("{field} must not be blank")]
    Blank { field: UserField },
    /// Field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: UserField, max: usize },
    /// Email address does not have a valid syntax.
    #[error("email must be a valid email address")]
    InvalidEmail,
}

impl UserValidationError {
    /// Field the error refers to.
    #[must_use]
    pub fn field(&self) -> UserField {
        match self {
            Self::Blank { field } | Self::TooLong { field, .. } => *field,
            Self::InvalidEmail => UserField::Email,
        }
    }
}

fn check_length(value: &str, field: UserField, max: usize) -> Result<(), UserValidationError> {
    if value.chars().count() > max {
        return Err(UserValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Local part per RFC 5322 atext; domain as dot-separated DNS labels.
    let pattern = concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$",
    );
    Regex::new(pattern).expect("valid regex")
});

/// Syntactically valid email address, trimmed, at most [`EMAIL_MAX`] characters.
///
/// # Examples
/// ```
/// use user_service::domain::EmailAddress;
///
/// let email = EmailAddress::new("  ada@example.com ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.com");
/// assert!(EmailAddress::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an email address.
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::Blank {
                field: UserField::Email,
            });
        }
        check_length(trimmed, UserField::Email, EMAIL_MAX)?;
        if !EMAIL_RE.is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First or last name, trimmed, non-blank, at most [`NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a first name.
    pub fn first(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::parse(value.as_ref(), UserField::FirstName)
    }

    /// Validate a last name.
    pub fn last(value: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::parse(value.as_ref(), UserField::LastName)
    }

    fn parse(value: &str, field: UserField) -> Result<Self, UserValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::Blank { field });
        }
        check_length(trimmed, field, NAME_MAX)?;
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User password.
///
/// Kept verbatim (no trimming), wiped from memory on drop and never printed
/// by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a password.
    pub fn new(value: &str) -> Result<Self, UserValidationError> {
        if value.is_empty() {
            return Err(UserValidationError::Blank {
                field: UserField::Password,
            });
        }
        check_length(value, UserField::Password, PASSWORD_MAX)?;
        Ok(Self(Zeroizing::new(value.to_owned())))
    }

    /// Expose the secret for storage.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// User that has not been persisted yet and therefore has no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    email: EmailAddress,
    first_name: PersonName,
    last_name: PersonName,
    password: Password,
}

impl NewUser {
    /// Assemble a new user from validated fields.
    #[must_use]
    pub fn new(
        email: EmailAddress,
        first_name: PersonName,
        last_name: PersonName,
        password: Password,
    ) -> Self {
        Self {
            email,
            first_name,
            last_name,
            password,
        }
    }

    /// Validate raw strings into a new user, reporting the first failure.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::NewUser;
    ///
    /// let user = NewUser::try_from_parts("a@b.com", "A", "B", "secret").unwrap();
    /// assert_eq!(user.email().as_ref(), "a@b.com");
    /// ```
    pub fn try_from_parts(
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            EmailAddress::new(email)?,
            PersonName::first(first_name)?,
            PersonName::last(last_name)?,
            Password::new(password)?,
        ))
    }

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// First name.
    #[must_use]
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Last name.
    #[must_use]
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Password.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Persisted user.
///
/// ## Invariants
/// - `id` was assigned by the store when the record was created and never
///   changes afterwards.
/// - Two users are equal iff their identifiers are equal; compare accessors
///   when field-by-field equality matters.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    first_name: PersonName,
    last_name: PersonName,
    password: Password,
}

impl User {
    /// Attach a store-assigned identifier to a new user.
    #[must_use]
    pub fn new(id: UserId, user: NewUser) -> Self {
        let NewUser {
            email,
            first_name,
            last_name,
            password,
        } = user;
        Self {
            id,
            email,
            first_name,
            last_name,
            password,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// First name.
    #[must_use]
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Last name.
    #[must_use]
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Password.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Apply the supplied changes, keeping the identifier and every field
    /// the change set leaves out.
    #[must_use]
    pub fn with_changes(self, changes: UserChanges) -> Self {
        let UserChanges {
            email,
            first_name,
            last_name,
            password,
        } = changes;
        Self {
            id: self.id,
            email: email.unwrap_or(self.email),
            first_name: first_name.unwrap_or(self.first_name),
            last_name: last_name.unwrap_or(self.last_name),
            password: password.unwrap_or(self.password),
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Partial update of a user's mutable fields.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<EmailAddress>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub password: Option<Password>,
}

impl UserChanges {
    /// Whether the change set leaves every field untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.password.is_none()
    }
}

impl From<NewUser> for UserChanges {
    fn from(value: NewUser) -> Self {
        Self {
            email: Some(value.email),
            first_name: Some(value.first_name),
            last_name: Some(value.last_name),
            password: Some(value.password),
        }
    }
}

#[cfg(test)]
mod tests;
