//! Contact number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ContactNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactNumberError {
    /// The input string is empty.
    #[error("number cannot be empty")]
    Empty,
    /// Too few or too many digits.
    #[error("number must contain between {min} and {max} digits")]
    DigitCount {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
    },
    /// A character other than digits, separators or a leading `+`.
    #[error("number contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// An admin's phone or contact number.
///
/// The number is stored exactly as entered (after trimming surrounding
/// whitespace), so `"555-0100"` and `"5550100"` are distinct values for
/// uniqueness purposes. Validation ignores spaces and dashes and allows a
/// single leading `+`.
///
/// ```
/// use branchdesk_core::ContactNumber;
///
/// assert!(ContactNumber::parse("+44 20 7946 0958").is_ok());
/// assert!(ContactNumber::parse("111").is_ok());
/// assert!(ContactNumber::parse("12").is_err());
/// assert!(ContactNumber::parse("call me").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 3;
    /// Maximum number of digits (E.164 allows 15, extensions push it higher).
    pub const MAX_DIGITS: usize = 20;

    /// Parse a `ContactNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters other than
    /// digits, spaces, dashes and a leading `+`, or has a digit count outside
    /// `MIN_DIGITS..=MAX_DIGITS`.
    pub fn parse(s: &str) -> Result<Self, ContactNumberError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ContactNumberError::Empty);
        }

        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let mut digits = 0;
        for c in body.chars() {
            match c {
                '0'..='9' => digits += 1,
                ' ' | '-' => {}
                other => return Err(ContactNumberError::InvalidCharacter(other)),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits) {
            return Err(ContactNumberError::DigitCount {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ContactNumber {
    type Err = ContactNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ContactNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ContactNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_formatting_but_trims() {
        let number = ContactNumber::parse("  +1 555-0100 ").unwrap();
        assert_eq!(number.as_str(), "+1 555-0100");
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert_eq!(ContactNumber::parse(""), Err(ContactNumberError::Empty));
        assert_eq!(ContactNumber::parse("   "), Err(ContactNumberError::Empty));
    }

    #[test]
    fn test_rejects_letters_and_inner_plus() {
        assert_eq!(
            ContactNumber::parse("555x"),
            Err(ContactNumberError::InvalidCharacter('x'))
        );
        assert_eq!(
            ContactNumber::parse("55+5"),
            Err(ContactNumberError::InvalidCharacter('+'))
        );
    }

    #[test]
    fn test_digit_bounds() {
        assert!(ContactNumber::parse("12").is_err());
        assert!(ContactNumber::parse("123").is_ok());
        assert!(ContactNumber::parse(&"9".repeat(20)).is_ok());
        assert!(ContactNumber::parse(&"9".repeat(21)).is_err());
        // separators do not count
        assert!(ContactNumber::parse("1-2").is_err());
    }
}
