//! State token model: generation, validation, and serde plumbing.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use rand::Rng;
// self
use crate::_prelude::*;

/// Number of decimal digits in a state token.
pub const STATE_TOKEN_LEN: usize = 8;

/// Error returned when state token validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StateTokenError {
	/// The token does not contain exactly [`STATE_TOKEN_LEN`] characters.
	#[error("State token must contain exactly {expected} characters, found {found}.")]
	WrongLength {
		/// Expected character count.
		expected: usize,
		/// Character count of the rejected value.
		found: usize,
	},
	/// The token contains a character outside `0`-`9`.
	#[error("State token must consist of decimal digits only.")]
	NonDigit,
}

/// Short-lived nonce correlating an outgoing authorization redirect with its callback.
///
/// Tokens are sequences of [`STATE_TOKEN_LEN`] independently drawn decimal digits from a
/// non-cryptographic pseudo-random source. 10^8 possibilities is a known-weak nonce size;
/// the width is kept for wire compatibility with the deployed callback handler rather
/// than widened silently.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateToken(String);
impl StateToken {
	/// Draws a fresh token of [`STATE_TOKEN_LEN`] random decimal digits.
	pub fn generate() -> Self {
		let mut rng = rand::rng();
		let digits =
			(0..STATE_TOKEN_LEN).map(|_| char::from(b'0' + rng.random_range(0..10_u8))).collect();

		Self(digits)
	}

	/// Wraps an externally supplied value after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, StateTokenError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the token as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for StateToken {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for StateToken {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for StateToken {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<StateToken> for String {
	fn from(value: StateToken) -> Self {
		value.0
	}
}
impl TryFrom<String> for StateToken {
	type Error = StateTokenError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for StateToken {
	type Err = StateTokenError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for StateToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "StateToken({})", self.0)
	}
}
impl Display for StateToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(view: &str) -> Result<(), StateTokenError> {
	if view.len() != STATE_TOKEN_LEN {
		return Err(StateTokenError::WrongLength {
			expected: STATE_TOKEN_LEN,
			found: view.chars().count(),
		});
	}
	if !view.bytes().all(|b| b.is_ascii_digit()) {
		return Err(StateTokenError::NonDigit);
	}

	Ok(())
}
