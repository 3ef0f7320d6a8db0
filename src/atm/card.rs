use std::fmt;

use super::error::ValueError;

/// A payment card as presented at the ATM.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Card {
    number: String,
    pin: u16,
}

impl Card {
    pub fn new(number: impl Into<String>, pin: u16) -> Result<Self, ValueError> {
        let number = number.into();
        if number.trim().is_empty() {
            return Err(ValueError::BlankCardNumber);
        }
        Ok(Self { number, pin })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn pin(&self) -> u16 {
        self.pin
    }
}

// Keeps the PIN out of logs.
impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("number", &self.number)
            .field("pin", &"****")
            .finish()
    }
}

/// Proof that a card was authorized, valid for a single withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthenticationToken {
    user_id: String,
    authorization_code: u32,
}

impl AuthenticationToken {
    pub fn new(user_id: impl Into<String>, authorization_code: u32) -> Result<Self, ValueError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(ValueError::BlankUserId);
        }
        Ok(Self {
            user_id,
            authorization_code,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn authorization_code(&self) -> u32 {
        self.authorization_code
    }
}

impl fmt::Display for AuthenticationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.user_id, self.authorization_code)
    }
}
