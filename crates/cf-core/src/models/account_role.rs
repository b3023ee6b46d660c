use crate::{CoreError, CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountRole {
    Founder,
    Investor,
    Builder,
    Lurker,
}

impl AccountRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Founder => "FOUNDER",
            Self::Investor => "INVESTOR",
            Self::Builder => "BUILDER",
            Self::Lurker => "LURKER",
        }
    }

    /// Whether accounts of this role go through the verification flow
    /// after registering or switching into it.
    pub fn requires_verification(&self) -> bool {
        matches!(self, Self::Investor)
    }
}

impl FromStr for AccountRole {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_uppercase().as_str() {
            "FOUNDER" => Ok(Self::Founder),
            "INVESTOR" => Ok(Self::Investor),
            "BUILDER" => Ok(Self::Builder),
            "LURKER" => Ok(Self::Lurker),
            _ => Err(CoreError::InvalidRole {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
