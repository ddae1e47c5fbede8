use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown metal {0}.")]
pub struct UnknownMetal(pub String);

/// One of the tracked precious metals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
    Palladium,
}

impl Metal {
    /// Every metal, in the order snapshots are produced.
    pub const ALL: [Metal; 4] = [Metal::Gold, Metal::Silver, Metal::Platinum, Metal::Palladium];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Platinum => "platinum",
            Self::Palladium => "palladium",
        }
    }

    /// ISO 4217 style code, as used by upstream quote endpoints.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Gold => "XAU",
            Self::Silver => "XAG",
            Self::Platinum => "XPT",
            Self::Palladium => "XPD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Gold => "XAU/INR",
            Self::Silver => "XAG/INR",
            Self::Platinum => "XPT/INR",
            Self::Palladium => "XPD/INR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gold => "Gold (24K)",
            Self::Silver => "Silver",
            Self::Platinum => "Platinum",
            Self::Palladium => "Palladium",
        }
    }
}

impl FromStr for Metal {
    type Err = UnknownMetal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metal::ALL
            .iter()
            .copied()
            .find(|metal| metal.id() == s)
            .ok_or_else(|| UnknownMetal(s.to_owned()))
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known() {
        for metal in Metal::ALL {
            assert_eq!(metal.id().parse::<Metal>().unwrap(), metal);
        }
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "bronze".parse::<Metal>().unwrap_err(),
            UnknownMetal("bronze".to_owned())
        );
        // Identifiers are case sensitive.
        "Gold".parse::<Metal>().unwrap_err();
    }

    #[test]
    fn serde_uses_identifier() {
        assert_eq!(serde_json::to_string(&Metal::Palladium).unwrap(), "\"palladium\"");
        let metal: Metal = serde_json::from_str("\"silver\"").unwrap();
        assert_eq!(metal, Metal::Silver);
    }
}
