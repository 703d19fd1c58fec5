//! The breed codes used by the collectible contracts

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use alloy::primitives::{Address, U256};

use crate::{constants::OPENSEA_URL, errors::ScriptError};

/// A breed, as stored on-chain by its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breed {
    /// Code 0
    Pug,
    /// Code 1
    ShibaInu,
    /// Code 2
    StBernard,
}

impl Breed {
    /// All breeds, indexed by code
    pub const ALL: [Breed; 3] = [Breed::Pug, Breed::ShibaInu, Breed::StBernard];

    /// The label of the breed
    pub fn label(&self) -> &'static str {
        match self {
            Breed::Pug => "PUG",
            Breed::ShibaInu => "SHIBA-INU",
            Breed::StBernard => "ST_BERNARD",
        }
    }

    /// The on-chain code of the breed
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl Display for Breed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Breed {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Breed::ALL
            .into_iter()
            .find(|breed| breed.label() == s)
            .ok_or_else(|| ScriptError::Configuration(format!("unknown breed `{}`", s)))
    }
}

/// Look up a breed by its on-chain code
pub fn get_breed(code: u8) -> Result<Breed, ScriptError> {
    Breed::ALL
        .get(code as usize)
        .copied()
        .ok_or_else(|| ScriptError::Configuration(format!("unknown breed code {}", code)))
}

/// The marketplace url of a token
pub fn opensea_url(contract: Address, token_id: U256) -> String {
    format!("{}/{:#x}/{}", OPENSEA_URL, contract, token_id)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, U256};

    use super::{get_breed, opensea_url, Breed};

    #[test]
    fn test_get_breed() {
        assert_eq!(get_breed(0).unwrap(), Breed::Pug);
        assert_eq!(get_breed(1).unwrap().to_string(), "SHIBA-INU");
        assert_eq!(get_breed(2).unwrap().to_string(), "ST_BERNARD");
        assert!(get_breed(3).is_err());
    }

    #[test]
    fn test_codes_and_labels() {
        for breed in Breed::ALL {
            assert_eq!(get_breed(breed.code()).unwrap(), breed);
            assert_eq!(breed.label().parse::<Breed>().unwrap(), breed);
        }
    }

    #[test]
    fn test_opensea_url() {
        let url = opensea_url(
            address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            U256::from(7),
        );
        assert_eq!(
            url,
            "https://testnets.opensea.io/assets/0x5fbdb2315678afecb367f032d93f642f64180aa3/7"
        );
    }
}
