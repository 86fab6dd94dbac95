//! Package versions.
//!
//! Versions are dotted sequences of unsigned integers (`1`, `0.1.2.3`) and
//! are ordered component-wise, so `1.2 < 1.2.0 < 1.10`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when text is not a valid version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version `{0}`")]
pub struct VersionError(pub String);

/// A package version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Create a version from its components.
    ///
    /// Returns `None` for an empty component list.
    pub fn new(components: impl Into<Vec<u64>>) -> Option<Self> {
        let components = components.into();
        if components.is_empty() {
            None
        } else {
            Some(Version { components })
        }
    }

    /// Parse a dotted version string.
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let err = || VersionError(s.to_string());

        if s.is_empty() {
            return Err(err());
        }

        let components = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(err());
                }
                part.parse::<u64>().map_err(|_| err())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Version { components })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.components {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", c)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Version::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(v("1.2.0").components(), &[1, 2, 0]);
        assert_eq!(v("0.1.2.3").to_string(), "0.1.2.3");
        assert_eq!(v("7").to_string(), "7");
    }

    #[test]
    fn test_rejects_malformed() {
        for s in ["", ".", "1.", ".1", "1..2", "1.a", "v1", "1-2", "+1"] {
            assert!(Version::parse(s).is_err(), "{s} should not parse");
        }
    }

    #[test]
    fn test_ordering_is_component_wise() {
        assert!(v("1.2") < v("1.2.0"));
        assert!(v("1.2.0") < v("1.10"));
        assert!(v("0.9.9.9") < v("1"));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Version::new(Vec::new()).is_none());
        assert_eq!(Version::new(vec![4, 18]).unwrap(), v("4.18"));
    }
}
