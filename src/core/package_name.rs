//! Package names - WHO a package is.
//!
//! PackageName is interned: equal names share one allocation, so comparison
//! and hashing are pointer operations and copies are free.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::{LazyLock, RwLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Global name interner
static NAMES: LazyLock<RwLock<HashSet<&'static str>>> =
    LazyLock::new(|| RwLock::new(HashSet::new()));

/// Error returned when text is not a valid package name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid package name `{name}`: {reason}")]
pub struct PackageNameError {
    pub name: String,
    pub reason: &'static str,
}

/// A validated, interned package name.
///
/// A name is one or more `-`-separated words. Each word is ASCII
/// alphanumeric and contains at least one letter, so `foo-1.2` can never be
/// a name and `foo-bar2` always is.
#[derive(Clone, Copy)]
pub struct PackageName {
    inner: &'static str,
}

impl PackageName {
    /// Parse and intern a package name.
    pub fn new(s: impl AsRef<str>) -> Result<Self, PackageNameError> {
        let s = s.as_ref();
        check_name(s)?;
        Ok(Self::intern(s))
    }

    /// Check whether `s` is a valid package name without interning it.
    pub fn is_valid(s: &str) -> bool {
        check_name(s).is_ok()
    }

    fn intern(s: &str) -> Self {
        if let Some(&interned) = NAMES
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(s)
        {
            return PackageName { inner: interned };
        }

        let mut names = NAMES
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Another thread may have won the race for the write lock
        if let Some(&interned) = names.get(s) {
            return PackageName { inner: interned };
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        names.insert(leaked);
        PackageName { inner: leaked }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.inner
    }
}

fn check_name(s: &str) -> Result<(), PackageNameError> {
    let fail = |reason| {
        Err(PackageNameError {
            name: s.to_string(),
            reason,
        })
    };

    if s.is_empty() {
        return fail("name is empty");
    }

    for word in s.split('-') {
        if word.is_empty() {
            return fail("empty word between `-` separators");
        }
        if !word.chars().all(|c| c.is_ascii_alphanumeric()) {
            return fail("only ASCII letters, digits and `-` are allowed");
        }
        if word.chars().all(|c| c.is_ascii_digit()) {
            return fail("every `-`-separated word needs at least one letter");
        }
    }

    Ok(())
}

impl FromStr for PackageName {
    type Err = PackageNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageName::new(s)
    }
}

impl Deref for PackageName {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.inner
    }
}

impl AsRef<str> for PackageName {
    #[inline]
    fn as_ref(&self) -> &str {
        self.inner
    }
}

impl Borrow<str> for PackageName {
    #[inline]
    fn borrow(&self) -> &str {
        self.inner
    }
}

impl PartialEq for PackageName {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.inner, other.inner)
    }
}

impl Eq for PackageName {}

impl PartialOrd for PackageName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(other.inner)
    }
}

impl Hash for PackageName {
    // Must agree with `Borrow<str>`, so hash the content rather than the pointer.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state)
    }
}

impl fmt::Debug for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner, f)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.inner)
    }
}

impl Serialize for PackageName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PackageName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PackageName::new(s).map_err(serde::de::Error::custom)
    }
}
