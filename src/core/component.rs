//! Components - the buildable units inside a package.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named buildable unit of a package.
///
/// Textual form: `lib`, `internal-lib:NAME`, `exe:NAME`, `test:NAME`,
/// `bench:NAME`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NamedComponent {
    /// The package's main library
    Library,
    /// A named internal (sub-)library
    InternalLibrary(String),
    Executable(String),
    TestSuite(String),
    Benchmark(String),
}

impl NamedComponent {
    /// The name used to match bare (`:NAME`) and unqualified (`pkg:NAME`)
    /// component targets. The main library has none.
    pub fn kind_name(&self) -> Option<&str> {
        match self {
            NamedComponent::Library => None,
            NamedComponent::InternalLibrary(n)
            | NamedComponent::Executable(n)
            | NamedComponent::TestSuite(n)
            | NamedComponent::Benchmark(n) => Some(n),
        }
    }

    /// Whether this component answers to `name`.
    pub fn is_named(&self, name: &str) -> bool {
        self.kind_name() == Some(name)
    }

    /// The keyword of this component's kind.
    pub fn kind_keyword(&self) -> &'static str {
        match self {
            NamedComponent::Library => "lib",
            NamedComponent::InternalLibrary(_) => "internal-lib",
            NamedComponent::Executable(_) => "exe",
            NamedComponent::TestSuite(_) => "test",
            NamedComponent::Benchmark(_) => "bench",
        }
    }
}

impl fmt::Display for NamedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind_name() {
            None => f.write_str(self.kind_keyword()),
            Some(name) => write!(f, "{}:{}", self.kind_keyword(), name),
        }
    }
}

impl FromStr for NamedComponent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "lib" {
            return Ok(NamedComponent::Library);
        }

        let (kind, name) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid component `{}`: expected KIND:NAME or `lib`", s))?;

        if name.is_empty() || name.contains(':') {
            return Err(format!("invalid component name in `{}`", s));
        }

        let name = name.to_string();
        match kind {
            "internal-lib" => Ok(NamedComponent::InternalLibrary(name)),
            "exe" => Ok(NamedComponent::Executable(name)),
            "test" => Ok(NamedComponent::TestSuite(name)),
            "bench" => Ok(NamedComponent::Benchmark(name)),
            _ => Err(format!("unknown component kind `{}` in `{}`", kind, s)),
        }
    }
}

impl Serialize for NamedComponent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NamedComponent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
