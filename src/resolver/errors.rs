//! Target resolution error types and diagnostics.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::{PackageName, RawInput};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Why an empty target set was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoTargetsReason {
    /// No targets given while running outside any project
    ImplicitGlobal,
    /// No targets given and the project has no packages
    NoProjectPackages,
    /// Targets were given but none of them matched
    NothingMatched,
}

/// Error for one target input, or for the combined target set.
///
/// None of these abort resolution: every stage collects them and the whole
/// run reports them together.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum TargetError {
    #[error("directory not found: `{input}`")]
    #[diagnostic(code(quay::targets::directory_not_found))]
    DirectoryNotFound { input: RawInput },

    #[error("no project packages found in or below `{input}`")]
    #[diagnostic(code(quay::targets::no_directory_match))]
    NoDirectoryMatch { input: RawInput, dir: PathBuf },

    #[error("`{input}`: could not find a project component named `{component}`")]
    #[diagnostic(code(quay::targets::not_a_local_target))]
    NotALocalTarget { input: RawInput, component: String },

    #[error("`{input}`: `{package}` is not a project package")]
    #[diagnostic(code(quay::targets::unknown_local_package))]
    UnknownLocalPackage {
        input: RawInput,
        package: PackageName,
        /// The package exists, but only as a dependency
        is_dependency: bool,
    },

    #[error("`{input}`: package `{package}` has no component `{component}`")]
    #[diagnostic(code(quay::targets::component_not_found))]
    ComponentNotFound {
        input: RawInput,
        package: PackageName,
        component: String,
        available: Vec<String>,
    },

    #[error(
        "`{input}`: component `{component}` is ambiguous (matches {})",
        join_matches(.matches)
    )]
    #[diagnostic(code(quay::targets::ambiguous_component))]
    AmbiguousComponent {
        input: RawInput,
        component: String,
        /// Every match, as `package:kind:name`
        matches: Vec<String>,
    },

    #[error("`{input}`: `{package}` is a project package and cannot be built at a specific version")]
    #[diagnostic(code(quay::targets::local_package_version))]
    LocalPackageVersionConflict { input: RawInput, package: PackageName },

    #[error("`{input}`: cannot override `{package}` from the command line, it comes from {location}")]
    #[diagnostic(code(quay::targets::non_index_override))]
    NonIndexOverrideRefused {
        input: RawInput,
        package: PackageName,
        location: String,
    },

    #[error("`{input}`: failed to query the package index for `{package}`: {message}")]
    #[diagnostic(code(quay::targets::index_query))]
    IndexQuery {
        input: RawInput,
        package: PackageName,
        message: String,
    },

    #[error("overlapping targets for package `{package}`: {}", join_inputs(.inputs))]
    #[diagnostic(code(quay::targets::conflicting_targets))]
    ConflictingTargetSpecification {
        package: PackageName,
        inputs: Vec<RawInput>,
    },

    #[error("conflicting versions requested for `{package}`: {}", join_inputs(.inputs))]
    #[diagnostic(code(quay::targets::conflicting_versions))]
    ConflictingAddedDependency {
        package: PackageName,
        inputs: Vec<RawInput>,
        locations: Vec<String>,
    },

    #[error("{}", no_targets_message(.reason))]
    #[diagnostic(code(quay::targets::no_targets))]
    NoTargetsMatched { reason: NoTargetsReason },
}

fn join_inputs(inputs: &[RawInput]) -> String {
    inputs
        .iter()
        .map(|i| format!("`{}`", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_matches(matches: &[String]) -> String {
    matches
        .iter()
        .map(|m| format!("`{}`", m))
        .collect::<Vec<_>>()
        .join(", ")
}

fn no_targets_message(reason: &NoTargetsReason) -> &'static str {
    match reason {
        NoTargetsReason::ImplicitGlobal => {
            "the specified targets matched no packages (not inside a project); \
             run `quay init` to create one"
        }
        NoTargetsReason::NoProjectPackages => "the project contains no local packages",
        NoTargetsReason::NothingMatched => "the specified targets matched no packages",
    }
}

impl TargetError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            TargetError::DirectoryNotFound { .. } => diag.with_context(
                "the target is neither a package, a component nor an existing directory",
            ),

            TargetError::NoDirectoryMatch { dir, .. } => diag
                .with_context(format!("resolved to {}", dir.display()))
                .with_suggestion("Name a directory that contains a project package"),

            TargetError::NotALocalTarget { component, .. } => diag.with_suggestion(format!(
                "Check the spelling of `{}` or qualify it as `PACKAGE:{}`",
                component, component
            )),

            TargetError::UnknownLocalPackage {
                package,
                is_dependency,
                ..
            } => {
                let diag = if *is_dependency {
                    diag.with_context(format!(
                        "`{}` is only known as a dependency; components can only be \
                         selected on project packages",
                        package
                    ))
                } else {
                    diag
                };
                diag.with_suggestion(format!("Build the whole package with `{}`", package))
            }

            TargetError::ComponentNotFound { available, .. } => {
                let diag = if available.is_empty() {
                    diag.with_context("the package declares no components")
                } else {
                    diag.with_context(format!("available components: {}", available.join(", ")))
                };
                diag.with_suggestion(suggestions::LIST_COMPONENTS)
            }

            TargetError::AmbiguousComponent { matches, .. } => {
                let first = matches.first().map(String::as_str).unwrap_or("PACKAGE:KIND:NAME");
                matches
                    .iter()
                    .fold(diag, |d, m| d.with_context(format!("matches `{}`", m)))
                    .with_suggestion(format!("Spell out the target in full, e.g. `{}`", first))
            }

            TargetError::LocalPackageVersionConflict { package, .. } => diag.with_suggestion(
                format!("Build the package without a version: `{}`", package),
            ),

            TargetError::NonIndexOverrideRefused { .. } => {
                diag.with_suggestion(suggestions::EDIT_CONFIG)
            }

            TargetError::IndexQuery { .. } => {
                diag.with_suggestion("Check that the package index is readable")
            }

            TargetError::ConflictingTargetSpecification { package, .. } => diag.with_suggestion(
                format!(
                    "Either build all of `{}` or list only the components you need",
                    package
                ),
            ),

            TargetError::ConflictingAddedDependency { locations, .. } => locations
                .iter()
                .fold(diag, |d, l| d.with_context(format!("requested {}", l)))
                .with_suggestion("Request a single version per package"),

            TargetError::NoTargetsMatched { reason } => match reason {
                NoTargetsReason::ImplicitGlobal => diag.with_suggestion(suggestions::RUN_INIT),
                NoTargetsReason::NoProjectPackages => {
                    diag.with_suggestion(suggestions::ADD_PROJECT_PACKAGE)
                }
                NoTargetsReason::NothingMatched => diag,
            },
        }
    }
}

/// Every error of a failed resolution run, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetErrors(pub Vec<TargetError>);

impl TargetErrors {
    pub fn errors(&self) -> &[TargetError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TargetErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&messages.join("\n"))
    }
}

impl std::error::Error for TargetErrors {}
