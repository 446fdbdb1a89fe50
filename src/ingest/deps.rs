//! Resolves manifest version ranges to exact versions.

use std::collections::BTreeMap;

use super::model::ResolutionFailure;
use crate::ports::VersionResolver;

/// Exact versions for the dependencies that resolved, plus those that did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMapping {
    /// Package name to exact version.
    pub resolved: BTreeMap<String, String>,
    /// Packages whose range could not be resolved.
    pub failures: Vec<ResolutionFailure>,
}

/// Resolves every `name → range` entry through `resolver`.
///
/// Each package is resolved on its own; a failure is recorded and the
/// remaining packages are still tried. An empty answer from the resolver
/// counts as a failure.
pub async fn map_dependencies(
    resolver: &dyn VersionResolver,
    ranges: &BTreeMap<String, String>,
) -> DependencyMapping {
    let mut mapping = DependencyMapping::default();

    for (name, range) in ranges {
        let failure = |message: String| ResolutionFailure {
            name: name.clone(),
            range: range.clone(),
            message,
        };

        match resolver.resolve(name, range).await {
            Ok(version) if version.trim().is_empty() => {
                mapping.failures.push(failure("resolver returned an empty version".to_string()));
            }
            Ok(version) => {
                mapping.resolved.insert(name.clone(), version.trim().to_string());
            }
            Err(e) => mapping.failures.push(failure(e.to_string())),
        }
    }

    mapping
}
