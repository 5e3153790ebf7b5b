//! Identity for host container instances.

use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// EMBR namespace UUID for deterministic UUID v5 generation.
const EMBR_NAMESPACE: Uuid = uuid!("6f9c2e6a-1f0d-4bfb-9a45-3f2d0cf2b7e1");

/// Identity of a host container instance.
///
/// A container is the application-level object that embeds the engine
/// surface. Its id shows up in trace output and in dead-host diagnostics,
/// so a reader can tell *which* container a late engine call-out was
/// aimed at.
///
/// # UUID Strategy
///
/// Host platforms tear containers down and recreate them (configuration
/// changes, backgrounding) while the logical container stays "the same"
/// from the engine's point of view. Two constructors cover both needs:
///
/// - [`stable`](Self::stable): UUID v5, deterministic from the name.
///   A recreated container keeps its identity.
/// - [`new`](Self::new): UUID v4, random. Every instance is distinct.
///
/// # Example
///
/// ```
/// use embr_types::ContainerId;
///
/// let a = ContainerId::stable("player-shell");
/// let b = ContainerId::stable("player-shell");
/// assert_eq!(a, b); // survives recreation
///
/// let c = ContainerId::new("popup");
/// let d = ContainerId::new("popup");
/// assert_ne!(c, d); // distinct instances
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId {
    /// Unique identifier of this container identity.
    pub uuid: Uuid,
    /// Human-readable container name.
    pub name: String,
}

impl ContainerId {
    /// Creates a container id with a random UUID v4.
    ///
    /// Use for containers where each instance is its own identity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Creates a container id with a deterministic UUID v5.
    ///
    /// The same name always yields the same uuid, so a container
    /// recreated by its platform keeps a stable identity across the
    /// teardown/rebuild cycle.
    #[must_use]
    pub fn stable(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            uuid: Uuid::new_v5(&EMBR_NAMESPACE, name.as_bytes()),
            name,
        }
    }

    /// Returns the short form used in trace fields: `name#xxxxxxxx`.
    #[must_use]
    pub fn short(&self) -> String {
        let hex = self.uuid.simple().to_string();
        format!("{}#{}", self.name, &hex[..8])
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_is_deterministic() {
        let a = ContainerId::stable("shell");
        let b = ContainerId::stable("shell");
        assert_eq!(a.uuid, b.uuid);
        assert_eq!(a, b);
    }

    #[test]
    fn stable_differs_by_name() {
        assert_ne!(
            ContainerId::stable("shell").uuid,
            ContainerId::stable("popup").uuid
        );
    }

    #[test]
    fn new_is_unique_per_instance() {
        let a = ContainerId::new("popup");
        let b = ContainerId::new("popup");
        assert_ne!(a, b);
        assert_eq!(a.name, b.name);
    }

    #[test]
    fn short_form() {
        let id = ContainerId::stable("shell");
        let short = id.short();
        assert!(short.starts_with("shell#"));
        assert_eq!(short.len(), "shell#".len() + 8);
        assert_eq!(id.to_string(), short);
    }

    #[test]
    fn serializes_round_trip() {
        let id = ContainerId::stable("shell");
        let json = serde_json::to_string(&id).unwrap();
        let back: ContainerId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
