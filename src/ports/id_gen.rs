//! ID generator port for producing short record identifiers.

/// Generates opaque short identifiers for directory and module records.
///
/// The tree mapper never trusts this port for uniqueness on its own; it
/// rejects repeats. A predictable sequence can therefore be substituted in
/// tests and cassette playback.
pub trait IdGenerator: Send + Sync {
    /// Generates a new identifier string.
    fn generate_id(&self) -> String;
}
