//! Local configuration records

/// Named backend deployment the CLI can talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub host: String,
}
