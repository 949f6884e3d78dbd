//! Shared option types that replace boolean flag parameters in the Rust API.

/// Controls whether nanopubs are sent to a nanopub server or only signed locally.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PublishMode {
    /// Sign locally and substitute placeholder identifiers.
    #[default]
    DryRun,
    /// Sign and publish to the configured server.
    Publish,
}

impl PublishMode {
    pub fn is_publish(self) -> bool {
        matches!(self, PublishMode::Publish)
    }
}

impl From<bool> for PublishMode {
    fn from(value: bool) -> Self {
        if value {
            PublishMode::Publish
        } else {
            PublishMode::DryRun
        }
    }
}

impl From<PublishMode> for bool {
    fn from(value: PublishMode) -> Self {
        value.is_publish()
    }
}

/// Whether the first statement of a run is checked against the shape schema.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Validation {
    Enabled,
    #[default]
    Disabled,
}

impl Validation {
    pub fn is_enabled(self) -> bool {
        matches!(self, Validation::Enabled)
    }
}

impl From<bool> for Validation {
    fn from(value: bool) -> Self {
        if value {
            Validation::Enabled
        } else {
            Validation::Disabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_mode_from_bool() {
        assert_eq!(PublishMode::from(true), PublishMode::Publish);
        assert_eq!(PublishMode::from(false), PublishMode::DryRun);
        assert!(!bool::from(PublishMode::default()));
    }

    #[test]
    fn test_validation_from_bool() {
        assert!(Validation::from(true).is_enabled());
        assert!(!Validation::default().is_enabled());
    }
}
