use super::config::SanitizerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Whether plain text is currently shown
///
/// Starts open so anything said before the first speaker marker is treated as coming from the
/// primary agent.
pub struct VisibilityGate {
    open: bool,
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::open()
    }
}

impl VisibilityGate {
    pub fn open() -> Self {
        Self { open: true }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Gate state once `identity` starts speaking
    pub fn after_marker(self, identity: &str, config: &SanitizerConfig) -> Self {
        Self {
            open: config.is_primary_agent(identity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_open() {
        assert!(VisibilityGate::default().is_open());
    }

    #[test]
    fn test_transitions() {
        let config = SanitizerConfig::default();
        let gate = VisibilityGate::default();

        let gate = gate.after_marker("sub-1", &config);
        assert!(!gate.is_open());
        let gate = gate.after_marker("another-sub", &config);
        assert!(!gate.is_open());
        let gate = gate.after_marker("ma-final", &config);
        assert!(gate.is_open());
        let gate = gate.after_marker("sa-helper", &config);
        assert!(gate.is_open());
    }
}
