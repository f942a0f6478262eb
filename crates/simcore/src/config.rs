//! Runtime-tunable configuration.
//!
//! The teacher's `cvar.rs` is a stringly-typed name→value registry read
//! at startup. Schema parameters here (`MAX_ENTITIES`, ring `CAP`,
//! `MAX_BYTES`) are compile-time generic constants, not cvars — there
//! is nothing left to register them against. What remains genuinely
//! runtime-tunable (diagnostic verbosity, whether the unchecked hot
//! path is enabled) is collected into a plain struct with
//! `Default`/builder methods instead, since there is no console to
//! type cvar names into.

use crate::diag::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagConfig {
    pub level: Level,
}

impl Default for DiagConfig {
    fn default() -> Self {
        DiagConfig { level: Level::Info }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub diag: DiagConfig,
    /// Whether host code is permitted to call the ECS crate's
    /// `unsafe` unchecked accessors. Purely advisory — `simcore`
    /// itself never calls them — a flag a host can check before
    /// opting into the §9 unchecked hot path.
    pub enable_unchecked_hot_path: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig { diag: DiagConfig::default(), enable_unchecked_hot_path: false }
    }
}

impl SimConfig {
    pub fn with_diag_level(mut self, level: Level) -> Self {
        self.diag.level = level;
        self
    }

    pub fn with_unchecked_hot_path(mut self, enabled: bool) -> Self {
        self.enable_unchecked_hot_path = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_info_level_and_checked_path() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.diag.level, Level::Info);
        assert!(!cfg.enable_unchecked_hot_path);
    }

    #[test]
    fn builder_methods_chain() {
        let cfg = SimConfig::default()
            .with_diag_level(Level::Trace)
            .with_unchecked_hot_path(true);
        assert_eq!(cfg.diag.level, Level::Trace);
        assert!(cfg.enable_unchecked_hot_path);
    }
}
