//! Module registry
//!
//! Discovers candidate units from a `ModuleDiscoveryPort`, validates
//! the plugin contract, and exposes the ordered list of dispatchable
//! modules. Validation failures exclude the unit and log one entry
//! with the specific reason; startup is never aborted by a bad
//! module.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{info, warn};

use crate::errors::{ModuleExecutionError, ValidationError};
use crate::ports::ModuleDiscoveryPort;

use super::{ModuleCandidate, ModuleCapability, ModuleDescriptor, ModuleProcessor};

/// A validated, enabled module as handed to the pipeline.
#[derive(Clone)]
pub struct ActiveModule {
    pub name: String,
    pub processor: Arc<dyn ModuleProcessor>,
}

pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
}

impl ModuleRegistry {
    pub fn empty() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Populate from a discovery source, validating each candidate.
    ///
    /// Discovery order is preserved, so repeated runs over the same
    /// source are deterministic.
    pub fn discover(source: &dyn ModuleDiscoveryPort) -> Self {
        let mut registry = Self::empty();
        for candidate in source.discover() {
            registry.admit(candidate);
        }
        info!(
            "module discovery finished: {} registered, {} active",
            registry.modules.len(),
            registry.active_modules().len()
        );
        registry
    }

    /// Re-run discovery, preserving enabled-state overrides for
    /// modules that survive the reload.
    pub fn reload(&mut self, source: &dyn ModuleDiscoveryPort) {
        let overrides: BTreeMap<String, bool> = self
            .modules
            .iter()
            .map(|m| (m.name.clone(), m.enabled))
            .collect();

        *self = Self::discover(source);

        for module in &mut self.modules {
            if let Some(&enabled) = overrides.get(&module.name) {
                module.enabled = enabled;
            }
        }
    }

    /// Apply `modules.<name>` switches from configuration. Unknown
    /// names are ignored; discovery is not re-run.
    pub fn apply_settings(&mut self, switches: &BTreeMap<String, bool>) {
        for module in &mut self.modules {
            if let Some(&enabled) = switches.get(&module.name) {
                if module.enabled != enabled {
                    info!(
                        "module '{}' {} via configuration",
                        module.name,
                        if enabled { "enabled" } else { "disabled" }
                    );
                    module.enabled = enabled;
                }
            }
        }
    }

    /// Validated and enabled modules, in stable discovery order.
    pub fn active_modules(&self) -> Vec<ActiveModule> {
        self.modules
            .iter()
            .filter(|m| m.is_active())
            .filter_map(|m| {
                m.processor.as_ref().map(|p| ActiveModule {
                    name: m.name.clone(),
                    processor: Arc::clone(p),
                })
            })
            .collect()
    }

    pub fn descriptors(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    /// Record a dispatch failure against the module's descriptor.
    pub fn record_error(&mut self, name: &str, error: &ModuleExecutionError) {
        if let Some(module) = self.modules.iter_mut().find(|m| m.name == name) {
            module.last_error = Some(error.to_string());
        }
    }

    fn admit(&mut self, candidate: ModuleCandidate) {
        let name = candidate.name;

        let (processor, validated) = match candidate.capability {
            ModuleCapability::Process(processor) => {
                info!("module '{name}' validated");
                (Some(processor), true)
            }
            ModuleCapability::MissingEntryPoint => {
                let error = ValidationError::MissingEntryPoint { name: name.clone() };
                warn!("{error}; module excluded");
                (None, false)
            }
            ModuleCapability::NotCallable { reason } => {
                let error = ValidationError::NotCallable {
                    name: name.clone(),
                    reason,
                };
                warn!("{error}; module excluded");
                (None, false)
            }
            ModuleCapability::LoadFailed { reason } => {
                let error = ValidationError::LoadFailed {
                    name: name.clone(),
                    reason,
                };
                warn!("{error}; module excluded");
                (None, false)
            }
        };

        self.modules.push(ModuleDescriptor {
            name,
            processor,
            enabled: true,
            validated,
            last_error: None,
        });
    }
}
