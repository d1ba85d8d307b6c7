use crate::module::ModuleCandidate;

/// Source of module candidates - the fixed namespace scanned at
/// startup and on manual reload.
///
/// # Behavior
/// - Re-runs must be deterministic: the same units in the same order.
/// - A unit that fails to load is still reported, carrying the
///   failure in its capability shape, so the registry can log the
///   precise validation reason.
pub trait ModuleDiscoveryPort: Send + Sync {
    fn discover(&self) -> Vec<ModuleCandidate>;
}
