//! Overload resolution.
//!
//! Pure function over the registration table; the service calls it under
//! its read lock.

use super::entities::RegisteredAction;

/// Pick the registration `invoke(name, parameters)` should run.
///
/// An exact candidate has the default signature when `has_parameters` is
/// false and a named signature when it is true. The most recently
/// registered exact candidate wins; without one, the most recent
/// registration of `name` runs.
pub fn resolve<'a>(
    actions: &'a [RegisteredAction],
    name: &str,
    has_parameters: bool,
) -> Option<&'a RegisteredAction> {
    let latest = move |exact_only: bool| {
        actions
            .iter()
            .filter(|a| a.name == name)
            .filter(|a| !exact_only || a.is_default_signature() != has_parameters)
            .max_by_key(|a| a.sequence)
    };

    latest(true).or_else(|| latest(false))
}
