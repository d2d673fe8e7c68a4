use std::sync::Arc;

use crate::foundation::error::{DeinterlaceError, DeinterlaceResult};
use crate::kernels::CpuFeatures;
use crate::method::{Method, builtin_methods};

/// Ordered, capability-tagged set of deinterlacing methods.
///
/// Built once at startup, filtered once against the host, then shared read-only (usually behind
/// an `Arc`) by every stream.
#[derive(Clone, Debug, Default)]
pub struct MethodRegistry {
    methods: Vec<Arc<Method>>,
}

impl MethodRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in methods.
    pub fn with_builtin_methods() -> Self {
        Self {
            methods: builtin_methods(),
        }
    }

    /// Append `method` unless the same allocation is already registered.
    ///
    /// Returns whether the method was inserted.
    pub fn register(&mut self, method: Arc<Method>) -> DeinterlaceResult<bool> {
        if !(1..=4).contains(&method.fields_required) {
            return Err(DeinterlaceError::validation(format!(
                "method '{}' requires {} fields, expected 1..=4",
                method.short_name, method.fields_required
            )));
        }
        if self.methods.iter().any(|m| Arc::ptr_eq(m, &method)) {
            return Ok(false);
        }
        self.methods.push(method);
        Ok(true)
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Return `true` when no method is registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Method at registration index `i`.
    pub fn get(&self, i: usize) -> Option<&Arc<Method>> {
        self.methods.get(i)
    }

    /// Methods in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Method>> {
        self.methods.iter()
    }

    /// Look a method up by short name or full name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<&Arc<Method>> {
        self.methods.iter().find(|m| {
            m.short_name.eq_ignore_ascii_case(name) || m.name.eq_ignore_ascii_case(name)
        })
    }

    /// Drop methods the host cannot run, keeping survivors in order.
    ///
    /// A method survives when its capability bits are a subset of `available` and it needs no
    /// more than `fields_available` field buffers. An empty result is a configuration error.
    pub fn filter(
        &mut self,
        available: CpuFeatures,
        fields_available: usize,
    ) -> DeinterlaceResult<()> {
        self.methods.retain(|m| {
            if !available.contains(m.accel_required) {
                tracing::debug!(
                    method = %m.short_name,
                    missing = %m.accel_required.missing_from(available),
                    "dropping method: cpu features unavailable"
                );
                return false;
            }
            if m.fields_required > fields_available {
                tracing::debug!(
                    method = %m.short_name,
                    fields_required = m.fields_required,
                    fields_available,
                    "dropping method: not enough field buffers"
                );
                return false;
            }
            true
        });

        if self.methods.is_empty() {
            return Err(DeinterlaceError::configuration(format!(
                "no deinterlacing method supports features [{available}] with {fields_available} field buffers"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/method/registry.rs"]
mod tests;
