//! Acquire/release bracketing
//!
//! Hardware-accelerated backends may need to serialize access to a shared
//! permutation unit. This models that as a scoped guard so release happens
//! on every exit path, including early returns and panics; the software
//! backends in this crate have nothing to serialize, so acquiring is a
//! no-op that exists purely to keep the call shape uniform.

/// RAII guard returned by `StateRepr::acquire`. Dropping it calls
/// `StateRepr::release`.
pub struct AcquireGuard<'a, S: crate::core::StateRepr> {
    state: &'a mut S,
}

impl<'a, S: crate::core::StateRepr> AcquireGuard<'a, S> {
    pub(crate) fn new(state: &'a mut S) -> Self {
        state.acquire_raw();
        Self { state }
    }

    /// Access the guarded state.
    pub fn get_mut(&mut self) -> &mut S {
        self.state
    }
}

impl<S: crate::core::StateRepr> Drop for AcquireGuard<'_, S> {
    fn drop(&mut self) {
        self.state.release_raw();
    }
}
