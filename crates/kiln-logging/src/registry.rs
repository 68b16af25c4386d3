use crate::backend::BackendHandle;
use std::collections::HashMap;

/// Process-scoped registry mapping dataset tokens to ordered backend lists.
///
/// Registration order is delivery order. Handles are reference-shared, so
/// one logical artifact can receive events from many tokens through a
/// single backend instance. There is no removal: the token set and the
/// backend wiring are fixed for the lifetime of a run.
#[derive(Default)]
pub struct Logger {
    token_backends: HashMap<String, Vec<BackendHandle>>,
    profile_backends: Vec<BackendHandle>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a backend to the delivery list for `token`.
    ///
    /// Duplicates are allowed; the same handle registered twice receives
    /// each metric event twice.
    pub fn add_backend(&mut self, token: &str, backend: BackendHandle) {
        tracing::trace!(token, "registering metric backend");
        self.token_backends.entry(token.to_string()).or_default().push(backend);
    }

    /// Append a backend to the profile delivery list.
    pub fn add_profile_backend(&mut self, backend: BackendHandle) {
        tracing::trace!("registering profile backend");
        self.profile_backends.push(backend);
    }

    pub(crate) fn backends_for(&self, token: &str) -> &[BackendHandle] {
        self.token_backends.get(token).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn profile_backends(&self) -> &[BackendHandle] {
        &self.profile_backends
    }

    /// Every registered handle, token backends first, deduplicated by
    /// instance identity. Used to signal end-of-iteration exactly once
    /// per physical backend.
    pub(crate) fn unique_backends(&self) -> Vec<BackendHandle> {
        let mut seen: Vec<*const ()> = Vec::new();
        let mut unique = Vec::new();
        let all = self
            .token_backends
            .values()
            .flatten()
            .chain(self.profile_backends.iter());
        for handle in all {
            let key = std::rc::Rc::as_ptr(handle).cast::<()>();
            if !seen.contains(&key) {
                seen.push(key);
                unique.push(handle.clone());
            }
        }
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{share, LoggingBackend};

    struct Nop;
    impl LoggingBackend for Nop {}

    #[test]
    fn test_registration_order_is_preserved() {
        let mut logger = Logger::new();
        let first = share(Nop);
        let second = share(Nop);
        logger.add_backend("learn", first.clone());
        logger.add_backend("learn", second.clone());

        let backends = logger.backends_for("learn");
        assert_eq!(backends.len(), 2);
        assert!(std::rc::Rc::ptr_eq(&backends[0], &first));
        assert!(std::rc::Rc::ptr_eq(&backends[1], &second));
    }

    #[test]
    fn test_unknown_token_has_no_backends() {
        let logger = Logger::new();
        assert!(logger.backends_for("test").is_empty());
    }

    #[test]
    fn test_shared_handle_is_deduplicated() {
        let mut logger = Logger::new();
        let shared = share(Nop);
        logger.add_backend("learn", shared.clone());
        logger.add_backend("test", shared.clone());
        logger.add_profile_backend(shared);
        logger.add_profile_backend(share(Nop));

        assert_eq!(logger.unique_backends().len(), 2);
    }

    #[test]
    fn test_duplicate_registration_is_allowed() {
        let mut logger = Logger::new();
        let shared = share(Nop);
        logger.add_backend("learn", shared.clone());
        logger.add_backend("learn", shared);
        assert_eq!(logger.backends_for("learn").len(), 2);
    }
}
