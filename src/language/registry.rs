//! Process-wide language registration
//!
//! The editor resolves its language by id through this registry. Registration
//! runs at most once per process no matter how many editors are created, so
//! remounting the editor (or building many sessions in tests) never registers
//! the grammar twice.

use super::LanguageDefinition;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();
static REGISTRATIONS: AtomicUsize = AtomicUsize::new(0);

/// Registered language definitions keyed by language id
#[derive(Debug)]
pub struct LanguageRegistry {
    languages: FxHashMap<&'static str, LanguageDefinition>,
}

impl LanguageRegistry {
    pub fn get(&self, id: &str) -> Option<&LanguageDefinition> {
        self.languages.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.languages.keys().copied()
    }
}

/// Register the built-in languages if this has not happened yet and return
/// the registry.
pub fn ensure_registered() -> &'static LanguageRegistry {
    REGISTRY.get_or_init(|| {
        REGISTRATIONS.fetch_add(1, Ordering::SeqCst);
        let definition = super::momonga();
        tracing::debug!(language = definition.id, "registering language");

        let mut languages = FxHashMap::default();
        languages.insert(definition.id, definition);
        LanguageRegistry { languages }
    })
}

/// Look up a language by id, registering the built-ins on first use
pub fn lookup(id: &str) -> Option<&'static LanguageDefinition> {
    ensure_registered().get(id)
}

/// How many times the registration body has executed in this process
pub fn registration_count() -> usize {
    REGISTRATIONS.load(Ordering::SeqCst)
}
