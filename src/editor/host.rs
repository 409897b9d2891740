//! Mount point for the editor widget
//!
//! A host carries at most one live editor. Creating an editor takes the mount
//! through a [`MountGuard`]; dropping the editor drops the guard and frees the
//! host again.

use super::EditorError;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct EditorHost {
    occupied: Rc<Cell<bool>>,
}

impl EditorHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied.get()
    }

    pub(crate) fn mount(&self) -> Result<MountGuard, EditorError> {
        if self.occupied.replace(true) {
            return Err(EditorError::MountUnavailable);
        }
        Ok(MountGuard {
            occupied: Rc::clone(&self.occupied),
        })
    }
}

/// Releases the host when dropped
#[derive(Debug)]
pub struct MountGuard {
    occupied: Rc<Cell<bool>>,
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.occupied.set(false);
        tracing::debug!("editor unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mount() {
        let host = EditorHost::new();
        let guard = host.mount().unwrap();
        assert!(host.is_occupied());
        assert!(matches!(host.mount(), Err(EditorError::MountUnavailable)));

        drop(guard);
        assert!(!host.is_occupied());
        assert!(host.mount().is_ok());
    }
}
