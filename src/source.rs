//! Shared source text cell
//!
//! The session and the editor hold clones of one [`SourceCell`]. Nothing
//! observes the cell: writing it bumps no revision and schedules no redraw.
//! Readers copy or borrow the text at call time and never keep it.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct SourceCell(Rc<RefCell<String>>);

impl SourceCell {
    /// Overwrite the text
    pub fn replace(&self, text: &str) {
        let mut current = self.0.borrow_mut();
        current.clear();
        current.push_str(text);
    }

    /// Copy of the current text
    pub fn snapshot(&self) -> String {
        self.0.borrow().clone()
    }

    /// Borrow the text for the duration of `f`
    pub fn with<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.0.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_text() {
        let cell = SourceCell::default();
        let view = cell.clone();
        assert_eq!(view.snapshot(), "");
        cell.replace("b");
        assert_eq!(view.snapshot(), "b");
        assert_eq!(view.with(str::len), 1);
    }
}
