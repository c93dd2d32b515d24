use std::cell::RefCell;
use std::rc::Rc;

use crate::surface::TriggerControl;

/// Busy-state bookkeeping for one trigger control.
///
/// The original label is captured on the first `begin_busy` and kept until
/// the matching `end_busy`, so nested or repeated begins never overwrite it.
pub struct BusyControl {
    control: Rc<dyn TriggerControl>,
    original: RefCell<Option<String>>,
}

impl BusyControl {
    pub fn new(control: Rc<dyn TriggerControl>) -> Self {
        Self { control, original: RefCell::new(None) }
    }

    pub fn control(&self) -> &Rc<dyn TriggerControl> {
        &self.control
    }

    pub fn is_busy(&self) -> bool {
        self.original.borrow().is_some()
    }

    pub fn begin_busy(&self, label: &str) {
        {
            let mut original = self.original.borrow_mut();
            if original.is_none() {
                *original = Some(self.control.label());
            }
        }
        self.control.set_enabled(false);
        self.control.set_label(label);
    }

    pub fn end_busy(&self) {
        let original = self.original.borrow_mut().take();
        if let Some(label) = original {
            self.control.set_label(&label);
        }
        self.control.set_enabled(true);
    }

    /// Mark busy for the lifetime of the returned guard.
    pub fn acquire(&self, label: &str) -> BusyGuard<'_> {
        self.begin_busy(label);
        BusyGuard { busy: self }
    }
}

/// Releases its control on drop, on every exit path of the action holding it.
#[must_use = "the control is released as soon as the guard is dropped"]
pub struct BusyGuard<'a> {
    busy: &'a BusyControl,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.end_busy();
    }
}
