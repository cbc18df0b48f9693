//! Outbound notification streams

use std::fmt;

/// Handlers registered on one notification stream
pub(crate) struct Listeners<T> {
    handlers: Vec<Box<dyn FnMut(T)>>,
}

impl<T: Copy> Listeners<T> {
    pub(crate) fn add(&mut self, handler: impl FnMut(T) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub(crate) fn emit(&mut self, value: T) {
        for handler in &mut self.handlers {
            handler(value);
        }
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_every_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();

        let first = Rc::clone(&seen);
        listeners.add(move |v: u32| first.borrow_mut().push(("first", v)));
        let second = Rc::clone(&seen);
        listeners.add(move |v: u32| second.borrow_mut().push(("second", v)));

        listeners.emit(7);

        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }
}
