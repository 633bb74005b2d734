//! Components and the state container they keep their data in.

use std::ops::Deref;

use crate::html::Node;

/// A unit of UI that owns state and renders a [`Node`] tree.
///
/// Events routed to the component arrive as messages. `update` returns `true`
/// when any state changed, which makes the session re-render and diff.
pub trait Component: Send + 'static {
    type Message: Send + 'static;

    fn update(&mut self, msg: Self::Message) -> bool;

    fn view(&self) -> Node<Self::Message>;
}

/// A value plus setter; setters report whether the value changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State<T> {
    value: T,
}

impl<T> State<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: PartialEq> State<T> {
    /// Replace the value. Returns `true` if it differs from the old one.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }

    /// Build a new value from the current one and store it.
    pub fn replace_with(&mut self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.value);
        self.set(next)
    }
}

impl<T> Deref for State<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_change() {
        let mut state = State::new(1);
        assert!(!state.set(1));
        assert!(state.set(2));
        assert_eq!(*state, 2);
    }

    #[test]
    fn replace_with_builds_from_current() {
        let mut list = State::new(vec!["a".to_string()]);
        let changed = list.replace_with(|items| {
            let mut next = items.clone();
            next.push("b".into());
            next
        });
        assert!(changed);
        assert_eq!(list.get(), &["a", "b"]);

        assert!(!list.replace_with(|items| items.clone()));
    }
}
