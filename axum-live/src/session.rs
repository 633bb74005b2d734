//! A mounted root component and the tree it last rendered.

use thiserror::Error;

use crate::component::Component;
use crate::diff::{Patch, diff};
use crate::html::Node;
use crate::protocol::{ClientEvent, EventKind};

/// Reasons an incoming event could not be routed.
///
/// All of them usually mean the client sent an event against a tree that has
/// been patched since; the socket loop drops such events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("event computed against tree version {version}, current is {current}")]
    Stale { version: u64, current: u64 },

    #[error("no element at path {path:?}")]
    NodeNotFound { path: Vec<usize> },

    #[error("element at path {path:?} has no {kind:?} listener")]
    NoListener { path: Vec<usize>, kind: EventKind },
}

/// One browser session: owns the root component and its rendered tree.
pub struct Session<C: Component> {
    root: C,
    tree: Node<C::Message>,
    version: u64,
}

impl<C: Component> Session<C> {
    /// Mount `root` and render it once.
    pub fn new(root: C) -> Self {
        let tree = root.view();
        Self {
            root,
            tree,
            version: 0,
        }
    }

    pub fn root(&self) -> &C {
        &self.root
    }

    pub fn tree(&self) -> &Node<C::Message> {
        &self.tree
    }

    /// Bumped whenever a render moves, adds, removes or relabels nodes.
    ///
    /// Attribute-only renders keep the version, so keystrokes racing their
    /// own value patches are still accepted.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Markup of the current tree.
    pub fn html(&self) -> String {
        self.tree.to_html()
    }

    /// Route `event` to its listener and return the resulting patches.
    ///
    /// Returns no patches when the listener produced no message or the
    /// component reported no state change.
    pub fn dispatch(&mut self, event: &ClientEvent) -> Result<Vec<Patch>, DispatchError> {
        if event.version != self.version {
            return Err(DispatchError::Stale {
                version: event.version,
                current: self.version,
            });
        }
        let element = self
            .tree
            .find(&event.path)
            .and_then(Node::as_element)
            .ok_or_else(|| DispatchError::NodeNotFound {
                path: event.path.clone(),
            })?;
        let handler = element
            .listener(event.kind)
            .ok_or_else(|| DispatchError::NoListener {
                path: event.path.clone(),
                kind: event.kind,
            })?;

        let Some(msg) = handler(&event.data) else {
            return Ok(Vec::new());
        };
        if !self.root.update(msg) {
            return Ok(Vec::new());
        }

        let tree = self.root.view();
        let patches = diff(&self.tree, &tree);
        if patches.iter().any(Patch::moves_nodes) {
            self.version += 1;
        }
        self.tree = tree;
        Ok(patches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::State;
    use crate::html::{button, div, input, p};
    use crate::protocol::EventData;

    enum Msg {
        Increment,
        Name(String),
    }

    #[derive(Default)]
    struct Counter {
        count: State<u32>,
        name: State<String>,
    }

    impl Component for Counter {
        type Message = Msg;

        fn update(&mut self, msg: Msg) -> bool {
            match msg {
                Msg::Increment => {
                    let next = *self.count + 1;
                    self.count.set(next)
                }
                Msg::Name(name) => self.name.set(name),
            }
        }

        fn view(&self) -> Node<Msg> {
            div()
                .child(p().text(format!("Count: {}", *self.count)))
                .child(button().text("+1").on(EventKind::Click, |_| Some(Msg::Increment)))
                .child(
                    input()
                        .attr("value", self.name.as_str())
                        .on(EventKind::Change, |e| Some(Msg::Name(e.value_or_default())))
                        .on(EventKind::KeyPress, |_| None),
                )
                .into()
        }
    }

    #[test]
    fn click_updates_state_and_patches_text() {
        let mut session = Session::new(Counter::default());
        assert!(session.html().contains("Count: 0"));

        let patches = session
            .dispatch(&ClientEvent::new([1], EventKind::Click, EventData::click()))
            .unwrap();

        assert_eq!(
            patches,
            vec![Patch::SetText {
                path: vec![0, 0],
                text: "Count: 1".into()
            }]
        );
        assert_eq!(*session.root().count, 1);
        assert!(session.html().contains("Count: 1"));
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn event_from_older_version_is_rejected() {
        let mut session = Session::new(Counter::default());
        let click = ClientEvent::new([1], EventKind::Click, EventData::click());
        session.dispatch(&click).unwrap();

        assert_eq!(
            session.dispatch(&click),
            Err(DispatchError::Stale {
                version: 0,
                current: 1
            })
        );
        assert_eq!(*session.root().count, 1);

        let fresh = click.at_version(session.version());
        assert!(session.dispatch(&fresh).is_ok());
        assert_eq!(*session.root().count, 2);
    }

    #[test]
    fn attribute_patches_keep_version() {
        let mut session = Session::new(Counter::default());
        let typed = |value: &str| ClientEvent::new([2], EventKind::Change, EventData::value(value));

        session.dispatch(&typed("a")).unwrap();
        session.dispatch(&typed("ab")).unwrap();

        assert_eq!(session.version(), 0);
        assert_eq!(session.root().name.as_str(), "ab");
    }

    #[test]
    fn unchanged_state_produces_no_patches() {
        let mut session = Session::new(Counter::default());
        let event = ClientEvent::new([2], EventKind::Change, EventData::value(""));
        assert_eq!(session.dispatch(&event), Ok(Vec::new()));
    }

    #[test]
    fn listener_without_message_is_ignored() {
        let mut session = Session::new(Counter::default());
        let event = ClientEvent::new([2], EventKind::KeyPress, EventData::key("a"));
        assert_eq!(session.dispatch(&event), Ok(Vec::new()));
    }

    #[test]
    fn unknown_path_is_rejected() {
        let mut session = Session::new(Counter::default());
        let event = ClientEvent::new([7], EventKind::Click, EventData::click());
        assert_eq!(
            session.dispatch(&event),
            Err(DispatchError::NodeNotFound { path: vec![7] })
        );
    }

    #[test]
    fn missing_listener_is_rejected() {
        let mut session = Session::new(Counter::default());
        let event = ClientEvent::new([0], EventKind::Click, EventData::click());
        assert_eq!(
            session.dispatch(&event),
            Err(DispatchError::NoListener {
                path: vec![0],
                kind: EventKind::Click
            })
        );
    }
}
