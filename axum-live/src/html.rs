//! Virtual element tree produced by component views.
//!
//! A view returns a [`Node`] tree. The session keeps the last rendered tree to
//! route browser events to listeners and to diff against the next render.
//!
//! ```ignore
//! use axum_live::html::{button, div, p};
//! use axum_live::EventKind;
//!
//! let view = div()
//!     .child(p().text("Count: 3"))
//!     .child(button().text("+1").on(EventKind::Click, |_| Some(Msg::Increment)));
//! ```
//!
//! Child indices in this tree must match `childNodes` in the browser, so the
//! builder never stores empty text and merges adjacent text children.

use std::fmt;
use std::sync::Arc;

use crate::protocol::{EventData, EventKind};

/// Attribute listing the event kinds an element listens for.
pub const LISTENER_ATTR: &str = "data-live-on";

/// Event listener: turns an event descriptor into an optional message.
pub type Handler<M> = Arc<dyn Fn(&EventData) -> Option<M> + Send + Sync>;

const VOID_TAGS: &[&str] = &["br", "hr", "input"];

/// A node in the virtual tree.
pub enum Node<M> {
    Element(Element<M>),
    Text(String),
}

/// An element with attributes, listeners and children.
pub struct Element<M> {
    tag: &'static str,
    attrs: Vec<(String, String)>,
    listeners: Vec<(EventKind, Handler<M>)>,
    children: Vec<Node<M>>,
}

/// Create an element with an arbitrary tag name.
pub fn element<M>(tag: &'static str) -> Element<M> {
    Element {
        tag,
        attrs: Vec::new(),
        listeners: Vec::new(),
        children: Vec::new(),
    }
}

macro_rules! tags {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Create a `<", stringify!($name), ">` element.")]
            pub fn $name<M>() -> Element<M> {
                element(stringify!($name))
            }
        )*
    };
}

tags!(a, br, button, div, h1, h2, h3, hr, input, label, li, p, ul);

impl<M> Element<M> {
    /// Set an attribute, replacing any previous value of the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Shorthand for the `style` attribute.
    pub fn style(self, css: impl Into<String>) -> Self {
        self.attr("style", css)
    }

    /// Bind a listener for `kind`, replacing any previous one.
    pub fn on<F>(mut self, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&EventData) -> Option<M> + Send + Sync + 'static,
    {
        let handler: Handler<M> = Arc::new(handler);
        self.listeners.retain(|(k, _)| *k != kind);
        self.listeners.push((kind, handler));
        self
    }

    /// Append a child node.
    pub fn child(mut self, node: impl Into<Node<M>>) -> Self {
        match node.into() {
            Node::Text(text) if text.is_empty() => {}
            Node::Text(text) => match self.children.last_mut() {
                Some(Node::Text(last)) => last.push_str(&text),
                _ => self.children.push(Node::Text(text)),
            },
            node => self.children.push(node),
        }
        self
    }

    /// Append every node of an iterator.
    pub fn children<I>(self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node<M>>,
    {
        nodes.into_iter().fold(self, |el, node| el.child(node))
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Look up an attribute value by name.
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_nodes(&self) -> &[Node<M>] {
        &self.children
    }

    /// The listener bound for `kind`, if any.
    pub fn listener(&self, kind: EventKind) -> Option<&Handler<M>> {
        self.listeners
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, h)| h)
    }

    /// Attributes as they appear in the browser, including the listener marker.
    pub fn rendered_attrs(&self) -> Vec<(String, String)> {
        let mut attrs = self.attrs.clone();
        if !self.listeners.is_empty() {
            let kinds: Vec<&str> = self.listeners.iter().map(|(k, _)| k.as_str()).collect();
            attrs.push((LISTENER_ATTR.to_string(), kinds.join(" ")));
        }
        attrs
    }

    fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag)
    }

    fn map_with<N: 'static>(self, f: &Arc<dyn Fn(M) -> N + Send + Sync>) -> Element<N>
    where
        M: 'static,
    {
        let listeners = self
            .listeners
            .into_iter()
            .map(|(kind, handler)| {
                let f = Arc::clone(f);
                let mapped: Handler<N> =
                    Arc::new(move |event: &EventData| handler(event).map(|msg| f(msg)));
                (kind, mapped)
            })
            .collect();
        Element {
            tag: self.tag,
            attrs: self.attrs,
            listeners,
            children: self.children.into_iter().map(|c| c.map_with(f)).collect(),
        }
    }
}

impl<M> Node<M> {
    pub fn as_element(&self) -> Option<&Element<M>> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Walk child indices from this node.
    pub fn find(&self, path: &[usize]) -> Option<&Node<M>> {
        path.iter().try_fold(self, |node, &index| {
            node.as_element()?.children.get(index)
        })
    }

    /// Lift every listener's message into another type.
    ///
    /// Parents use this to embed a child component's view.
    pub fn map<N, F>(self, f: F) -> Node<N>
    where
        M: 'static,
        N: 'static,
        F: Fn(M) -> N + Send + Sync + 'static,
    {
        let f: Arc<dyn Fn(M) -> N + Send + Sync> = Arc::new(f);
        self.map_with(&f)
    }

    fn map_with<N: 'static>(self, f: &Arc<dyn Fn(M) -> N + Send + Sync>) -> Node<N>
    where
        M: 'static,
    {
        match self {
            Node::Element(el) => Node::Element(el.map_with(f)),
            Node::Text(text) => Node::Text(text),
        }
    }

    /// Render escaped markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => escape_into(out, text, false),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                for (name, value) in el.rendered_attrs() {
                    out.push(' ');
                    out.push_str(&name);
                    out.push_str("=\"");
                    escape_into(out, &value, true);
                    out.push('"');
                }
                out.push('>');
                if el.is_void() {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(el.tag);
                out.push('>');
            }
        }
    }
}

impl<M> From<Element<M>> for Node<M> {
    fn from(el: Element<M>) -> Self {
        Node::Element(el)
    }
}

impl<M> From<String> for Node<M> {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl<M> From<&str> for Node<M> {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl<M> fmt::Debug for Node<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(el) => fmt::Debug::fmt(el, f),
            Node::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

impl<M> fmt::Debug for Element<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<EventKind> = self.listeners.iter().map(|(k, _)| *k).collect();
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attrs", &self.attrs)
            .field("listeners", &kinds)
            .field("children", &self.children)
            .finish()
    }
}

/// Escape text for HTML content or a double-quoted attribute value.
pub fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// Escape text into a new string.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, false);
    out
}
