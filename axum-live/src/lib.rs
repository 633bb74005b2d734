//! axum-live: server-driven component views served from axum.
//!
//! Components live on the server. The browser loads a server-rendered page,
//! opens a WebSocket, forwards DOM events, and applies the patches the server
//! computes after each state change.
//!
//! # Features
//!
//! - [`Component`] trait and [`State`] container for server-side UI state
//! - [`html`] builders for the virtual tree, [`diff`] into DOM patches
//! - [`LiveApp`] router: page, session socket and embedded client script
//!
//! # Example
//!
//! ```ignore
//! use axum_live::{Component, LiveApp, State, EventKind};
//! use axum_live::html::{Node, button, div, p};
//!
//! #[derive(Default)]
//! struct Counter { count: State<u32> }
//!
//! impl Component for Counter {
//!     type Message = ();
//!
//!     fn update(&mut self, _: ()) -> bool {
//!         let next = *self.count + 1;
//!         self.count.set(next)
//!     }
//!
//!     fn view(&self) -> Node<()> {
//!         div()
//!             .child(p().text(format!("Count: {}", *self.count)))
//!             .child(button().text("+1").on(EventKind::Click, |_| Some(())))
//!             .into()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = LiveApp::new(Counter::default).title("Counter").router();
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod component;
pub mod diff;
pub mod html;
pub mod protocol;
pub mod session;

#[cfg(feature = "server")]
pub mod ws;

pub use component::{Component, State};
pub use diff::Patch;
pub use protocol::{ClientEvent, EventData, EventKind, ServerMessage};
pub use session::{DispatchError, Session};

// ============================================================================
// Server-only: page response, static assets and router
// ============================================================================

#[cfg(feature = "server")]
mod server {
    use axum::{
        Router,
        extract::State as Extract,
        http::{StatusCode, Uri, header},
        response::{Html, IntoResponse, Response},
        routing::get,
    };
    use rust_embed::RustEmbed;
    use std::marker::PhantomData;
    use std::sync::Arc;
    use tower_http::trace::TraceLayer;

    use crate::component::Component;
    use crate::html::escape;
    use crate::ws::{WebSocketUpgrade, run_session};

    const TITLE_PLACEHOLDER: &str = "<!--AXUM_LIVE_TITLE-->";
    const ROOT_PLACEHOLDER: &str = "<!--AXUM_LIVE_ROOT-->";

    /// Page template and browser client.
    #[derive(RustEmbed)]
    #[folder = "assets/"]
    pub struct ClientAssets;

    /// Axum response wrapper for serving a page with server-rendered markup.
    ///
    /// The markup is injected into the template's root container so the page
    /// shows content before the session socket connects.
    pub struct Page<A: RustEmbed> {
        title: String,
        markup: String,
        _assets: PhantomData<A>,
    }

    impl<A: RustEmbed> Page<A> {
        pub fn new(title: impl Into<String>, markup: impl Into<String>) -> Self {
            Self {
                title: title.into(),
                markup: markup.into(),
                _assets: PhantomData,
            }
        }
    }

    impl<A: RustEmbed> IntoResponse for Page<A> {
        fn into_response(self) -> Response {
            let Some(content) = A::get("index.html") else {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Page template not found.",
                )
                    .into_response();
            };

            let html = String::from_utf8_lossy(&content.data)
                .replace(TITLE_PLACEHOLDER, &escape(&self.title))
                .replace(ROOT_PLACEHOLDER, &self.markup);

            Html(html).into_response()
        }
    }

    /// Handler for serving static assets from an embedded `RustEmbed` type.
    pub async fn static_handler<A: RustEmbed>(uri: Uri) -> Response {
        let path = uri.path().trim_start_matches('/');

        match A::get(path) {
            Some(content) => {
                let mime = mime_guess::from_path(path).first_or_octet_stream();
                (
                    [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                    content.data.into_owned(),
                )
                    .into_response()
            }
            None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
        }
    }

    /// A live application: a root component factory plus page settings.
    ///
    /// Every page load and every socket connection gets a fresh root.
    pub struct LiveApp<C> {
        factory: Arc<dyn Fn() -> C + Send + Sync>,
        title: Arc<str>,
    }

    impl<C> Clone for LiveApp<C> {
        fn clone(&self) -> Self {
            Self {
                factory: Arc::clone(&self.factory),
                title: Arc::clone(&self.title),
            }
        }
    }

    impl<C: Component> LiveApp<C> {
        pub fn new(factory: impl Fn() -> C + Send + Sync + 'static) -> Self {
            Self {
                factory: Arc::new(factory),
                title: Arc::from("axum-live"),
            }
        }

        /// Set the document title.
        pub fn title(mut self, title: impl AsRef<str>) -> Self {
            self.title = Arc::from(title.as_ref());
            self
        }

        /// Build the router: `/` page, `/live` socket, embedded assets fallback.
        pub fn router(self) -> Router {
            Router::new()
                .route("/", get(page::<C>))
                .route("/live", get(socket::<C>))
                .fallback(static_handler::<ClientAssets>)
                .with_state(self)
                .layer(TraceLayer::new_for_http())
        }

        fn mount(&self) -> C {
            (self.factory)()
        }
    }

    async fn page<C: Component>(Extract(app): Extract<LiveApp<C>>) -> Page<ClientAssets> {
        let markup = app.mount().view().to_html();
        Page::new(&*app.title, markup)
    }

    async fn socket<C: Component>(
        Extract(app): Extract<LiveApp<C>>,
        ws: WebSocketUpgrade,
    ) -> Response {
        let root = app.mount();
        ws.on_upgrade(move |socket| run_session(socket, root))
    }
}

#[cfg(feature = "server")]
pub use server::{ClientAssets, LiveApp, Page, static_handler};

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, Uri};
    use axum::response::IntoResponse;
    use html::{Node, button, div, p};
    use http_body_util::BodyExt;
    use rust_embed::RustEmbed;
    use tower::ServiceExt;

    #[derive(Default)]
    struct Counter {
        count: State<u32>,
    }

    impl Component for Counter {
        type Message = ();

        fn update(&mut self, _: ()) -> bool {
            let next = *self.count + 1;
            self.count.set(next)
        }

        fn view(&self) -> Node<()> {
            div()
                .child(p().text(format!("Count: {}", *self.count)))
                .child(button().text("+1").on(EventKind::Click, |_| Some(())))
                .into()
        }
    }

    // Assets without a page template
    #[derive(RustEmbed)]
    #[folder = "assets/"]
    #[include = "*.js"]
    struct ScriptOnly;

    async fn body_to_string(response: axum::response::Response) -> String {
        let body = response.into_body();
        let bytes = body.collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn page_injects_markup_and_title() {
        let page: Page<ClientAssets> = Page::new("My Page", "<p>hello</p>");
        let response = page.into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_string(response).await;
        assert!(body.contains("<title>My Page</title>"));
        assert!(body.contains(r#"<div id="axum-live-root"><p>hello</p></div>"#));
        assert!(!body.contains("<!--AXUM_LIVE_ROOT-->"));
        assert!(!body.contains("<!--AXUM_LIVE_TITLE-->"));
    }

    #[tokio::test]
    async fn page_escapes_title_markup() {
        let page: Page<ClientAssets> = Page::new("</title><script>alert('xss')", "");
        let body = body_to_string(page.into_response()).await;

        assert!(body.contains("&lt;/title&gt;&lt;script&gt;"));
        assert!(!body.contains("</title><script>"));
    }

    #[tokio::test]
    async fn page_returns_error_when_no_template() {
        let page: Page<ScriptOnly> = Page::new("x", "");
        let response = page.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn static_handler_serves_js_with_correct_mime() {
        let uri: Uri = "/live.js".parse().unwrap();
        let response = static_handler::<ClientAssets>(uri).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );
    }

    #[tokio::test]
    async fn static_handler_returns_404_for_unknown_path() {
        let uri: Uri = "/some/unknown/path".parse().unwrap();
        let response = static_handler::<ClientAssets>(uri).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn router_serves_fresh_rendered_root() {
        let app = LiveApp::new(Counter::default).title("Counter").router();

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response).await;
        assert!(body.contains("<title>Counter</title>"));
        assert!(body.contains(r#"<p>Count: 0</p><button data-live-on="click">+1</button>"#));
    }

    #[tokio::test]
    async fn router_serves_client_script() {
        let app = LiveApp::new(Counter::default).router();

        let response = app
            .oneshot(Request::get("/live.js").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response).await;
        assert!(body.contains("/live"));
    }

    #[tokio::test]
    async fn client_script_stamps_versions_and_spares_focused_input() {
        let uri: Uri = "/live.js".parse().unwrap();
        let body = body_to_string(static_handler::<ClientAssets>(uri).await).await;

        assert!(body.contains("version: version"));
        assert!(body.contains("version = msg.version"));
        assert!(body.contains("el !== document.activeElement || value === \"\""));
        assert!(body.contains("event.isComposing"));
    }
}
