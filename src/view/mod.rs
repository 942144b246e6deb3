//! View rendering module
//!
//! Holds the view model types and the template-rendering collaborator. The
//! renderer is injected into `AppState` behind the `ViewRenderer` trait, so
//! request dispatch never touches the template engine directly.

mod model;

pub use model::{Page, ViewModel};

use minijinja::Environment;

/// The `index` view, compiled into the binary
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Rendering failure surfaced to the dispatcher as a 500
#[derive(Debug)]
pub enum RenderError {
    /// No template registered under the requested view name
    UnknownView(String),
    /// Template evaluation failed
    Template(minijinja::Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownView(view) => write!(f, "unknown view '{view}'"),
            Self::Template(err) => write!(f, "template rendering failed: {err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownView(_) => None,
            Self::Template(err) => Some(err),
        }
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err)
    }
}

/// Template rendering collaborator.
///
/// Turns a view name plus a populated model into an HTML body. Handlers only
/// name the view; the concrete engine lives behind this seam.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &str, model: &ViewModel) -> Result<String, RenderError>;
}

/// minijinja-backed renderer with all templates embedded at compile time
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Build the environment and register the known views.
    ///
    /// Fails only if an embedded template does not parse, which a broken
    /// template edit would catch at startup rather than on first request.
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template("index", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }
}

impl ViewRenderer for Templates {
    fn render(&self, view: &str, model: &ViewModel) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(view)
            .map_err(|_| RenderError::UnknownView(view.to_string()))?;
        Ok(template.render(model.attributes())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_model() -> ViewModel {
        let mut model = ViewModel::new();
        model.insert("name", "Felipe");
        model.insert(
            "page",
            Page::new("Hello, Java Template Engine!", "This is my home"),
        );
        model.insert("items", ["My item 1", "My item 2", "My item 3"]);
        model
    }

    #[test]
    fn test_render_index_substitutes_model() {
        let templates = Templates::new().unwrap();
        let html = templates.render("index", &home_model()).unwrap();

        assert!(html.contains("Hello, Java Template Engine!"));
        assert!(html.contains("This is my home"));
        assert!(html.contains("Felipe"));
        assert!(html.contains("My item 1"));
        assert!(html.contains("My item 2"));
        assert!(html.contains("My item 3"));
    }

    #[test]
    fn test_items_render_in_order() {
        let templates = Templates::new().unwrap();
        let html = templates.render("index", &home_model()).unwrap();

        let first = html.find("My item 1").unwrap();
        let second = html.find("My item 2").unwrap();
        let third = html.find("My item 3").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_unknown_view_is_an_error() {
        let templates = Templates::new().unwrap();
        let err = templates.render("missing", &ViewModel::new()).unwrap_err();

        match err {
            RenderError::UnknownView(view) => assert_eq!(view, "missing"),
            RenderError::Template(_) => panic!("expected UnknownView"),
        }
    }
}
