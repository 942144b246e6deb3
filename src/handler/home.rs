//! Home page handler
//!
//! The one page this application serves. Populates the view model with the
//! page values and names the view to render; the template renderer picked at
//! startup does the rest.

use crate::view::{Page, ViewModel};

/// Handle a request for the root path.
///
/// Fills the supplied model and returns the view identifier. Deterministic
/// and infallible: the values are fixed, nothing here depends on the request,
/// the clock, or shared state.
pub fn home(model: &mut ViewModel) -> &'static str {
    let page = Page::new("Hello, Java Template Engine!", "This is my home");
    let items = ["My item 1", "My item 2", "My item 3"];

    model.insert("name", "Felipe");
    model.insert("page", page);
    model.insert("items", items);

    "index"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_returns_index_view() {
        let mut model = ViewModel::new();
        assert_eq!(home(&mut model), "index");
    }

    #[test]
    fn test_populates_exactly_three_attributes() {
        let mut model = ViewModel::new();
        home(&mut model);

        assert_eq!(model.len(), 3);
        assert!(model.get("name").is_some());
        assert!(model.get("page").is_some());
        assert!(model.get("items").is_some());
    }

    #[test]
    fn test_name_attribute() {
        let mut model = ViewModel::new();
        home(&mut model);

        assert_eq!(model.get("name"), Some(&json!("Felipe")));
    }

    #[test]
    fn test_page_attribute() {
        let mut model = ViewModel::new();
        home(&mut model);

        let page = model.get("page").unwrap();
        assert_eq!(page["title"], "Hello, Java Template Engine!");
        assert_eq!(page["subtitle"], "This is my home");
    }

    #[test]
    fn test_items_attribute_ordered() {
        let mut model = ViewModel::new();
        home(&mut model);

        assert_eq!(
            model.get("items"),
            Some(&json!(["My item 1", "My item 2", "My item 3"]))
        );
    }

    #[test]
    fn test_repeated_invocations_are_identical() {
        let mut first = ViewModel::new();
        let mut second = ViewModel::new();

        let first_view = home(&mut first);
        let second_view = home(&mut second);

        assert_eq!(first_view, second_view);
        assert_eq!(first, second);
    }
}
