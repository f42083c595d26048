//! The element the user clicked, as reported by the page.

use css_selector_locator::{SelectorKind, SelectorQuery};
use serde::Deserialize;

/// Payload of a click on a rendered element.
///
/// Deserializes from the page message, e.g.
/// `{"id":"hero","className":"btn","allClasses":["btn","btn-primary"],"viewportWidth":1280}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSelection {
    #[serde(default)]
    pub id: Option<String>,
    /// First class of the element; defaults to the first of `all_classes`.
    #[serde(default)]
    pub class_name: Option<String>,
    /// Every class on the element, in attribute order.
    #[serde(default)]
    pub all_classes: Vec<String>,
    /// Viewport width at the time of the click.
    pub viewport_width: u32,
}

impl ElementSelection {
    /// Build a selection from an element's `id` and `class` attribute values.
    pub fn from_attributes(id: Option<&str>, class_attribute: &str, viewport_width: u32) -> Self {
        let all_classes: Vec<String> = class_attribute.split_whitespace().map(str::to_owned).collect();
        Self {
            id: id.map(str::trim).filter(|id| !id.is_empty()).map(str::to_owned),
            class_name: all_classes.first().cloned(),
            all_classes,
            viewport_width,
        }
    }

    /// The element's own class: `class_name`, else the first listed class.
    #[must_use]
    pub fn primary_class(&self) -> Option<&str> {
        self.class_name
            .as_deref()
            .or_else(|| self.all_classes.first().map(String::as_str))
            .map(str::trim)
            .filter(|class| !class.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id().is_none() && self.primary_class().is_none()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Queries in the order they are tried: id, own class, then co-present classes.
    #[must_use]
    pub fn candidates(&self) -> Vec<SelectorQuery> {
        let width = self.viewport_width;
        let primary = self.primary_class();
        let mut queries = Vec::with_capacity(self.all_classes.len() + 2);

        if let Some(id) = self.id() {
            queries.push(SelectorQuery::for_viewport(id, SelectorKind::Id, width));
        }
        if let Some(class) = primary {
            queries.push(SelectorQuery::for_viewport(class, SelectorKind::Class, width));
        }
        for class in self.all_classes.iter().map(String::as_str).map(str::trim) {
            if class.is_empty() || Some(class) == primary {
                continue;
            }
            queries.push(SelectorQuery::for_viewport(class, SelectorKind::Class, width));
        }
        queries
    }
}
