//! Host page model: a document of elements addressable by class, and the
//! `HostElement` seam the widget renders through.

use dashmap::DashMap;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Class the widget host element is located by.
pub const WIDGET_CLASS: &str = "gemini-ticker-widget";

/// The element the widget reads its configuration from and renders into.
pub trait HostElement: Send + Sync {
    fn attribute(&self, name: &str) -> Option<String>;

    /// Replaces the element's whole content.
    fn set_inner_html(&self, html: String);

    /// Sets one inline style property, replacing any previous value.
    fn set_style(&self, property: &str, value: &str);
}

#[derive(Debug, Default)]
struct ElementContent {
    inner_html: String,
    styles: Vec<(String, String)>,
}

/// In-process element. Optionally mirrors its markup to a file after every
/// change so a browser can display the latest render.
#[derive(Debug)]
pub struct MemoryElement {
    tag: String,
    class_name: String,
    attributes: HashMap<String, String>,
    content: RwLock<ElementContent>,
    mirror: Option<PathBuf>,
}

impl MemoryElement {
    pub fn new(tag: &str, class_name: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class_name: class_name.to_string(),
            attributes: HashMap::new(),
            content: RwLock::new(ElementContent::default()),
            mirror: None,
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_mirror(mut self, path: PathBuf) -> Self {
        self.mirror = Some(path);
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn inner_html(&self) -> String {
        self.read_content(|c| c.inner_html.clone())
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.read_content(|c| {
            c.styles
                .iter()
                .find(|(name, _)| name == property)
                .map(|(_, value)| value.clone())
        })
    }

    /// Serialized element including attributes and inline style.
    pub fn outer_html(&self) -> String {
        let mut attrs: Vec<_> = self.attributes.iter().collect();
        attrs.sort();

        let mut out = format!("<{} class=\"{}\"", self.tag, self.class_name);
        for (name, value) in attrs {
            out.push_str(&format!(" {name}=\"{value}\""));
        }

        self.read_content(|c| {
            if !c.styles.is_empty() {
                let style: Vec<String> = c.styles.iter().map(|(k, v)| format!("{k}: {v};")).collect();
                out.push_str(&format!(" style=\"{}\"", style.join(" ")));
            }
            out.push('>');
            out.push_str(&c.inner_html);
        });
        out.push_str(&format!("</{}>", self.tag));
        out
    }

    fn read_content<T>(&self, f: impl FnOnce(&ElementContent) -> T) -> T {
        let guard = self.content.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    fn write_content(&self, f: impl FnOnce(&mut ElementContent)) {
        {
            let mut guard = self.content.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            f(&mut guard);
        }
        self.sync_mirror();
    }

    fn sync_mirror(&self) {
        let Some(path) = &self.mirror else { return };
        let page = format!(
            "<!doctype html>\n<html><head><meta charset=\"utf-8\"></head><body>\n{}\n</body></html>\n",
            self.outer_html()
        );
        if let Err(err) = std::fs::write(path, page) {
            warn!(path = %path.display(), error = %err, "failed to write widget snapshot");
        }
    }
}

impl HostElement for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn set_inner_html(&self, html: String) {
        debug!(bytes = html.len(), "replacing widget content");
        self.write_content(|c| c.inner_html = html);
    }

    fn set_style(&self, property: &str, value: &str) {
        self.write_content(|c| {
            match c.styles.iter_mut().find(|(name, _)| name == property) {
                Some(entry) => entry.1 = value.to_string(),
                None => c.styles.push((property.to_string(), value.to_string())),
            }
        });
    }
}

/// Elements indexed by class, in insertion order within each class.
#[derive(Debug, Default, Clone)]
pub struct Document {
    by_class: Arc<DashMap<String, Vec<Arc<MemoryElement>>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, element: Arc<MemoryElement>) {
        self.by_class
            .entry(element.class_name().to_string())
            .or_default()
            .push(element);
    }

    /// First element carrying `class_name`, like `querySelector(".class")`.
    pub fn query_class(&self, class_name: &str) -> Option<Arc<MemoryElement>> {
        self.by_class
            .get(class_name)
            .and_then(|elements| elements.first().cloned())
    }
}

/// Finds the widget host element. Absence is left for the caller to judge.
pub fn locate_widget(document: &Document) -> Option<Arc<dyn HostElement>> {
    document
        .query_class(WIDGET_CLASS)
        .map(|element| element as Arc<dyn HostElement>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_returns_first_widget() {
        let document = Document::new();
        document.insert(Arc::new(MemoryElement::new("div", "other")));
        document.insert(Arc::new(
            MemoryElement::new("div", WIDGET_CLASS).with_attribute("data-coin", "BTC"),
        ));
        document.insert(Arc::new(
            MemoryElement::new("div", WIDGET_CLASS).with_attribute("data-coin", "ETH"),
        ));

        let host = locate_widget(&document).unwrap();
        assert_eq!(host.attribute("data-coin").as_deref(), Some("BTC"));
    }

    #[test]
    fn locate_on_empty_document_is_none() {
        assert!(locate_widget(&Document::new()).is_none());
    }

    #[test]
    fn styles_replace_in_place() {
        let element = MemoryElement::new("div", WIDGET_CLASS);
        element.set_style("color", "#333");
        element.set_style("width", "100%");
        element.set_style("color", "#fff");

        assert_eq!(element.style("color").as_deref(), Some("#fff"));
        assert_eq!(
            element.outer_html(),
            format!("<div class=\"{WIDGET_CLASS}\" style=\"color: #fff; width: 100%;\"></div>")
        );
    }

    #[test]
    fn mirror_file_tracks_content() {
        let path = std::env::temp_dir().join(format!("ticker-mirror-{}.html", std::process::id()));
        let element = MemoryElement::new("div", WIDGET_CLASS).with_mirror(path.clone());

        element.set_inner_html("<p>hello</p>".to_string());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<p>hello</p>"));
        let _ = std::fs::remove_file(path);
    }
}
