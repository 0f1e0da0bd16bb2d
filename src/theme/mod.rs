use crate::dom::HostElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Only "dark" is recognised; anything else, or nothing, is light.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// (background-color, color)
    pub fn palette(self) -> (&'static str, &'static str) {
        match self {
            Theme::Dark => ("#333", "#fff"),
            Theme::Light => ("#f9f9f9", "#333"),
        }
    }
}

const CONTAINER_STYLES: [(&str, &str); 5] = [
    ("border", "2px solid #e1e5ea"),
    ("border-radius", "10px"),
    ("overflow", "hidden"),
    ("display", "block"),
    ("width", "100%"),
];

pub fn apply_theme(host: &dyn HostElement, theme: Theme) {
    for (property, value) in CONTAINER_STYLES {
        host.set_style(property, value);
    }
    let (background, text) = theme.palette();
    host.set_style("background-color", background);
    host.set_style("color", text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryElement, WIDGET_CLASS};

    #[test]
    fn only_dark_is_dark() {
        assert_eq!(Theme::from_attribute(Some("dark")), Theme::Dark);
        for other in [Some("light"), Some("Dark"), Some(""), Some("solarized"), None] {
            assert_eq!(Theme::from_attribute(other), Theme::Light);
        }
        assert_ne!(Theme::Dark.palette(), Theme::Light.palette());
    }

    #[test]
    fn applies_container_and_palette() {
        let host = MemoryElement::new("div", WIDGET_CLASS);
        apply_theme(&host, Theme::Dark);

        assert_eq!(host.style("border-radius").as_deref(), Some("10px"));
        assert_eq!(host.style("width").as_deref(), Some("100%"));
        assert_eq!(host.style("background-color").as_deref(), Some("#333"));
        assert_eq!(host.style("color").as_deref(), Some("#fff"));
    }
}
