use serde::{Deserialize, Serialize};

/// Raw descriptor of one DOM element as reported by the browser server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DomElement {
    pub tag: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

/// Interactive affordances collected from one page visit.
///
/// Order is document order and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSet {
    /// Button labels
    pub buttons: Vec<String>,
    /// Link targets (`href`)
    pub links: Vec<String>,
    /// Input names
    pub inputs: Vec<String>,
    /// Form actions
    pub forms: Vec<String>,
}

impl ElementSet {
    pub fn total(&self) -> usize {
        self.buttons.len() + self.links.len() + self.inputs.len() + self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Sort raw DOM descriptors into the four element categories.
///
/// Every `<button>` is kept with its text trimmed, even when empty. Links,
/// inputs and forms are kept only when their `href`, `name` or `action` is
/// present and non-empty. Other tags are ignored.
pub fn element_set_from_dom(elements: &[DomElement]) -> ElementSet {
    let mut set = ElementSet::default();

    for el in elements {
        match el.tag.to_ascii_lowercase().as_str() {
            "button" => set
                .buttons
                .push(el.text.as_deref().unwrap_or_default().trim().to_string()),
            "a" => push_non_empty(&mut set.links, el.href.as_deref()),
            "input" => push_non_empty(&mut set.inputs, el.name.as_deref()),
            "form" => push_non_empty(&mut set.forms, el.action.as_deref()),
            _ => {}
        }
    }

    set
}

fn push_non_empty(target: &mut Vec<String>, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        target.push(v.to_string());
    }
}
