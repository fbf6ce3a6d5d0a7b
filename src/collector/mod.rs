pub mod element_set;
pub mod session;

use crate::error::AppError;

use element_set::{ElementSet, element_set_from_dom};
use session::BrowserSession;

/// Source of the interactive elements of a page.
pub trait ElementCollector {
    fn collect(&mut self, url: &str) -> Result<ElementSet, AppError>;
}

impl ElementCollector for BrowserSession {
    fn collect(&mut self, url: &str) -> Result<ElementSet, AppError> {
        self.navigate(url)?;
        let dom = self.elements()?;
        let set = element_set_from_dom(&dom);
        tracing::info!(
            url,
            buttons = set.buttons.len(),
            links = set.links.len(),
            inputs = set.inputs.len(),
            forms = set.forms.len(),
            "collected page elements"
        );
        Ok(set)
    }
}

/// Collector that returns a fixed element set regardless of the URL.
#[derive(Debug, Clone, Default)]
pub struct StaticCollector {
    pub elements: ElementSet,
}

impl StaticCollector {
    pub fn new(elements: ElementSet) -> Self {
        Self { elements }
    }
}

impl ElementCollector for StaticCollector {
    fn collect(&mut self, _url: &str) -> Result<ElementSet, AppError> {
        Ok(self.elements.clone())
    }
}
