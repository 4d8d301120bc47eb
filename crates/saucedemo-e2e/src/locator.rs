// Locator - Declarative element descriptor
//
// A locator says how to find elements at the moment of use; it is never a
// handle to a live node. Each step is a CSS selector, optionally narrowed to
// elements containing some text, and later steps are resolved inside the
// matches of earlier ones.
//
// See: https://playwright.dev/docs/other-locators#css-matching-by-text

use std::fmt;

/// One link of a locator chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocatorStep {
    css: String,
    has_text: Option<String>,
}

impl LocatorStep {
    /// CSS selector of this step
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Text the matched element must contain, if filtered
    pub fn has_text(&self) -> Option<&str> {
        self.has_text.as_deref()
    }

    fn render(&self) -> String {
        match &self.has_text {
            // serde_json gives a correctly escaped double-quoted literal
            Some(text) => format!(
                "{}:has-text({})",
                self.css,
                serde_json::Value::String(text.clone())
            ),
            None => self.css.clone(),
        }
    }
}

/// Immutable description of zero-or-more DOM elements
///
/// Builder methods consume and return a new locator, so a locator stored on
/// a page model never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    steps: Vec<LocatorStep>,
}

impl Locator {
    /// Locator for a plain CSS selector
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            steps: vec![LocatorStep {
                css: selector.into(),
                has_text: None,
            }],
        }
    }

    /// Locator for `[data-test="<id>"]`
    pub fn data_test(id: &str) -> Self {
        Self::css(format!("[data-test=\"{id}\"]"))
    }

    /// Narrows the last step to elements containing `text`
    pub fn has_text(mut self, text: impl Into<String>) -> Self {
        if let Some(last) = self.steps.last_mut() {
            last.has_text = Some(text.into());
        }
        self
    }

    /// Resolves `child` inside the elements matched so far
    pub fn locator(&self, child: &Locator) -> Self {
        let mut steps = self.steps.clone();
        steps.extend(child.steps.iter().cloned());
        Self { steps }
    }

    /// Steps of the chain, outermost first
    pub fn steps(&self) -> &[LocatorStep] {
        &self.steps
    }

    /// Selector string understood by the browser engine
    pub fn selector(&self) -> String {
        self.steps
            .iter()
            .map(LocatorStep::render)
            .collect::<Vec<_>>()
            .join(" >> ")
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector())
    }
}

/// Product name lower-cased with whitespace runs replaced by dashes
///
/// The application derives its per-product `data-test` ids from it, e.g.
/// `add-to-cart-sauce-labs-backpack`.
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
