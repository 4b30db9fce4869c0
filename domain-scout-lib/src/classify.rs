//! Page classification.
//!
//! Turns the rendered registrar page into one of three outcomes by looking
//! for known wording. The rules only cover phrases actually seen on the
//! registrar's pages; anything else stays Unknown.

use crate::types::Availability;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("whitespace pattern is valid");
}

/// Elements whose text never shows up on screen.
const HIDDEN_ELEMENTS: [&str; 6] = ["head", "script", "style", "noscript", "template", "svg"];

/// CSS selector for result cards on the registrar page.
const RESULT_CARD_SELECTOR: &str = r#"[class*="domain"], [class*="result"]"#;

/// Status text for pages that matched nothing.
pub const UNDETERMINED_STATUS: &str = "Could not determine availability";

/// A loaded page as seen by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    /// URL the page was loaded from
    pub url: String,
    /// Page source after rendering (may be empty)
    pub html: String,
    /// Visible text of the page body
    pub text: String,
}

impl RenderedPage {
    /// Build a page from its source, deriving the visible text.
    pub fn from_html<U: Into<String>, H: Into<String>>(url: U, html: H) -> Self {
        let html = html.into();
        let text = extract_visible_text(&html);
        Self {
            url: url.into(),
            html,
            text,
        }
    }

    /// Build a page from visible text only.
    pub fn from_text<U: Into<String>, T: Into<String>>(url: U, text: T) -> Self {
        Self {
            url: url.into(),
            html: String::new(),
            text: text.into(),
        }
    }
}

/// Outcome of classifying one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// An availability phrase matched
    Available { phrase: String },
    /// A taken phrase matched
    Taken { phrase: String },
    /// Nothing recognizable on the page
    Undetermined,
}

impl Classification {
    /// Map to the exported availability value.
    pub fn availability(&self) -> Availability {
        match self {
            Classification::Available { .. } => Availability::Yes,
            Classification::Taken { .. } => Availability::No,
            Classification::Undetermined => Availability::Unknown,
        }
    }

    /// Deterministic status text for this outcome.
    pub fn status(&self) -> String {
        match self {
            Classification::Available { phrase } | Classification::Taken { phrase } => {
                format!("{} (matched \"{}\")", self.availability().label(), phrase)
            }
            Classification::Undetermined => UNDETERMINED_STATUS.to_string(),
        }
    }
}

/// Decides availability from a rendered page.
///
/// Implementations must be deterministic: the same page and domain always
/// yield the same classification.
pub trait PageClassifier: Send + Sync {
    fn classify(&self, page: &RenderedPage, full_domain: &str) -> Classification;
}

/// Phrase lists for [`PhraseClassifier`]. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseRules {
    /// Wording that marks the domain as registered. Checked first.
    pub taken: Vec<String>,

    /// Wording that explicitly offers the domain.
    pub available: Vec<String>,

    /// Checkout wording; only counts when the full domain is on the page.
    pub purchase_cues: Vec<String>,
}

impl Default for PhraseRules {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            taken: owned(&[
                "already registered",
                "is taken",
                "domain taken",
                "already taken",
                "unavailable",
                "not available",
            ]),
            available: owned(&["is available", "is yours"]),
            purchase_cues: owned(&["add to cart", "buy now", "add to bag", "purchase"]),
        }
    }
}

impl PhraseRules {
    /// Lowercase and whitespace-fold every phrase, dropping empty ones.
    fn normalized(self) -> Self {
        let clean = |list: Vec<String>| {
            list.into_iter()
                .map(|p| fold_text(&p))
                .filter(|p| !p.is_empty())
                .collect()
        };
        Self {
            taken: clean(self.taken),
            available: clean(self.available),
            purchase_cues: clean(self.purchase_cues),
        }
    }
}

/// Default classifier: ordered substring matching over the page text.
///
/// Order of evaluation:
/// 1. a taken phrase anywhere in the page text,
/// 2. result cards mentioning the domain, innermost first, holding an
///    available phrase or purchase cue,
/// 3. an available phrase anywhere in the page text,
/// 4. a purchase cue when the domain itself appears in the page text.
#[derive(Debug, Clone)]
pub struct PhraseClassifier {
    rules: PhraseRules,
}

impl PhraseClassifier {
    pub fn new(rules: PhraseRules) -> Self {
        Self {
            rules: rules.normalized(),
        }
    }

    pub fn rules(&self) -> &PhraseRules {
        &self.rules
    }
}

impl Default for PhraseClassifier {
    fn default() -> Self {
        Self::new(PhraseRules::default())
    }
}

impl PageClassifier for PhraseClassifier {
    fn classify(&self, page: &RenderedPage, full_domain: &str) -> Classification {
        let text = fold_text(&page.text);
        let domain = full_domain.trim().to_lowercase();

        if let Some(phrase) = first_match(&text, &self.rules.taken) {
            return Classification::Taken { phrase };
        }

        for card in result_cards(&page.html, &domain) {
            if let Some(phrase) = first_match(&card, &self.rules.available)
                .or_else(|| first_match(&card, &self.rules.purchase_cues))
            {
                return Classification::Available { phrase };
            }
        }

        if let Some(phrase) = first_match(&text, &self.rules.available) {
            return Classification::Available { phrase };
        }

        if !domain.is_empty() && text.contains(&domain) {
            if let Some(phrase) = first_match(&text, &self.rules.purchase_cues) {
                return Classification::Available { phrase };
            }
        }

        Classification::Undetermined
    }
}

/// Lowercase and collapse all whitespace runs to single spaces.
pub fn fold_text(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

/// Visible text of an HTML document, whitespace-folded but not lowercased.
pub fn extract_visible_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_document(html);
    let mut out = String::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| HIDDEN_ELEMENTS.contains(&el.name()))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(trimmed);
        }
    }

    WHITESPACE.replace_all(&out, " ").into_owned()
}

fn first_match(haystack: &str, phrases: &[String]) -> Option<String> {
    phrases
        .iter()
        .find(|phrase| haystack.contains(phrase.as_str()))
        .cloned()
}

/// Folded text of result cards that mention `domain`, shortest first.
fn result_cards(html: &str, domain: &str) -> Vec<String> {
    if html.trim().is_empty() || domain.is_empty() {
        return Vec::new();
    }

    let Ok(selector) = Selector::parse(RESULT_CARD_SELECTOR) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut cards: Vec<String> = document
        .select(&selector)
        .map(|el| fold_text(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| text.contains(domain))
        .collect();

    cards.sort_by_key(|text| text.len());
    cards
}
