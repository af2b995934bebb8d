use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector, element_ref::Select};
use std::sync::LazyLock;

use crate::extractor::model::{count_words, normalize_whitespace};

/// Chrome and non-content structure, removed before any text is read.
const BOILERPLATE: &str = "script, style, noscript, template, nav, header, footer";

/// Semantic main-content containers, tried in order.
const MAIN_SELECTORS: &[&str] = &["main", "article", "[role='main']"];

/// Elements whose boundaries separate words.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre",
    "section", "table", "td", "th", "tr", "ul",
];

static BOILERPLATE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(BOILERPLATE).unwrap());

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

static CLASSED_DIV_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[class]").unwrap());

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

static CONTENT_CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)content|main|article").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResult {
    pub title: Option<String>,
    pub content: String,
    pub word_count: usize,
}

/// Parse `html` into a document with boilerplate already detached.
///
/// html5ever repairs any input, so this never fails; badly broken markup just
/// yields less text.
pub fn parse(html: &str) -> Html {
    let mut document = Html::parse_document(html);
    strip_boilerplate(&mut document);
    document
}

/// Read title and flattened main text from a boilerplate-free document.
pub fn read(document: &Html) -> ReadResult {
    let title = extract_title(document);
    let content = select_main_region(document)
        .map(flatten_text)
        .unwrap_or_default();
    let word_count = count_words(&content);

    ReadResult {
        title,
        content,
        word_count,
    }
}

/// Matches among the elements still attached to the document.
///
/// `Html::select` walks every node in the tree, including the children of
/// detached boilerplate, so lookups after stripping go through the root.
pub fn select_attached<'a, 'b>(document: &'a Html, selector: &'b Selector) -> Select<'a, 'b> {
    document.root_element().select(selector)
}

pub fn extract_title(document: &Html) -> Option<String> {
    select_attached(document, &TITLE_SELECTOR)
        .next()
        .map(|element| normalize_whitespace(&element.text().collect::<String>()))
        .filter(|title| !title.is_empty())
}

fn strip_boilerplate(document: &mut Html) {
    let ids: Vec<_> = select_attached(document, &BOILERPLATE_SELECTOR)
        .map(|element| element.id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Prioritized strategies; the first region that holds any text wins, with
/// the body and finally the document root as guaranteed fallbacks.
fn select_main_region(document: &Html) -> Option<ElementRef<'_>> {
    for selector in MAIN_SELECTORS {
        let Ok(selector) = Selector::parse(selector) else {
            continue;
        };
        if let Some(region) = select_attached(document, &selector).find(|el| has_text(*el)) {
            return Some(region);
        }
    }

    let hinted = select_attached(document, &CLASSED_DIV_SELECTOR).find(|el| {
        el.value()
            .attr("class")
            .is_some_and(|class| CONTENT_CLASS_REGEX.is_match(class))
            && has_text(*el)
    });
    if hinted.is_some() {
        return hinted;
    }

    select_attached(document, &BODY_SELECTOR)
        .next()
        .or_else(|| Some(document.root_element()))
}

fn has_text(element: ElementRef<'_>) -> bool {
    element.text().any(|chunk| !chunk.trim().is_empty())
}

fn flatten_text(region: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in region.descendants() {
        match node.value() {
            Node::Text(chunk) => text.push_str(chunk),
            Node::Element(element) if BLOCK_ELEMENTS.contains(&element.name()) => text.push(' '),
            _ => {}
        }
    }
    normalize_whitespace(&text)
}
