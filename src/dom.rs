use scraper::{ElementRef, Html, Selector};

pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// First descendant of `element` matching `selector`
pub fn select_first<'a>(element: &ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Nearest ancestor of `element` (itself included) matching `selector`
pub fn closest<'a>(element: &ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    if selector.matches(element) {
        return Some(*element);
    }

    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| selector.matches(ancestor))
}

pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Plain text of an HTML fragment, markup dropped
pub fn fragment_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);

    element_text(&fragment.root_element())
}
