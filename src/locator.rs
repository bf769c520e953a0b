use crate::dom::search::{by_attr, find_first};
use crate::dom::{Document, NodeId};
use crate::error::CatalogError;

const HEADER_CLASSES: &[&str] = &["section", "title-wrapper"];
const TABLE_CLASSES: &[&str] = &["section", "table-wrapper"];

/// Find the table block that belongs to the heading with `id="anchor"`.
///
/// The heading sits somewhere inside a `section title-wrapper` block; the
/// table lives in a later sibling of that block classed
/// `section table-wrapper`. Anything in between is skipped.
pub fn locate_table(doc: &Document, anchor: &str) -> Result<NodeId, CatalogError> {
    let anchor_node = find_first(doc, doc.root(), by_attr("id", anchor))
        .ok_or_else(|| CatalogError::AnchorNotFound { anchor: anchor.to_owned() })?;

    let header = doc
        .ancestors(anchor_node)
        .find(|&id| doc.node(id).has_classes(HEADER_CLASSES))
        .ok_or_else(|| CatalogError::SectionHeaderNotFound { anchor: anchor.to_owned() })?;
    log::debug!("section header found for '{}'", anchor);

    doc.following_siblings(header)
        .find(|&id| doc.node(id).has_classes(TABLE_CLASSES))
        .ok_or_else(|| CatalogError::TableWrapperNotFound { anchor: anchor.to_owned() })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: &str = "instance-type-matrix";

    fn locate(html: &str) -> Result<NodeId, CatalogError> {
        let doc = Document::parse(html);
        locate_table(&doc, ANCHOR)
    }

    #[test]
    fn finds_wrapper_past_intervening_markup() {
        let html = r#"
            <div class="section title-wrapper">
              <div class="inner"><h2 id="instance-type-matrix">Matrix</h2></div>
            </div>
            <div class="section">not this</div>
            <p>filler</p>
            <div class="table-wrapper section" id="target"><table></table></div>
        "#;
        let doc = Document::parse(html);
        let found = locate_table(&doc, ANCHOR).unwrap();
        assert_eq!(doc.node(found).attr("id"), "target");
    }

    #[test]
    fn missing_anchor() {
        let err = locate(r#"<div class="section title-wrapper"><h2 id="other"></h2></div>"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::AnchorNotFound { anchor } if anchor == ANCHOR));
    }

    #[test]
    fn missing_header() {
        let html = r#"
            <div class="section title"><h2 id="instance-type-matrix"></h2></div>
            <div class="section table-wrapper"></div>
        "#;
        assert!(matches!(locate(html), Err(CatalogError::SectionHeaderNotFound { .. })));
    }

    #[test]
    fn class_tokens_are_not_substrings() {
        let html = r#"
            <div class="sections title-wrapper-x"><h2 id="instance-type-matrix"></h2></div>
        "#;
        assert!(matches!(locate(html), Err(CatalogError::SectionHeaderNotFound { .. })));
    }

    #[test]
    fn missing_table_wrapper() {
        let html = r#"
            <div class="section table-wrapper">before the header does not count</div>
            <div class="section title-wrapper"><h2 id="instance-type-matrix"></h2></div>
            <div class="section">no table here</div>
        "#;
        assert!(matches!(locate(html), Err(CatalogError::TableWrapperNotFound { .. })));
    }
}
