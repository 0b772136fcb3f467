//! Shared helpers over the xmltree document model
//!
//! Both reconcilers mutate owned element trees in memory and only
//! serialize once every patch step has succeeded. These helpers cover
//! the recursive lookups and text handling they share.

use xmltree::{Element, EmitterConfig, XMLNode};

/// Indentation used when serializing reconciled documents, chosen for
/// human-diffable output.
const INDENT: &str = "    ";

/// Find the first descendant element (depth-first, document order)
/// matching `pred`, including the root itself.
pub fn find_element<'a>(root: &'a Element, pred: &impl Fn(&Element) -> bool) -> Option<&'a Element> {
    if pred(root) {
        return Some(root);
    }
    root.children.iter().find_map(|node| match node {
        XMLNode::Element(child) => find_element(child, pred),
        _ => None,
    })
}

/// Mutable variant of [`find_element`].
pub fn find_element_mut<'a>(
    root: &'a mut Element,
    pred: &impl Fn(&Element) -> bool,
) -> Option<&'a mut Element> {
    if pred(root) {
        return Some(root);
    }
    root.children.iter_mut().find_map(|node| match node {
        XMLNode::Element(child) => find_element_mut(child, pred),
        _ => None,
    })
}

/// Find a descendant by local element name, ignoring namespace prefixes.
pub fn find_named_mut<'a>(root: &'a mut Element, name: &str) -> Option<&'a mut Element> {
    find_element_mut(root, &|el| el.name == name)
}

/// Set an attribute only when its current value differs. Returns true
/// when the attribute was rewritten.
pub fn set_attribute_if_changed(el: &mut Element, name: &str, value: &str) -> bool {
    if el.attributes.get(name).map(String::as_str) == Some(value) {
        return false;
    }
    el.attributes.insert(name.to_string(), value.to_string());
    true
}

/// The concatenated text content of an element.
pub fn element_text(el: &Element) -> String {
    el.get_text().map(|t| t.into_owned()).unwrap_or_default()
}

/// Replace the element's text content only when it differs. Returns
/// true when the text was rewritten.
pub fn set_text_if_changed(el: &mut Element, text: &str) -> bool {
    if element_text(el) == text {
        return false;
    }
    el.children
        .retain(|node| !matches!(node, XMLNode::Text(_) | XMLNode::CData(_)));
    el.children.push(XMLNode::Text(text.to_string()));
    true
}

/// The qualified tag name (`prefix:name` or bare `name`) used as the
/// canonical sort key for capability elements.
pub fn qualified_name(el: &Element) -> String {
    match &el.prefix {
        Some(prefix) => format!("{}:{}", prefix, el.name),
        None => el.name.clone(),
    }
}

/// Serialize a document with 4-space indentation and an XML declaration.
pub fn serialize(root: &Element) -> Result<Vec<u8>, xmltree::Error> {
    let mut out = Vec::new();
    let config = EmitterConfig::new()
        .perform_indent(true)
        .indent_string(INDENT);
    root.write_with_config(&mut out, config)?;
    // xml-rs does not emit a trailing newline; keep the file POSIX-friendly.
    out.push(b'\n');
    Ok(out)
}
