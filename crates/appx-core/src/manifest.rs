//! Application manifest reconciliation
//!
//! Applies the descriptor's identity, display-name and version fields
//! to the XML application manifest as minimal in-place patches, and
//! imposes a canonical lexicographic order on the capability list.
//! The mutated tree is only written back once every patch step has
//! succeeded, so a structural failure leaves the file untouched.

use std::path::Path;

use xmltree::{Element, XMLNode};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::version::normalize_version;
use crate::xml;

/// Reconcile the manifest at `manifest_path` with `config`.
///
/// Idempotent: a second run against the file it just wrote performs no
/// patches and produces byte-identical output.
pub fn reconcile(manifest_path: &Path, config: &AppConfig) -> Result<()> {
    let content = appx_fs::io::read_bytes(manifest_path)?;
    let mut doc = Element::parse(content.as_slice()).map_err(|e| Error::MalformedManifest {
        path: manifest_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let version = normalize_version(&config.version);

    // Identity carries the package name and the 4-component version.
    // Its absence is tolerated; some manifests omit it.
    if let Some(identity) = xml::find_named_mut(&mut doc, "Identity") {
        if xml::set_attribute_if_changed(identity, "Name", &config.package_name) {
            tracing::debug!(name = %config.package_name, "updated Identity Name");
        }
        if xml::set_attribute_if_changed(identity, "Version", &version) {
            tracing::debug!(%version, "updated Identity Version");
        }
    }

    update_application(&mut doc, config)?;
    update_properties(&mut doc, config);
    sort_capabilities(&mut doc);

    let output = xml::serialize(&doc).map_err(|e| Error::XmlWrite {
        message: e.to_string(),
    })?;
    appx_fs::io::write_atomic(manifest_path, &output)?;

    tracing::info!(manifest = %manifest_path.display(), "manifest reconciled");
    Ok(())
}

/// Patch the Application node's Id and its VisualElements DisplayName.
///
/// Both nodes are required by the manifest schema; a missing one means
/// a corrupted or hand-edited manifest and aborts the reconciliation.
fn update_application(doc: &mut Element, config: &AppConfig) -> Result<()> {
    let app = xml::find_named_mut(doc, "Application").ok_or_else(|| {
        Error::InvalidManifestStructure {
            node: "Application".to_string(),
        }
    })?;

    xml::set_attribute_if_changed(app, "Id", &config.package_name);

    // Newer schema revisions qualify VisualElements with a namespace
    // prefix (m2:VisualElements); try the unqualified name first.
    let unprefixed_exists =
        xml::find_element(app, &|el| el.name == "VisualElements" && el.prefix.is_none()).is_some();
    let visual_elems = if unprefixed_exists {
        xml::find_element_mut(app, &|el| el.name == "VisualElements" && el.prefix.is_none())
    } else {
        xml::find_element_mut(app, &|el| el.name == "VisualElements")
    };

    match visual_elems {
        Some(el) => {
            xml::set_attribute_if_changed(el, "DisplayName", &config.name);
            Ok(())
        }
        None => Err(Error::InvalidManifestStructure {
            node: "VisualElements".to_string(),
        }),
    }
}

/// Patch the optional Properties block. Absence of the block or of
/// either child is not an error; those updates are simply skipped.
fn update_properties(doc: &mut Element, config: &AppConfig) {
    let Some(properties) = xml::find_named_mut(doc, "Properties") else {
        return;
    };

    if let Some(display_name) = xml::find_named_mut(properties, "DisplayName")
        && xml::set_text_if_changed(display_name, &config.name)
    {
        tracing::debug!(name = %config.name, "updated Properties DisplayName");
    }

    if let Some(publisher) = xml::find_named_mut(properties, "PublisherDisplayName")
        && xml::set_text_if_changed(publisher, &config.author)
    {
        tracing::debug!(author = %config.author, "updated PublisherDisplayName");
    }
}

/// Detach the capability elements, sort them by qualified tag name and
/// re-append them. Certification tooling rejects some orderings, and a
/// canonical order keeps repeated syncs diff-free. A manifest without a
/// Capabilities container is left as-is.
fn sort_capabilities(doc: &mut Element) {
    let Some(container) = xml::find_named_mut(doc, "Capabilities") else {
        return;
    };

    let children = std::mem::take(&mut container.children);
    let (mut elements, others): (Vec<XMLNode>, Vec<XMLNode>) = children
        .into_iter()
        .partition(|node| matches!(node, XMLNode::Element(_)));

    // Stable sort: equal tags keep their relative declaration order.
    elements.sort_by_key(|node| match node {
        XMLNode::Element(el) => xml::qualified_name(el),
        _ => String::new(),
    });

    container.children = others;
    container.children.extend(elements);
}
