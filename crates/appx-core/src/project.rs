//! MSBuild project document model
//!
//! An owned, mutable view of the `.jsproj` file scoped to one
//! reconciliation run: loaded, patched in memory, persisted as a
//! whole-file replace, discarded. Source entries live as
//! `<Content Include="..."/>` items inside top-level `<ItemGroup>`
//! containers, with backslash path separators as MSBuild writes them.

use std::path::{Path, PathBuf};

use regex::Regex;
use xmltree::{Element, XMLNode};

use crate::error::{Error, Result};
use crate::xml;

/// One project file, parsed and exclusively owned for a single run.
#[derive(Debug)]
pub struct ProjectDocument {
    path: PathBuf,
    root: Element,
}

impl ProjectDocument {
    /// Parse the project file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = appx_fs::io::read_bytes(path)?;
        let root = Element::parse(content.as_slice()).map_err(|e| Error::InvalidProjectFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if root.name != "Project" {
            return Err(Error::InvalidProjectFile {
                path: path.to_path_buf(),
                message: format!("expected <Project> root, found <{}>", root.name),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    /// Remove every Content entry whose Include path matches `pattern`.
    ///
    /// Item groups left without any element children are pruned, so
    /// repeated reconciliations cannot accumulate empty containers.
    /// Returns the number of entries removed.
    pub fn remove_source_entries(&mut self, pattern: &Regex) -> usize {
        let mut removed = 0;

        for node in &mut self.root.children {
            let XMLNode::Element(group) = node else {
                continue;
            };
            if group.name != "ItemGroup" {
                continue;
            }

            group.children.retain(|child| match child {
                XMLNode::Element(item) if item.name == "Content" => {
                    let stale = item
                        .attributes
                        .get("Include")
                        .is_some_and(|include| pattern.is_match(include));
                    if stale {
                        removed += 1;
                    }
                    !stale
                }
                _ => true,
            });
        }

        self.root.children.retain(|node| match node {
            XMLNode::Element(group) if group.name == "ItemGroup" => group
                .children
                .iter()
                .any(|child| matches!(child, XMLNode::Element(_))),
            _ => true,
        });

        removed
    }

    /// Append `entries` as Content items in a fresh item group.
    ///
    /// Forward slashes are converted to the project file's backslash
    /// form. No group is added for an empty entry list.
    pub fn add_source_entries<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut group = Element::new("ItemGroup");
        for entry in entries {
            let mut item = Element::new("Content");
            item.attributes
                .insert("Include".to_string(), entry.replace('/', "\\"));
            group.children.push(XMLNode::Element(item));
        }

        if !group.children.is_empty() {
            self.root.children.push(XMLNode::Element(group));
        }
    }

    /// All Content Include paths currently in the document, in order.
    pub fn source_entries(&self) -> Vec<String> {
        let mut entries = Vec::new();
        for node in &self.root.children {
            let XMLNode::Element(group) = node else {
                continue;
            };
            if group.name != "ItemGroup" {
                continue;
            }
            for child in &group.children {
                if let XMLNode::Element(item) = child
                    && item.name == "Content"
                    && let Some(include) = item.attributes.get("Include")
                {
                    entries.push(include.clone());
                }
            }
        }
        entries
    }

    /// Serialize and persist the document, replacing the prior file.
    pub fn save(&self) -> Result<()> {
        let output = xml::serialize(&self.root).map_err(|e| Error::XmlWrite {
            message: e.to_string(),
        })?;
        appx_fs::io::write_atomic(&self.path, &output)?;
        Ok(())
    }
}
