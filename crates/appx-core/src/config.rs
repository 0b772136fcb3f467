//! Application descriptor model
//!
//! The platform-independent snapshot the reconcilers are driven by:
//! display name, version, package identifier, author and the icon and
//! splash-screen sets. Loaded from a `config.xml`-style descriptor
//! (`<widget>` root), and validated before the orchestrator touches
//! any project file.

use std::path::Path;

use xmltree::{Element, XMLNode};

use crate::error::{Error, Result};
use crate::xml;

/// One icon or splash-screen resource from the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResource {
    /// Source path, relative to the application root.
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Platform tag this resource is restricted to, if any.
    pub platform: Option<String>,
}

/// A queryable set of image resources.
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    images: Vec<ImageResource>,
}

impl ImageSet {
    pub fn new(images: Vec<ImageResource>) -> Self {
        Self { images }
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The subset usable on `platform`: resources tagged for it plus
    /// untagged ones.
    pub fn for_platform(&self, platform: &str) -> ImageSet {
        let images = self
            .images
            .iter()
            .filter(|img| match &img.platform {
                Some(tag) => tag == platform,
                None => true,
            })
            .cloned()
            .collect();
        ImageSet { images }
    }

    /// Best match by exact width×height.
    pub fn get_by_size(&self, width: u32, height: u32) -> Option<&ImageResource> {
        self.images
            .iter()
            .find(|img| img.width == Some(width) && img.height == Some(height))
    }

    /// The default fallback: the first resource declared without
    /// dimensions.
    pub fn get_default(&self) -> Option<&ImageResource> {
        self.images
            .iter()
            .find(|img| img.width.is_none() && img.height.is_none())
    }
}

/// The platform-independent application descriptor.
///
/// Read-only to the reconcilers; one snapshot drives one sync run.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Human-readable display name.
    pub name: String,
    /// Dotted version string, as authored.
    pub version: String,
    /// Package identifier (reverse-domain style).
    pub package_name: String,
    /// Author display name.
    pub author: String,
    pub icons: ImageSet,
    pub splash_screens: ImageSet,
}

impl AppConfig {
    /// Load a descriptor from a `config.xml`-style file.
    ///
    /// The root element must be `<widget>` with `id` and `version`
    /// attributes; `<name>`, `<author>`, `<icon>` and `<splash>`
    /// children fill in the rest.
    pub fn load(path: &Path) -> Result<Self> {
        let content = appx_fs::io::read_bytes(path)?;
        let root = Element::parse(content.as_slice()).map_err(|e| Error::InvalidConfig {
            message: format!("cannot parse {}: {}", path.display(), e),
        })?;

        if root.name != "widget" {
            return Err(Error::InvalidConfig {
                message: format!(
                    "expected <widget> descriptor root, found <{}>",
                    root.name
                ),
            });
        }

        let attr = |name: &str| root.attributes.get(name).cloned().unwrap_or_default();
        let child_text = |name: &str| {
            root.get_child(name)
                .map(xml::element_text)
                .map(|t| t.trim().to_string())
                .unwrap_or_default()
        };

        Ok(Self {
            name: child_text("name"),
            version: attr("version"),
            package_name: attr("id"),
            author: child_text("author"),
            icons: ImageSet::new(collect_images(&root, "icon")),
            splash_screens: ImageSet::new(collect_images(&root, "splash")),
        })
    }

    /// Guard the orchestrator against an unusable descriptor.
    ///
    /// Runs before any project file I/O; a failure here aborts the
    /// whole sync with no partial processing.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "application name is empty".to_string(),
            });
        }
        if self.package_name.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "package identifier is empty".to_string(),
            });
        }
        if self.package_name.contains(char::is_whitespace) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "package identifier {:?} contains whitespace",
                    self.package_name
                ),
            });
        }
        Ok(())
    }

    /// Icons usable on `platform`.
    pub fn icons(&self, platform: &str) -> ImageSet {
        self.icons.for_platform(platform)
    }

    /// Splash screens usable on `platform`.
    pub fn splash_screens(&self, platform: &str) -> ImageSet {
        self.splash_screens.for_platform(platform)
    }
}

fn collect_images(root: &Element, tag: &str) -> Vec<ImageResource> {
    root.children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Element(el) if el.name == tag => Some(el),
            _ => None,
        })
        .filter_map(|el| {
            let src = el.attributes.get("src")?.clone();
            Some(ImageResource {
                src,
                width: parse_dimension(el, "width"),
                height: parse_dimension(el, "height"),
                platform: el.attributes.get("platform").cloned(),
            })
        })
        .collect()
}

fn parse_dimension(el: &Element, name: &str) -> Option<u32> {
    el.attributes.get(name)?.trim().parse().ok()
}
