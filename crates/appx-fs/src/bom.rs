//! UTF-8 BOM insertion for store certification
//!
//! Windows Store certification expects web content files to carry a
//! byte-order mark. This module prefixes every text asset under a root
//! directory with the UTF-8 BOM, leaving already-marked files alone.

use std::path::Path;

use crate::{io, walk, Result};

/// The UTF-8 byte-order mark.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// File extensions that receive a BOM.
const TEXT_EXTENSIONS: &[&str] = &["js", "html", "css", "json"];

/// Returns true when `content` already starts with a complete UTF-8 BOM.
pub fn has_bom(content: &[u8]) -> bool {
    content.len() >= 3 && content[..3] == UTF8_BOM
}

fn wants_bom(relative: &str) -> bool {
    match relative.rsplit_once('.') {
        Some((_, ext)) => TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Prefix every `.js`, `.html`, `.css` and `.json` file under `root`
/// with a UTF-8 BOM, unless the file already starts with one.
///
/// Returns the number of files rewritten.
pub fn add_bom_tree(root: &Path) -> Result<usize> {
    let mut rewritten = 0;

    for relative in walk::folder_contents(".", root)? {
        if !wants_bom(&relative) {
            continue;
        }

        let path = root.join(relative.trim_start_matches("./"));
        let content = io::read_bytes(&path)?;
        if has_bom(&content) {
            continue;
        }

        let mut marked = Vec::with_capacity(content.len() + 3);
        marked.extend_from_slice(&UTF8_BOM);
        marked.extend_from_slice(&content);
        io::write_atomic(&path, &marked)?;

        tracing::debug!(file = %path.display(), "added UTF-8 BOM");
        rewritten += 1;
    }

    Ok(rewritten)
}
