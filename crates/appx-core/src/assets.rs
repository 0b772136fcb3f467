//! Icon and splash-screen asset copy
//!
//! Byte-for-byte copies from the descriptor's image sets into the
//! fixed target slots the platform template expects. No transcoding or
//! resizing happens here; a slot without a matching resource is
//! skipped.

use std::path::Path;

use crate::config::ImageSet;
use crate::error::Result;

struct IconTarget {
    dest: &'static str,
    width: u32,
    height: u32,
}

/// Icon slots in the platform template.
const ICON_TARGETS: &[IconTarget] = &[
    IconTarget {
        dest: "images/logo.png",
        width: 150,
        height: 150,
    },
    IconTarget {
        dest: "images/smalllogo.png",
        width: 30,
        height: 30,
    },
    IconTarget {
        dest: "images/storelogo.png",
        width: 50,
        height: 50,
    },
];

/// Splash-screen slot; the template expects exactly 620×300.
const SPLASH_DEST: &str = "images/splashscreen.png";
const SPLASH_WIDTH: u32 = 620;
const SPLASH_HEIGHT: u32 = 300;

/// Copy the best-matching icon into each template slot.
///
/// Exact width×height match first, the set's default as fallback.
pub fn copy_icons(icons: &ImageSet, app_root: &Path, platform_root: &Path) -> Result<()> {
    for target in ICON_TARGETS {
        let icon = icons
            .get_by_size(target.width, target.height)
            .or_else(|| icons.get_default());
        let Some(icon) = icon else {
            continue;
        };

        let src = app_root.join(&icon.src);
        let dest = platform_root.join(target.dest);
        tracing::debug!(src = %src.display(), dest = %dest.display(), "copying icon");
        appx_fs::io::copy_file(&src, &dest)?;
    }
    Ok(())
}

/// Copy the 620×300 splash screen, when the descriptor declares one.
pub fn copy_splash(splash_screens: &ImageSet, app_root: &Path, platform_root: &Path) -> Result<()> {
    let Some(splash) = splash_screens.get_by_size(SPLASH_WIDTH, SPLASH_HEIGHT) else {
        return Ok(());
    };

    let src = app_root.join(&splash.src);
    let dest = platform_root.join(SPLASH_DEST);
    tracing::debug!(src = %src.display(), dest = %dest.display(), "copying splash screen");
    appx_fs::io::copy_file(&src, &dest)?;
    Ok(())
}
