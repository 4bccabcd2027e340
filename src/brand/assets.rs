use std::path::{Path, PathBuf};

/// Where brand assets live. Everything is relative to one root directory
/// (`assets` by default):
///
/// ```text
/// assets/
///   brand_colors.json
///   fonts/Satoshi-Regular.ttf
///   fonts/Satoshi-Bold.ttf
///   Satoshi.ttf
///   logo.png
///   logos/logo_small.png
///   watermark.png
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    root: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        AssetPaths::new("assets")
    }
}

impl AssetPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> AssetPaths {
        AssetPaths {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Any file below the asset root
    pub fn path<P: AsRef<Path>>(&self, name: P) -> PathBuf {
        self.root.join(name)
    }

    pub fn palette_file(&self) -> PathBuf {
        self.path("brand_colors.json")
    }

    /// Regular weight font files, most specific first. The last candidate sits next
    /// to the asset directory rather than inside it.
    pub fn regular_font_candidates(&self) -> Vec<PathBuf> {
        vec![
            self.path("fonts/Satoshi-Regular.ttf"),
            self.path("Satoshi.ttf"),
            self.path("../Satoshi.ttf"),
        ]
    }

    pub fn bold_font_candidates(&self) -> Vec<PathBuf> {
        vec![self.path("fonts/Satoshi-Bold.ttf")]
    }

    pub fn logo_small(&self) -> PathBuf {
        self.path("logos/logo_small.png")
    }

    pub fn logo(&self) -> PathBuf {
        self.path("logo.png")
    }

    /// A named image, looked up at the root first and in `logos/` second
    pub fn logo_candidates(&self, name: &str) -> Vec<PathBuf> {
        vec![self.path(name), self.path("logos").join(name)]
    }

    pub fn watermark(&self) -> PathBuf {
        self.path("watermark.png")
    }
}
