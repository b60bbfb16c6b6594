// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Import-name to package-name alias table.
//!
//! A handful of popular packages install under a different name than they
//! import (`import PIL` comes from the `pillow` distribution). The table is
//! scanned in order and the first matching entry wins; names without an
//! entry install under their own name.

use serde::Serialize;

/// Aliases plus well-known identity entries, in lookup order.
///
/// Identity entries exist so that common scientific and web packages
/// classify as third-party rather than unknown during analysis.
static ALIASES: &[(&str, &str)] = &[
    // import name differs from the installable package name
    ("PIL", "pillow"),
    ("Image", "pillow"),
    ("bs4", "beautifulsoup4"),
    ("cv2", "opencv-python"),
    ("dateutil", "python-dateutil"),
    ("dotenv", "python-dotenv"),
    ("sklearn", "scikit-learn"),
    ("webdriver", "selenium"),
    ("webdriver_manager", "webdriver-manager"),
    ("yaml", "pyyaml"),
    // identity entries
    ("aiohttp", "aiohttp"),
    ("django", "django"),
    ("fastapi", "fastapi"),
    ("flask", "flask"),
    ("keras", "keras"),
    ("lxml", "lxml"),
    ("matplotlib", "matplotlib"),
    ("numpy", "numpy"),
    ("pandas", "pandas"),
    ("playwright", "playwright"),
    ("pyautogui", "pyautogui"),
    ("pytz", "pytz"),
    ("requests", "requests"),
    ("scipy", "scipy"),
    ("seaborn", "seaborn"),
    ("selenium", "selenium"),
    ("tensorflow", "tensorflow"),
    ("torch", "torch"),
    ("tqdm", "tqdm"),
];

/// Look up the installable package for an import name.
///
/// Returns `None` when the name has no table entry; callers fall back to
/// the import name itself.
pub fn package_for(import_name: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(import, _)| *import == import_name)
        .map(|(_, package)| *package)
}

/// Whether an import name appears in the alias table at all.
pub fn is_known(import_name: &str) -> bool {
    package_for(import_name).is_some()
}

/// An import name paired with the package that provides it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageSpec {
    /// Name as written in the `import` statement.
    pub import_name: String,
    /// Name handed to the package manager.
    pub install_name: String,
}

impl PackageSpec {
    /// Build a spec for an import name, mapping through the alias table.
    pub fn for_import(import_name: &str) -> Self {
        let install_name = package_for(import_name).unwrap_or(import_name);
        Self {
            import_name: import_name.to_string(),
            install_name: install_name.to_string(),
        }
    }
}

impl std::fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.import_name == self.install_name {
            write!(f, "{}", self.install_name)
        } else {
            write!(f, "{} (import {})", self.install_name, self.import_name)
        }
    }
}
