//! Dependency installation and retry specs
//!
//! Static imports install before the first run; runtime-discovered
//! modules trigger a bounded install-and-retry loop.

use crate::prelude::*;

#[test]
fn static_import_installs_before_the_first_run() {
    let temp = Project::empty();

    temp.px()
        .args(&[
            "run",
            "-c",
            "import requests  # FAKE:MISSING:requests\nprint('ready')",
        ])
        .passes()
        .stdout_has("ready")
        .stdout_has("Attempts: 1")
        .stdout_has("Required packages: requests")
        .stdout_has("Missing packages: requests");
}

#[test]
fn preinstalled_package_is_not_reinstalled() {
    let temp = Project::empty();
    temp.preinstall("requests", "2.31.0");

    temp.px()
        .args(&[
            "run",
            "-c",
            "import requests  # FAKE:MISSING:requests\nprint('cached')",
        ])
        .passes()
        .stdout_has("cached")
        .stdout_has("Installed packages: requests==2.31.0")
        .stdout_lacks("Missing packages");
}

#[test]
fn runtime_discovered_module_is_installed_and_retried() {
    // __import__ hides the module from static analysis, so the first
    // execution fails and the loop installs it.
    let temp = Project::empty();

    temp.px()
        .args(&[
            "run",
            "-c",
            "r = __import__('requests')  # FAKE:MISSING:requests\nprint('fetched')",
        ])
        .passes()
        .stdout_has("fetched")
        .stdout_has("Attempts: 2");
}

#[test]
fn uninstallable_package_fails_with_install_error() {
    let temp = Project::empty();
    temp.refuse_install("ghostlib");

    temp.px()
        .args(&["run", "-c", "import ghostlib  # FAKE:MISSING:ghostlib"])
        .fails_with(1)
        .stdout_has("Error type: DependencyInstallError")
        .stdout_has("Install failures:")
        .stdout_has("No matching distribution found for ghostlib");
}

#[test]
fn alias_mapped_import_installs_the_real_package() {
    // The module is `yaml` but the installable package is `pyyaml`; the
    // fake records installs under the package name.
    let temp = Project::empty();

    temp.px()
        .args(&["run", "-c", "import yaml\nprint('parsed')"])
        .passes()
        .stdout_has("parsed")
        .stdout_has("Required packages: pyyaml (import yaml)");
}
