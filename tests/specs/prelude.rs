//! Spec-test DSL: isolated projects, a fake interpreter, and px invocations.
//!
//! Every `Project` gets its own temp dir, its own interpreter state, and an
//! isolated HOME, so specs run in parallel without touching the host's
//! Python or config files.

#![allow(dead_code)]

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// python3 stand-in. It speaks exactly the dialect px uses: `--version`,
/// `-m pip list --format=json`, `-m pip install ... <pkg>`, and plain
/// script execution. Script behavior is driven by `FAKE:` markers in the
/// source text:
///
/// - `FAKE:MISSING:<mod>` - ModuleNotFoundError until `<mod>` is installed
/// - `FAKE:SYNTAX` - SyntaxError and exit 1
/// - `FAKE:FAIL` - traceback and exit 1 (after printing)
/// - `FAKE:HANG` - block forever (after printing)
///
/// Anything printed comes from `print('...')` literals in the source.
const FAKE_PYTHON: &str = r##"#!/bin/sh
STATE="${FAKE_PY_STATE:?FAKE_PY_STATE not set}"
INSTALLED="$STATE/installed"
REFUSE="$STATE/refuse"

case "$1" in
--version)
    echo "Python 3.9.0"
    exit 0
    ;;
-m)
    if [ "$2" = "pip" ] && [ "$3" = "list" ]; then
        printf '['
        if [ -f "$INSTALLED" ]; then
            first=1
            while read -r name version; do
                [ "$first" = 1 ] || printf ', '
                printf '{"name": "%s", "version": "%s"}' "$name" "$version"
                first=0
            done < "$INSTALLED"
        fi
        printf ']\n'
        exit 0
    fi
    if [ "$2" = "pip" ] && [ "$3" = "install" ]; then
        for pkg in "$@"; do :; done
        if [ -f "$REFUSE" ] && grep -qx "$pkg" "$REFUSE"; then
            echo "ERROR: No matching distribution found for $pkg" >&2
            exit 1
        fi
        echo "$pkg 0.0.0" >> "$INSTALLED"
        echo "Successfully installed $pkg-0.0.0"
        exit 0
    fi
    echo "unexpected invocation: $*" >&2
    exit 2
    ;;
esac

script="$1"

for mod in $(sed -n 's/.*FAKE:MISSING:\([a-zA-Z0-9_]*\).*/\1/p' "$script"); do
    if ! { [ -f "$INSTALLED" ] && grep -q "^$mod " "$INSTALLED"; }; then
        echo "Traceback (most recent call last):" >&2
        echo "  File \"$script\", line 1, in <module>" >&2
        echo "ModuleNotFoundError: No module named '$mod'" >&2
        exit 1
    fi
done

if grep -q 'FAKE:SYNTAX' "$script"; then
    echo "  File \"$script\", line 1" >&2
    echo "SyntaxError: invalid syntax" >&2
    exit 1
fi

# `echo` completes a final line with no trailing newline, so prints are
# always newline-terminated like real python3 regardless of how the
# script file ends.
{ cat "$script"; echo; } | sed -n "s/.*print('\([^']*\)').*/\1/p"

if grep -q 'FAKE:FAIL' "$script"; then
    echo "Traceback (most recent call last):" >&2
    echo "ZeroDivisionError: division by zero" >&2
    exit 1
fi

if grep -q 'FAKE:HANG' "$script"; then
    exec sleep 60
fi

exit 0
"##;

pub struct Project {
    dir: tempfile::TempDir,
    bin: PathBuf,
    state: PathBuf,
}

impl Project {
    pub fn empty() -> Self {
        let dir = tempfile::TempDir::new().unwrap();
        let bin = dir.path().join("fake-bin");
        let state = dir.path().join("fake-pystate");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::create_dir_all(&state).unwrap();

        let python = bin.join("python3");
        std::fs::write(&python, FAKE_PYTHON).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        Self { dir, bin, state }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Seed the fake interpreter's installed-package registry.
    pub fn preinstall(&self, name: &str, version: &str) {
        append(&self.state.join("installed"), &format!("{name} {version}\n"));
    }

    /// Make the fake pip refuse a package.
    pub fn refuse_install(&self, name: &str) {
        append(&self.state.join("refuse"), &format!("{name}\n"));
    }

    /// Build a px invocation rooted in this project, with the fake
    /// interpreter first on PATH and all `PX_*` host leakage scrubbed.
    pub fn px(&self) -> Px {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("px"));
        cmd.current_dir(self.dir.path());

        let host_path = std::env::var("PATH").unwrap_or_default();
        cmd.env("PATH", format!("{}:{host_path}", self.bin.display()));
        cmd.env("FAKE_PY_STATE", &self.state);
        cmd.env("HOME", self.dir.path());
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join(".config"));
        for name in [
            "PX_BACKEND",
            "PX_PYTHON",
            "PX_MAX_ATTEMPTS",
            "PX_RUN_TIMEOUT",
            "PX_INSTALL_TIMEOUT",
            "PX_IMAGE",
            "PX_CONTAINER_NAME",
            "PX_LOG",
        ] {
            cmd.env_remove(name);
        }

        Px { cmd, stdin: None }
    }
}

fn append(path: &Path, line: &str) {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    file.write_all(line.as_bytes()).unwrap();
}

pub struct Px {
    cmd: Command,
    stdin: Option<String>,
}

impl Px {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, text: &str) -> Self {
        self.stdin = Some(text.to_string());
        self
    }

    /// Run and require exit 0.
    pub fn passes(self) -> Spawned {
        let spawned = self.spawn();
        assert!(
            spawned.status.success(),
            "expected success, got {:?}\n--- stdout ---\n{}--- stderr ---\n{}",
            spawned.status.code(),
            spawned.stdout,
            spawned.stderr,
        );
        spawned
    }

    /// Run and require a nonzero exit.
    pub fn fails(self) -> Spawned {
        let spawned = self.spawn();
        assert!(
            !spawned.status.success(),
            "expected failure, got success\n--- stdout ---\n{}--- stderr ---\n{}",
            spawned.stdout,
            spawned.stderr,
        );
        spawned
    }

    /// Run and require a specific exit code.
    pub fn fails_with(self, code: i32) -> Spawned {
        let spawned = self.spawn();
        assert_eq!(
            spawned.status.code(),
            Some(code),
            "--- stdout ---\n{}--- stderr ---\n{}",
            spawned.stdout,
            spawned.stderr,
        );
        spawned
    }

    fn spawn(mut self) -> Spawned {
        self.cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        self.cmd.stdin(if self.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let mut child = self.cmd.spawn().unwrap();
        if let Some(text) = &self.stdin {
            child
                .stdin
                .take()
                .unwrap()
                .write_all(text.as_bytes())
                .unwrap();
        }
        let output = child.wait_with_output().unwrap();

        Spawned {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status,
        }
    }
}

pub struct Spawned {
    stdout: String,
    stderr: String,
    status: ExitStatus,
}

impl Spawned {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|e| {
            panic!("stdout is not JSON: {e}\n--- stdout ---\n{}", self.stdout)
        })
    }

    pub fn stdout_has(&self, needle: &str) -> &Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {needle:?}\n--- stdout ---\n{}",
            self.stdout,
        );
        self
    }

    pub fn stdout_lacks(&self, needle: &str) -> &Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout unexpectedly has {needle:?}\n--- stdout ---\n{}",
            self.stdout,
        );
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {needle:?}\n--- stderr ---\n{}",
            self.stderr,
        );
        self
    }

    pub fn stderr_lacks(&self, needle: &str) -> &Self {
        assert!(
            !self.stderr.contains(needle),
            "stderr unexpectedly has {needle:?}\n--- stderr ---\n{}",
            self.stderr,
        );
        self
    }
}
