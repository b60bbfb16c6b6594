// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Python standard-library module table.
//!
//! Classification must be deterministic across hosts, so this is a fixed
//! table rather than a probe of whatever interpreter happens to be on PATH.
//! The table lists top-level module names only; `os.path` is covered by `os`.

/// Top-level standard-library module names, sorted for binary search.
///
/// Covers CPython 3.9+ including Windows-only modules (`winreg`, `msvcrt`),
/// so analysis results do not depend on the analyzing host's platform.
static BUILTIN_MODULES: &[&str] = &[
    "__future__", "_thread",
    "abc", "argparse", "array", "ast", "asyncio", "atexit",
    "base64", "binascii", "builtins", "bz2", "calendar", "cmath",
    "cmd", "code", "codecs", "codeop", "collections", "concurrent",
    "configparser", "contextlib", "contextvars", "copy", "crypt", "csv",
    "ctypes", "dataclasses", "datetime", "decimal", "difflib", "dis",
    "distutils", "email", "ensurepip", "enum", "errno", "fcntl",
    "filecmp", "fnmatch", "fractions", "functools", "gc", "getopt",
    "getpass", "gettext", "glob", "graphlib", "grp", "gzip",
    "hashlib", "heapq", "hmac", "html", "http", "importlib",
    "inspect", "io", "ipaddress", "itertools", "json", "keyword",
    "linecache", "locale", "logging", "lzma", "math", "mimetypes",
    "mmap", "msvcrt", "multiprocessing", "netrc", "nis", "numbers",
    "operator", "optparse", "os", "pathlib", "pdb", "pickle",
    "pipes", "pkgutil", "platform", "posix", "pprint", "profile",
    "pstats", "pty", "pwd", "pydoc", "queue", "random",
    "re", "reprlib", "resource", "select", "shelve", "shlex",
    "shutil", "signal", "site", "smtplib", "socket", "socketserver",
    "spwd", "sqlite3", "ssl", "stat", "statistics", "string",
    "struct", "subprocess", "sys", "sysconfig", "syslog", "tarfile",
    "tempfile", "termios", "textwrap", "threading", "time", "timeit",
    "token", "tokenize", "trace", "traceback", "tracemalloc", "tty",
    "turtle", "types", "typing", "unicodedata", "unittest", "urllib",
    "uuid", "venv", "warnings", "weakref", "webbrowser", "winreg",
    "winsound", "xml", "xmlrpc", "zipapp", "zipfile", "zipimport",
    "zlib", "zoneinfo",
];

/// Check whether a top-level module name is part of the standard library.
pub fn is_builtin(module: &str) -> bool {
    BUILTIN_MODULES.binary_search(&module).is_ok()
}
