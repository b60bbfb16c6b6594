use super::*;

fn imports(source: &str) -> Vec<String> {
    collect_imports(source).expect("source should scan")
}

#[test]
fn plain_import_forms() {
    assert_eq!(imports("import os"), vec!["os"]);
    assert_eq!(imports("import os.path"), vec!["os"]);
    assert_eq!(imports("import numpy as np"), vec!["numpy"]);
    assert_eq!(imports("import os, sys"), vec!["os", "sys"]);
    assert_eq!(
        imports("import numpy as np, pandas as pd"),
        vec!["numpy", "pandas"]
    );
}

#[test]
fn from_import_forms() {
    assert_eq!(imports("from os import path"), vec!["os"]);
    assert_eq!(imports("from os.path import join"), vec!["os"]);
    assert_eq!(imports("from collections import OrderedDict, deque"), vec!["collections"]);
    assert_eq!(imports("from typing import (List,\n    Dict)"), vec!["typing"]);
}

#[test]
fn relative_imports_without_module_are_skipped() {
    assert_eq!(imports("from . import helpers"), Vec::<String>::new());
    assert_eq!(imports("from .. import config"), Vec::<String>::new());
}

#[test]
fn relative_imports_with_module_keep_the_name() {
    assert_eq!(imports("from .models import User"), vec!["models"]);
    assert_eq!(imports("from ..pkg.sub import thing"), vec!["pkg"]);
}

#[test]
fn imports_inside_function_bodies_are_found() {
    let source = "def main():\n    import json\n    return json.dumps({})\n";
    assert_eq!(imports(source), vec!["json"]);
}

#[test]
fn one_line_compound_statements_are_searched() {
    assert_eq!(imports("if True: import os"), vec!["os"]);
    assert_eq!(imports("import os; import sys"), vec!["os", "sys"]);
}

#[test]
fn strings_and_comments_hide_imports() {
    assert_eq!(imports("x = 'import os'"), Vec::<String>::new());
    assert_eq!(imports("# import os"), Vec::<String>::new());
    assert_eq!(
        imports("\"\"\"\nimport os\nimport sys\n\"\"\"\nimport json\n"),
        vec!["json"]
    );
}

#[test]
fn f_string_with_nested_quotes_scans_cleanly() {
    let source = "d = {'k': 1}\nprint(f\"{d['k']}\")\nimport os\n";
    assert_eq!(imports(source), vec!["os"]);
}

#[test]
fn backslash_continuation_joins_lines() {
    let source = "import \\\n    os\n";
    assert_eq!(imports(source), vec!["os"]);
}

#[test]
fn bracket_continuation_joins_lines() {
    let source = "from concurrent.futures import (\n    ThreadPoolExecutor,\n    as_completed,\n)\n";
    assert_eq!(imports(source), vec!["concurrent"]);
}

#[test]
fn missing_colon_on_block_header_is_rejected() {
    let err = collect_imports("if True\n  print(1)").unwrap_err();
    assert_eq!(
        err,
        AnalyzeError::MissingColon {
            line: 1,
            keyword: "if".to_string()
        }
    );
}

#[test]
fn missing_colon_reports_the_failing_line() {
    let source = "import os\n\nfor x in range(3)\n    print(x)\n";
    let err = collect_imports(source).unwrap_err();
    assert_eq!(
        err,
        AnalyzeError::MissingColon {
            line: 3,
            keyword: "for".to_string()
        }
    );
}

#[test]
fn block_headers_with_colons_pass() {
    let source = "\
if x:
    pass
elif y:
    pass
else:
    pass
for i in range(3):
    pass
while False:
    pass
try:
    pass
except ValueError as e:
    pass
finally:
    pass
with open('f') as f:
    pass
async def g():
    pass
class C(object):
    pass
";
    assert!(collect_imports(source).is_ok());
}

#[test]
fn dict_and_slice_colons_do_not_satisfy_block_headers() {
    // The `{1: 2}` colon is bracketed; the statement colon is still required.
    let err = collect_imports("if {1: 2}\n    pass").unwrap_err();
    assert!(matches!(err, AnalyzeError::MissingColon { line: 1, .. }));
}

#[test]
fn walrus_colon_is_not_a_statement_colon() {
    let err = collect_imports("while chunk := read()\n    pass").unwrap_err();
    assert!(matches!(err, AnalyzeError::MissingColon { .. }));
    assert!(collect_imports("while chunk := read():\n    pass").is_ok());
}

#[test]
fn unbalanced_brackets_are_rejected() {
    let err = collect_imports("x = (1, 2\n").unwrap_err();
    assert_eq!(
        err,
        AnalyzeError::UnbalancedBracket {
            line: 1,
            bracket: '('
        }
    );

    let err = collect_imports("x = 1)\n").unwrap_err();
    assert_eq!(
        err,
        AnalyzeError::UnbalancedBracket {
            line: 1,
            bracket: ')'
        }
    );

    let err = collect_imports("x = [1}\n").unwrap_err();
    assert_eq!(
        err,
        AnalyzeError::UnbalancedBracket {
            line: 1,
            bracket: '}'
        }
    );
}

#[test]
fn unterminated_strings_are_rejected() {
    let err = collect_imports("x = 'abc\n").unwrap_err();
    assert_eq!(err, AnalyzeError::UnterminatedString { line: 1 });

    let err = collect_imports("x = \"\"\"abc\n").unwrap_err();
    assert_eq!(err, AnalyzeError::UnterminatedString { line: 1 });
}

#[test]
fn raw_string_cannot_end_on_a_backslash() {
    let err = collect_imports("x = r'\\'").unwrap_err();
    assert!(matches!(err, AnalyzeError::UnterminatedString { .. }));
}

#[test]
fn import_without_a_module_is_rejected() {
    assert!(matches!(
        collect_imports("import").unwrap_err(),
        AnalyzeError::InvalidImport { line: 1, .. }
    ));
    assert!(matches!(
        collect_imports("from import x").unwrap_err(),
        AnalyzeError::InvalidImport { line: 1, .. }
    ));
    assert!(matches!(
        collect_imports("import 3rdparty").unwrap_err(),
        AnalyzeError::InvalidImport { line: 1, .. }
    ));
}

#[test]
fn decorators_are_ignored() {
    let source = "@app.route('/')\ndef handler():\n    pass\n";
    assert_eq!(imports(source), Vec::<String>::new());
}

#[test]
fn logical_line_numbers_survive_triple_strings() {
    let source = "x = \"\"\"\nline\nline\n\"\"\"\nimport os\n";
    let lines = logical_lines(source).expect("scans");
    let last = lines.last().expect("has lines");
    assert_eq!(last.text.trim(), "import os");
    assert_eq!(last.line, 5);
}

#[test]
fn duplicates_are_preserved_in_scan_order() {
    let source = "import os\nimport sys\nimport os\n";
    assert_eq!(imports(source), vec!["os", "sys", "os"]);
}
