//! Shared helpers: stub executables standing in for ant-tools
//!
//! Every stub is written once per test binary, before any of them runs, so
//! no test can exec a script another thread still has open for writing.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use ant_tools_adapter::{AdapterOptions, AdapterOptionsBuilder, ProcessAdapter};

const STUBS: &[(&str, &str)] = &[
    ("echo_args", r#"for arg in "$@"; do printf '%s\n' "$arg"; done"#),
    ("arg_count", r#"echo "$#""#),
    (
        "count",
        r#"i=1; while [ "$i" -le "$1" ]; do echo "record $i"; i=$((i+1)); done"#,
    ),
    ("lines", r"printf 'alpha\n\nbeta\n   \ngamma\n'"),
    ("crlf", r"printf 'one\r\ntwo\r\n'"),
    ("unterminated", r"printf 'first\nlast'"),
    ("json", r#"printf '{"a":1}\nnot-json\n[1,2,3]\n'"#),
    ("bad_utf8", r"printf 'one\n\377\377\ntwo\nthree\n'"),
    ("silent", "exit 0"),
    (
        "failing",
        "echo partial; echo 'boom: corrupt ant file' >&2; exit 3",
    ),
    ("long_line", r#"printf 'short\n%0200d\nnever\n' 0"#),
    (
        "endless",
        r#"echo $$ > "$1"; i=0; while :; do echo "line $i"; i=$((i+1)); done"#,
    ),
    ("stall", "echo ready; exec sleep 30"),
    // A background grandchild keeps stderr open after the stub itself exits
    ("stderr_held_fail", "echo hi; sleep 8 >/dev/null & exit 1"),
    ("stderr_held", "echo hi; sleep 8 >/dev/null & exit 0"),
    (
        "fake_ant_tools",
        r#"case "$2" in
  --validate) echo "$1: structure ok" ;;
  --stats) echo "version: 3"; echo ""; echo "records: 2" ;;
  *) printf '{"chromosome":"chr1","position":100}\n{"chromosome":"chr1","position":200}\n' ;;
esac"#,
    ),
];

/// Directory holding the stub scripts
pub fn stub_dir() -> &'static Path {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = Path::new(env!("CARGO_TARGET_TMPDIR"))
            .join(format!("ant-tools-stubs-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create stub dir");
        for (name, body) in STUBS {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub");
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
        }
        dir
    })
}

/// Absolute path of one stub
pub fn stub(name: &str) -> PathBuf {
    stub_dir().join(name)
}

/// Options builder already pointing at a stub
pub fn options_for(name: &str) -> AdapterOptionsBuilder {
    AdapterOptions::builder().executable_path(stub(name))
}

/// Adapter running a stub with otherwise default options
pub fn adapter_for(name: &str) -> ProcessAdapter {
    ProcessAdapter::new(options_for(name).build())
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Whether a process is still alive (a zombie awaiting reaping is not alive)
#[cfg(target_os = "linux")]
pub fn is_running(pid: u32) -> bool {
    match fs::read_to_string(format!("/proc/{pid}/stat")) {
        Ok(stat) => stat
            .rsplit_once(')')
            .and_then(|(_, rest)| rest.split_whitespace().next())
            .is_some_and(|state| state != "Z" && state != "X"),
        Err(_) => false,
    }
}

/// Whether a process no longer appears in the process table at all
#[cfg(target_os = "linux")]
pub fn is_gone(pid: u32) -> bool {
    !Path::new(&format!("/proc/{pid}")).exists()
}
