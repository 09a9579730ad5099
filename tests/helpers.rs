//! Shared test utilities: a throwaway project tree with fake build tools.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use relbuild::config::Config;

/// Variable the fake tools report the interpreter through.
pub const INTERP_VAR: &str = "RELBUILD_TEST_INTERPRETER";

/// Fake `make dist`: writes a matching archive and a signature that must not match.
pub const MAKE_OK: &str = r#"#!/bin/sh
echo "make $*" >> .calls
echo "make:${RELBUILD_TEST_INTERPRETER}" >> .interp
touch foo-1.0.tar.gz foo-1.0.tar.gz.asc
"#;

/// Fake `make dist` that fails like a broken Makefile.
pub const MAKE_FAIL: &str = r#"#!/bin/sh
echo "make $*" >> .calls
echo "make: *** No rule to make target 'dist'.  Stop." >&2
exit 2
"#;

/// Fake `make dist` that succeeds without producing anything.
pub const MAKE_NOTHING: &str = r#"#!/bin/sh
echo "make $*" >> .calls
"#;

/// Fake `rpmbuild -D "_topdir X" -ta ...`: nests packages under the topdir.
pub const RPMBUILD_OK: &str = r#"#!/bin/sh
echo "rpmbuild $*" >> .calls
echo "rpmbuild:${RELBUILD_TEST_INTERPRETER}" >> .interp
topdir=$(echo "$2" | sed 's/^_topdir //')
mkdir -p "$topdir/a/b" "$topdir/x" "$topdir/SPECS"
touch "$topdir/a/b/foo-1.0-1.noarch.rpm" "$topdir/x/foo-1.0-1.src.rpm" "$topdir/SPECS/foo.spec"
"#;

/// Fake `rpmbuild` that fails after writing a partial package into the topdir.
pub const RPMBUILD_FAIL: &str = r#"#!/bin/sh
echo "rpmbuild $*" >> .calls
topdir=$(echo "$2" | sed 's/^_topdir //')
mkdir -p "$topdir/x"
touch "$topdir/x/foo-1.0-1.src.rpm"
echo "error: Bad exit status from /var/tmp/rpm-tmp.1 (%build)" >&2
exit 1
"#;

pub const AUTOGEN_OK: &str = r#"#!/bin/sh
echo "autogen $*" >> .calls
echo "autogen:${RELBUILD_TEST_INTERPRETER}" >> .interp
"#;

pub const BUILDDEP_OK: &str = r#"#!/bin/sh
echo "builddep $*" >> .calls
echo "builddep:${RELBUILD_TEST_INTERPRETER}" >> .interp
"#;

/// Fake resolver that cannot satisfy a BuildRequires.
pub const BUILDDEP_FAIL: &str = r#"#!/bin/sh
echo "builddep $*" >> .calls
echo "No matching package to install: 'python3-nonexistent'" >&2
exit 1
"#;

/// A project checkout (`src/`) plus a `bin/` of fake tools outside it.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Project working directory
    pub work_dir: PathBuf,
    /// Fake tool directory
    pub bin_dir: PathBuf,
}

impl TestEnv {
    /// Create a project with a spec file and working fake tools.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");

        let work_dir = base.join("src");
        let bin_dir = base.join("bin");
        fs::create_dir_all(&work_dir).expect("Failed to create work dir");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");
        fs::write(work_dir.join("foo.spec"), "Name: foo\nBuildRequires: python3\n")
            .expect("Failed to write spec file");

        let env = Self {
            _temp_dir: temp_dir,
            work_dir,
            bin_dir,
        };
        write_script(&env.work_dir.join("autogen.sh"), AUTOGEN_OK);
        env.tool("make", MAKE_OK);
        env.tool("rpmbuild", RPMBUILD_OK);
        env.tool("builddep", BUILDDEP_OK);
        env
    }

    /// Write (or replace) a fake tool in `bin/`.
    pub fn tool(&self, name: &str, script: &str) -> PathBuf {
        let path = self.bin_dir.join(name);
        write_script(&path, script);
        path
    }

    /// A fake interpreter binary in `bin/`.
    pub fn interpreter(&self) -> PathBuf {
        self.tool("python3", "#!/bin/sh\n")
    }

    /// Config for project `foo` wired to the fake tools.
    ///
    /// The interpreter candidate points at a missing file unless
    /// `interpreter` is given.
    pub fn config(&self, interpreter: Option<&Path>) -> Config {
        let missing = self.bin_dir.join("no-such-python");
        let interp = interpreter.unwrap_or(&missing);
        let vars: HashMap<String, String> = [
            ("RELBUILD_PROJECT", "foo".to_string()),
            ("RELBUILD_MAKE", self.bin_dir.join("make").display().to_string()),
            ("RELBUILD_RPMBUILD", self.bin_dir.join("rpmbuild").display().to_string()),
            ("BUILDDEP_TOOL", self.bin_dir.join("builddep").display().to_string()),
            ("RELBUILD_INTERPRETER", interp.display().to_string()),
            ("RELBUILD_INTERPRETER_VAR", INTERP_VAR.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Config::from_vars(&self.work_dir, &vars)
    }

    /// Lines the fake tools appended to `.calls`, in order.
    pub fn calls(&self) -> Vec<String> {
        read_lines(&self.work_dir.join(".calls"))
    }

    /// Lines the fake tools appended to `.interp`.
    pub fn interp_log(&self) -> Vec<String> {
        read_lines(&self.work_dir.join(".interp"))
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Write an executable shell script.
pub fn write_script(path: &Path, content: &str) {
    fs::write(path, content).expect("Failed to write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to set permissions");
}

/// Create an empty file, with parents.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, b"").expect("Failed to create file");
}

/// Sorted file names directly in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.expect("bad entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
