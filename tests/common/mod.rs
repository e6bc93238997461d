//! Shared fixtures for integration tests.
//!
//! Provides a fake Java runtime whose `java` and `jarsigner` are shell scripts
//! mimicking apktool and jarsigner closely enough for the pipeline:
//!
//! - `java -jar <builder> b <src> -o <out>` writes `<out>` and appends `build`
//!   to `<src>/.invocations`. A `FAIL_SILENTLY` file in `<src>` makes it log an
//!   apktool-style ` error:` line and exit 0; `FAIL_EXIT` makes it exit 1;
//!   `NO_OUTPUT` makes it exit 0 with clean output and write nothing.
//! - `jarsigner -verbose -keystore <ks> -storepass <pw> -signedjar <out> <in> <alias>`
//!   copies `<in>` to `<out>` and appends `signed-by <alias>`. A password other
//!   than `s3cr3t-storepass` exits 1; alias `partial` writes `<out>` and then exits 1.
//!   Alias `unreadable` succeeds but leaves `<out>` as a symlink to
//!   `/proc/self/mem`, a regular file whose first read fails.
//!
//! Both scripts exit 64 when their argument vector has the wrong shape, so a
//! path split on whitespace fails loudly.
//!
//! The toolchain is written once per test binary. Every test must call
//! [`toolchain`] before spawning anything so no child process can inherit a
//! script file descriptor that is still open for writing.

#![allow(dead_code)]

use signapk::signer::{ToolchainConfig, ToolchainConfigBuilder};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

pub const PASSWORD: &str = "s3cr3t-storepass";
pub const ALIAS: &str = "release";

const JAVA: &str = r#"#!/bin/sh
if [ "$#" -ne 6 ] || [ "$1" != "-jar" ] || [ "$3" != "b" ] || [ "$5" != "-o" ]; then
    echo "unexpected arguments ($#): $*" >&2
    exit 64
fi
src="$4"
out="$6"
echo build >> "$src/.invocations"
echo "I: Using Apktool 2.9.3"
if [ -e "$src/FAIL_SILENTLY" ]; then
    echo "W: $src/res/values/strings.xml:3: error: Invalid resource name"
    echo "I: Building resources..."
    exit 0
fi
if [ -e "$src/NO_OUTPUT" ]; then
    echo "I: nothing to do"
    exit 0
fi
if [ -e "$src/FAIL_EXIT" ]; then
    echo "Exception in thread \"main\" brut.androlib.AndrolibException" >&2
    exit 1
fi
echo "W: could not find sources" >&2
printf 'unsigned %s\n' "$src" > "$out"
echo "I: Built apk into: $out"
"#;

const JARSIGNER: &str = r#"#!/bin/sh
if [ "$#" -ne 9 ] || [ "$1" != "-verbose" ] || [ "$2" != "-keystore" ] || [ "$4" != "-storepass" ] || [ "$6" != "-signedjar" ]; then
    echo "unexpected arguments ($#): $*" >&2
    exit 64
fi
pass="$5"
out="$7"
in="$8"
alias="$9"
if [ "$pass" != "s3cr3t-storepass" ]; then
    echo "jarsigner: java.io.IOException: Keystore was tampered with, or password was incorrect" >&2
    exit 1
fi
if [ "$alias" = "partial" ]; then
    echo "partial" > "$out"
    echo "jarsigner error: java.lang.RuntimeException: disk full"
    exit 1
fi
if [ "$alias" = "unreadable" ]; then
    ln -sf /proc/self/mem "$out"
    echo "jar signed."
    exit 0
fi
cp "$in" "$out"
echo "signed-by $alias" >> "$out"
echo "   adding: META-INF/MANIFEST.MF"
echo "jar signed."
"#;

/// A fake Java runtime, builder archive and keystore.
pub struct FakeToolchain {
    root: TempDir,
}

static TOOLCHAIN: OnceLock<FakeToolchain> = OnceLock::new();

/// Returns the shared fake toolchain, creating it on first use.
pub fn toolchain() -> &'static FakeToolchain {
    TOOLCHAIN.get_or_init(FakeToolchain::create)
}

impl FakeToolchain {
    fn create() -> Self {
        let root = tempfile::tempdir().unwrap();
        let bin = root.path().join("jdk").join("bin");
        fs::create_dir_all(&bin).unwrap();
        write_script(&bin.join("java"), JAVA);
        write_script(&bin.join("jarsigner"), JARSIGNER);
        fs::write(root.path().join("apktool.jar"), b"PK fake apktool").unwrap();
        fs::write(root.path().join("release.jks"), b"fake keystore").unwrap();
        Self { root }
    }

    pub fn runtime_home(&self) -> PathBuf {
        self.root.path().join("jdk")
    }

    pub fn builder_path(&self) -> PathBuf {
        self.root.path().join("apktool.jar")
    }

    pub fn keystore_path(&self) -> PathBuf {
        self.root.path().join("release.jks")
    }

    /// Builder pre-filled with a valid configuration.
    pub fn config_builder(&self) -> ToolchainConfigBuilder {
        ToolchainConfigBuilder::new()
            .runtime_home(self.runtime_home())
            .builder_path(self.builder_path())
            .keystore_path(self.keystore_path())
            .keystore_alias(ALIAS)
            .keystore_password(PASSWORD)
    }

    pub fn config(&self) -> ToolchainConfig {
        self.config_builder().build().unwrap()
    }

    /// Writes a JSON configuration file using the legacy keys.
    pub fn write_config_file(&self, dir: &Path) -> PathBuf {
        let path = dir.join("env.conf");
        let json = serde_json::json!({
            "java_home": self.runtime_home(),
            "apk_tool": self.builder_path(),
            "key_store": self.keystore_path(),
            "store_alias": ALIAS,
            "store_password": PASSWORD,
        });
        fs::write(&path, serde_json::to_vec_pretty(&json).unwrap()).unwrap();
        path
    }
}

/// Creates an unpacked-APK-like directory named `name` under `parent`.
pub fn source_dir(parent: &Path, name: &str) -> PathBuf {
    let dir = parent.join(name);
    fs::create_dir_all(dir.join("res").join("values")).unwrap();
    fs::write(dir.join("AndroidManifest.xml"), "<manifest/>").unwrap();
    fs::write(dir.join("apktool.yml"), "version: 2.9.3\n").unwrap();
    dir
}

/// Number of times the fake builder ran against `source`.
pub fn build_invocations(source: &Path) -> usize {
    fs::read_to_string(source.join(".invocations"))
        .map(|s| s.lines().count())
        .unwrap_or(0)
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
