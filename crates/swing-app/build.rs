//! Exposes the workspace `VERSION` file to the crate as `SWING_ANALYZER_VERSION`.

use std::path::Path;

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR");
    let workspace_root = Path::new(&manifest_dir)
        .ancestors()
        .nth(2)
        .expect("crate lives under <workspace>/crates/");
    let version_file = workspace_root.join("VERSION");

    println!("cargo:rerun-if-changed={}", version_file.display());

    let contents = std::fs::read_to_string(&version_file)
        .unwrap_or_else(|error| panic!("cannot read {}: {error}", version_file.display()));
    let version = contents.trim();
    if version.is_empty() {
        panic!("{} must contain a version", version_file.display());
    }

    println!("cargo:rustc-env=SWING_ANALYZER_VERSION={version}");
}
