use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MIT: &str = include_str!("../../src/license_audit/templates/mit.txt");
pub const APACHE: &str = include_str!("../../src/license_audit/templates/apache-2.0.txt");
pub const ISC: &str = include_str!("../../src/license_audit/templates/isc.txt");
pub const GPL_3: &str = include_str!("../../src/license_audit/templates/gpl-3.0.txt");
pub const LGPL_2_1: &str = include_str!("../../src/license_audit/templates/lgpl-2.1.txt");

/// License text as found in a real project: a filled-in copyright line
pub fn with_copyright(template: &str, holder: &str) -> String {
    template.replacen(
        "Copyright (c) <year> <copyright holders>",
        &format!("Copyright (c) 2016 {}", holder),
        1,
    )
}

/// On-disk source tree with a standard root next to it
///
/// ```text
/// src/colors/red           MIT, imports fmt
/// src/colors/blue          MIT + Apache-2.0 in one file
/// src/colors/green         no license
/// src/colors/cmd/LICENSE   ISC, shared by the commands below
/// src/colors/cmd/paint     imports colors/red
/// src/colors/cmd/mix       imports colors/red, couleurs/red
/// src/colors/broken        GPL-3.0 in COPYING, imports colors/missing, colors/red
/// src/colors/purple        no license, imports colors/broken
/// src/couleurs/red         LGPL-2.1
/// std/fmt                  standard package
/// ```
pub struct SourceTreeFixture {
    dir: TempDir,
}

impl SourceTreeFixture {
    pub fn colors() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };

        fixture.package("colors/red", &["fmt"]);
        fixture.license("colors/red", "LICENSE", &with_copyright(MIT, "Colors Authors"));

        fixture.package("colors/blue", &[]);
        fixture.license(
            "colors/blue",
            "LICENSE",
            &format!("{}\n\n{}", with_copyright(MIT, "Blue Authors"), APACHE),
        );

        fixture.package("colors/green", &[]);

        fixture.license("colors/cmd", "LICENSE.md", &with_copyright(ISC, "Colors Tools"));
        fixture.package("colors/cmd/paint", &["colors/red"]);
        fixture.package("colors/cmd/mix", &["colors/red", "couleurs/red"]);

        fixture.package("colors/broken", &["colors/missing", "colors/red"]);
        fixture.license("colors/broken", "COPYING", GPL_3);

        fixture.package("colors/purple", &["colors/broken"]);

        fixture.package("couleurs/red", &[]);
        fixture.license("couleurs/red", "LICENSE", LGPL_2_1);

        fixture.standard_package("fmt");
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn src(&self) -> PathBuf {
        self.dir.path().join("src")
    }

    pub fn std(&self) -> PathBuf {
        self.dir.path().join("std")
    }

    pub fn package(&self, id: &str, imports: &[&str]) {
        Self::write_manifest(&self.src().join(id), imports);
    }

    pub fn standard_package(&self, id: &str) {
        Self::write_manifest(&self.std().join(id), &[]);
    }

    pub fn license(&self, id: &str, file_name: &str, text: &str) {
        let dir = self.src().join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), text).unwrap();
    }

    /// Writes a file relative to the fixture root, returning its path
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn write_manifest(dir: &Path, imports: &[&str]) {
        fs::create_dir_all(dir).unwrap();
        let list: Vec<String> = imports.iter().map(|i| format!("\"{}\"", i)).collect();
        fs::write(
            dir.join("package.toml"),
            format!("imports = [{}]\n", list.join(", ")),
        )
        .unwrap();
    }
}
