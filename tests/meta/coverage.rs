//! Keeps `tests/unit` mirroring `src/` one file per module

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    /// Every `.rs` file and directory under `root`, relative to `root`
    fn walk(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                let relative = path
                    .strip_prefix(root)
                    .map_err(|error| io::Error::other(error.to_string()))?
                    .to_path_buf();
                if path.is_dir() {
                    pending.push(path);
                    found.insert(relative);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    found.insert(relative);
                }
            }
        }
        Ok(found)
    }

    /// Files that only declare modules or start a binary
    fn is_structural(path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name == "mod.rs" || name == "main.rs" || name == "lib.rs")
    }

    fn listing(paths: &[&PathBuf], prefix: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {prefix}/{}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_every_source_file_has_unit_tests() -> io::Result<()> {
        let sources = walk(Path::new(SRC_DIR))?;
        let tests = walk(Path::new(UNIT_DIR))?;

        let missing: Vec<&PathBuf> = sources
            .iter()
            .filter(|path| !is_structural(path) && !tests.contains(*path))
            .collect();

        assert!(
            missing.is_empty(),
            "source files without a unit test counterpart:\n{}",
            listing(&missing, SRC_DIR)
        );
        Ok(())
    }

    #[test]
    fn test_every_unit_test_has_a_source_file() -> io::Result<()> {
        let sources = walk(Path::new(SRC_DIR))?;
        let tests = walk(Path::new(UNIT_DIR))?;

        let orphaned: Vec<&PathBuf> = tests
            .iter()
            .filter(|path| !is_structural(path) && !sources.contains(*path))
            .collect();

        assert!(
            orphaned.is_empty(),
            "unit test files whose source file is gone:\n{}",
            listing(&orphaned, UNIT_DIR)
        );
        Ok(())
    }

    #[test]
    fn test_every_test_file_declares_tests() -> io::Result<()> {
        let root = Path::new("tests");
        let mut empty = Vec::new();

        for relative in walk(root)? {
            let path = root.join(&relative);
            if path.is_dir() || is_structural(&path) {
                continue;
            }
            if !fs::read_to_string(&path)?.contains("#[test]") {
                empty.push(relative);
            }
        }

        let empty: Vec<&PathBuf> = empty.iter().collect();
        assert!(
            empty.is_empty(),
            "test files without any #[test] function:\n{}",
            listing(&empty, "tests")
        );
        Ok(())
    }
}
