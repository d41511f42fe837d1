use std::path::{Component, Path, PathBuf};

/// Upper limit of the ancestor walk performed when looking for license files.
///
/// It is the deepest directory shared by every package of a scan, computed
/// component by component so that `/src/color` is not treated as an ancestor
/// of `/src/colors`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchBoundary(PathBuf);

impl SearchBoundary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Longest common ancestor of `dirs`; `None` for an empty set
    pub fn compute<'a, I>(dirs: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut iter = dirs.into_iter();
        let first = iter.next()?;
        let mut prefix: Vec<Component<'a>> = first.components().collect();

        for dir in iter {
            let shared = prefix
                .iter()
                .zip(dir.components())
                .take_while(|(a, b)| *a == b)
                .count();
            prefix.truncate(shared);
        }

        Some(Self(prefix.iter().collect()))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// True when `dir` is the boundary itself or lies below it
    pub fn contains(&self, dir: &Path) -> bool {
        dir.starts_with(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary_of(dirs: &[&str]) -> Option<SearchBoundary> {
        SearchBoundary::compute(dirs.iter().map(Path::new))
    }

    #[test]
    fn test_nested_directories() {
        assert_eq!(
            boundary_of(&["a/b/c", "a/b/c/d"]),
            Some(SearchBoundary::new("a/b/c"))
        );
        assert_eq!(
            boundary_of(&["a/b/c", "a/b/c/d", "a/b/c/d/e"]),
            Some(SearchBoundary::new("a/b/c"))
        );
        assert_eq!(
            boundary_of(&["a/b", "a/b/c/d/f", "a/b/c/d/e"]),
            Some(SearchBoundary::new("a/b"))
        );
    }

    #[test]
    fn test_segment_wise_not_string_prefix() {
        assert_eq!(
            boundary_of(&["/src/colors/red", "/src/color/red"]),
            Some(SearchBoundary::new("/src"))
        );
    }

    #[test]
    fn test_single_directory_is_its_own_boundary() {
        assert_eq!(
            boundary_of(&["/src/colors/green"]),
            Some(SearchBoundary::new("/src/colors/green"))
        );
    }

    #[test]
    fn test_disjoint_absolute_paths_meet_at_root() {
        assert_eq!(
            boundary_of(&["/src/colors", "/opt/couleurs"]),
            Some(SearchBoundary::new("/"))
        );
    }

    #[test]
    fn test_empty_set() {
        assert_eq!(boundary_of(&[]), None);
    }

    #[test]
    fn test_contains() {
        let boundary = SearchBoundary::new("/src/colors");
        assert!(boundary.contains(Path::new("/src/colors")));
        assert!(boundary.contains(Path::new("/src/colors/cmd/paint")));
        assert!(!boundary.contains(Path::new("/src/colorsx")));
        assert!(!boundary.contains(Path::new("/src")));
    }
}
