//! Relative path handling shared by all backends.

use crate::error::{StorageError, StorageResult};

/// Normalizes a container-relative path.
///
/// Backslashes become `/`, empty and `.` segments are dropped. Absolute
/// paths and `..` segments are rejected so a path can never escape its
/// container.
///
/// # Errors
///
/// Returns [`StorageError::InvalidPath`] if the path is absolute, climbs
/// out of the container, or is empty after normalization.
pub fn normalize_relative(path: &str) -> StorageResult<String> {
    let unified = path.replace('\\', "/");
    if unified.starts_with('/') {
        return Err(StorageError::InvalidPath {
            path: path.to_string(),
        });
    }

    let mut segments = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(StorageError::InvalidPath {
                    path: path.to_string(),
                })
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(StorageError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(segments.join("/"))
}

/// Splits a normalized path into `(dirname, basename)`.
///
/// Top-level entries have an empty dirname.
pub(crate) fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_plain_path() {
        assert_eq!(normalize_relative("a/b.jpg").unwrap(), "a/b.jpg");
    }

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize_relative("a//./b\\c.jpg").unwrap(), "a/b/c.jpg");
    }

    #[test]
    fn normalize_rejects_parent_segments() {
        assert!(matches!(
            normalize_relative("a/../../etc/passwd"),
            Err(StorageError::InvalidPath { .. })
        ));
    }

    #[test]
    fn normalize_rejects_absolute() {
        assert!(normalize_relative("/etc/passwd").is_err());
    }

    #[test]
    fn normalize_rejects_empty() {
        assert!(normalize_relative("").is_err());
        assert!(normalize_relative("./").is_err());
    }

    #[test]
    fn split_top_level() {
        assert_eq!(split_path("a.jpg"), ("", "a.jpg"));
    }

    #[test]
    fn split_nested() {
        assert_eq!(split_path("x/y/z.jpg"), ("x/y", "z.jpg"));
    }

    mod properties {
        use crate::path::{normalize_relative, split_path};
        use proptest::prelude::*;

        fn messy_segment() -> impl Strategy<Value = String> {
            prop_oneof![
                4 => "[A-Za-z0-9_.-]{1,8}",
                1 => Just(String::new()),
                1 => Just(".".to_string()),
            ]
        }

        fn messy_path() -> impl Strategy<Value = String> {
            (prop::collection::vec(messy_segment(), 1..6), any::<bool>()).prop_map(
                |(segments, backslash)| segments.join(if backslash { "\\" } else { "/" }),
            )
        }

        proptest! {
            #[test]
            fn normalized_paths_are_clean_and_stable(path in messy_path()) {
                if let Ok(normalized) = normalize_relative(&path) {
                    prop_assert!(!normalized.starts_with('/'));
                    prop_assert!(!normalized.contains('\\'));
                    prop_assert!(normalized
                        .split('/')
                        .all(|s| !s.is_empty() && s != "." && s != ".."));
                    prop_assert_eq!(normalize_relative(&normalized).unwrap(), normalized);
                }
            }

            #[test]
            fn split_rejoins_to_the_path(path in messy_path()) {
                if let Ok(normalized) = normalize_relative(&path) {
                    let (dirname, basename) = split_path(&normalized);
                    prop_assert!(!basename.contains('/'));
                    let joined = if dirname.is_empty() {
                        basename.to_string()
                    } else {
                        format!("{dirname}/{basename}")
                    };
                    prop_assert_eq!(joined, normalized);
                }
            }
        }
    }
}
