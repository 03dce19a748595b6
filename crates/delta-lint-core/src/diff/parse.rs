//! Parsers for `git diff` output.

use super::change::{ChangeSet, FileChange};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;

/// Parses `git diff --unified=0` output into a [`ChangeSet`].
///
/// Each `@@ -a[,b] +c[,d] @@` hunk header contributes deleted lines
/// `a-1 .. a-1+b` and added lines `c-1 .. c-1+d` (0-based, omitted count is 1).
/// Hunk bodies are not inspected.
#[must_use]
pub fn parse_unified_diff(output: &str) -> ChangeSet {
    let mut set = ChangeSet::new();
    let mut old_path: Option<PathBuf> = None;
    let mut current: Option<FileChange> = None;
    // Hunk bodies may contain lines that look like file headers.
    let mut in_header = false;

    for line in output.lines() {
        if line.starts_with("diff --git ") {
            if let Some(change) = current.take() {
                set.insert(change);
            }
            old_path = None;
            in_header = true;
        } else if let Some(rest) = line.strip_prefix("--- ").filter(|_| in_header) {
            old_path = header_path(rest, "a/");
        } else if let Some(rest) = line.strip_prefix("+++ ").filter(|_| in_header) {
            current = header_path(rest, "b/")
                .or_else(|| old_path.take())
                .map(FileChange::new);
            in_header = false;
        } else if line.starts_with("@@") {
            let Some(change) = current.as_mut() else {
                continue;
            };
            match parse_hunk_header(line) {
                Some(hunk) => {
                    change.deleted.extend(hunk.old_start..hunk.old_start + hunk.old_len);
                    change.added.extend(hunk.new_start..hunk.new_start + hunk.new_len);
                }
                None => debug!("Ignoring malformed hunk header: {line}"),
            }
        }
    }

    if let Some(change) = current {
        set.insert(change);
    }
    set
}

/// Parses `git diff --name-only` output into a de-duplicated path set.
#[must_use]
pub fn parse_name_only(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// 0-based hunk ranges.
#[derive(Debug, PartialEq, Eq)]
struct Hunk {
    old_start: usize,
    old_len: usize,
    new_start: usize,
    new_len: usize,
}

fn parse_hunk_header(line: &str) -> Option<Hunk> {
    let body = line.strip_prefix("@@ ")?;
    let end = body.find(" @@")?;
    let mut parts = body[..end].split_whitespace();
    let (old_start, old_len) = parse_range(parts.next()?.strip_prefix('-')?)?;
    let (new_start, new_len) = parse_range(parts.next()?.strip_prefix('+')?)?;
    Some(Hunk {
        old_start,
        old_len,
        new_start,
        new_len,
    })
}

fn parse_range(range: &str) -> Option<(usize, usize)> {
    let (start, len) = match range.split_once(',') {
        Some((start, len)) => (start.parse::<usize>().ok()?, len.parse::<usize>().ok()?),
        None => (range.parse::<usize>().ok()?, 1),
    };
    Some((start.saturating_sub(1), len))
}

fn header_path(rest: &str, prefix: &str) -> Option<PathBuf> {
    let raw = rest.split('\t').next().unwrap_or(rest).trim();
    if raw == "/dev/null" {
        return None;
    }
    let raw = raw.trim_matches('"');
    Some(PathBuf::from(raw.strip_prefix(prefix).unwrap_or(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const DIFF: &str = "\
diff --git a/src/Foo.java b/src/Foo.java
index 1111111..2222222 100644
--- a/src/Foo.java
+++ b/src/Foo.java
@@ -3,0 +4,2 @@ public class Foo {
+    int a;
+    int b;
@@ -10 +12 @@ class Foo {
-    old();
+    updated();
diff --git a/src/Gone.java b/src/Gone.java
deleted file mode 100644
--- a/src/Gone.java
+++ /dev/null
@@ -1,2 +0,0 @@
-class Gone {
-}
diff --git a/src/New.java b/src/New.java
new file mode 100644
--- /dev/null
+++ b/src/New.java
@@ -0,0 +1 @@
+class New {}
";

    fn lines(set: &std::collections::BTreeSet<usize>) -> Vec<usize> {
        set.iter().copied().collect()
    }

    #[test]
    fn hunks_become_zero_based_line_sets() {
        let set = parse_unified_diff(DIFF);
        let foo = set.changes_for(Path::new("src/Foo.java")).unwrap();
        assert_eq!(lines(&foo.added), vec![3, 4, 11]);
        assert_eq!(lines(&foo.deleted), vec![9]);
    }

    #[test]
    fn deleted_file_keeps_old_path() {
        let set = parse_unified_diff(DIFF);
        let gone = set.changes_for(Path::new("src/Gone.java")).unwrap();
        assert_eq!(lines(&gone.deleted), vec![0, 1]);
        assert!(gone.added.is_empty());
    }

    #[test]
    fn new_file_has_only_added_lines() {
        let set = parse_unified_diff(DIFF);
        let new = set.changes_for(Path::new("src/New.java")).unwrap();
        assert_eq!(lines(&new.added), vec![0]);
        assert!(new.deleted.is_empty());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn empty_output_is_empty_set() {
        assert!(parse_unified_diff("").is_empty());
    }

    #[test]
    fn hunk_header_forms() {
        assert_eq!(
            parse_hunk_header("@@ -5 +5,3 @@"),
            Some(Hunk {
                old_start: 4,
                old_len: 1,
                new_start: 4,
                new_len: 3,
            })
        );
        assert_eq!(parse_hunk_header("@@ garbage @@"), None);
        assert_eq!(parse_hunk_header("@@ -1 +1"), None);
    }

    #[test]
    fn name_only_drops_blanks_and_duplicates() {
        let names = parse_name_only("src/A.java\n\n  src/B.java \nsrc/A.java\n");
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["src/A.java".to_string(), "src/B.java".to_string()]
        );
    }
}
