//! The directory arena and its path index.
//!
//! [`DirectoryTree`] owns every live [`Directory`] in a `BTreeMap` keyed by
//! [`DirId`], plus a `BTreeMap` from absolute path to id. Parent/child links
//! are ids, and each directory's path is a label that rename rewrites. The
//! tree performs no journaling; [`crate::Namespace`] layers that on top.
//!
//! Invariants, checked by [`DirectoryTree::consistency_violations`]:
//!
//! 1. The index and the arena hold the same set of directories, and
//!    `arena[index[p]].path == p` for every indexed `p`.
//! 2. Every non-root directory's parent is live, lists it as a child, and
//!    carries the path derived from the child's path.
//! 3. The root is always present at `/` with [`DirId::ROOT`].

use std::collections::BTreeMap;

use fsim_types::{
    join, parent_path, rebase, validate_absolute, validate_file_name, DirId, Directory, File,
    Listing, ROOT,
};

use crate::error::{NamespaceError, NamespaceResult};

#[derive(Debug, Clone)]
pub struct DirectoryTree {
    nodes: BTreeMap<DirId, Directory>,
    index: BTreeMap<String, DirId>,
    next_id: DirId,
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryTree {
    /// Create a tree holding only the root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        let mut index = BTreeMap::new();
        nodes.insert(DirId::ROOT, Directory::root());
        index.insert(ROOT.to_string(), DirId::ROOT);
        Self {
            nodes,
            index,
            next_id: DirId::ROOT.next(),
        }
    }

    /// Number of live directories, root included.
    pub fn dir_count(&self) -> usize {
        self.index.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn id_of(&self, path: &str) -> Option<DirId> {
        self.index.get(path).copied()
    }

    pub fn get(&self, path: &str) -> Option<&Directory> {
        self.id_of(path).and_then(|id| self.nodes.get(&id))
    }

    /// All live paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Paths of the immediate children of `path`, in insertion order.
    pub fn children_of(&self, path: &str) -> NamespaceResult<Vec<&str>> {
        let dir = self.get(path).ok_or_else(|| NamespaceError::not_found(path))?;
        Ok(dir
            .subdirectories()
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .map(Directory::path)
            .collect())
    }

    fn resolve(&self, path: &str) -> NamespaceResult<DirId> {
        self.id_of(path).ok_or_else(|| NamespaceError::not_found(path))
    }

    fn dir_mut(&mut self, path: &str) -> NamespaceResult<&mut Directory> {
        let id = self.resolve(path)?;
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| NamespaceError::not_found(path))
    }

    /// `id` and all of its descendants, parents before children.
    fn subtree(&self, id: DirId) -> Vec<DirId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(dir) = self.nodes.get(&next) {
                stack.extend(dir.subdirectories().iter().rev().copied());
            }
        }
        out
    }

    // ---------------------------------------------------------------
    // Directory operations
    // ---------------------------------------------------------------

    /// Create an empty directory at `path` under its derived parent.
    pub fn create_dir(&mut self, path: &str) -> NamespaceResult<DirId> {
        validate_absolute(path)?;
        if self.contains(path) {
            return Err(NamespaceError::already_exists(path));
        }

        let parent = parent_path(path);
        let parent_id = self.resolve(parent)?;

        let id = self.next_id;
        self.next_id = id.next();
        self.nodes.insert(id, Directory::new(path, Some(parent_id)));
        self.index.insert(path.to_string(), id);
        self.dir_mut(parent)?.add_subdirectory(id);
        Ok(id)
    }

    /// Remove the directory at `path` together with all its descendants.
    ///
    /// Returns the removed paths, `path` first. A malformed `path` can never
    /// be live, so it reports `NotFound`.
    pub fn remove_dir(&mut self, path: &str) -> NamespaceResult<Vec<String>> {
        if path == ROOT {
            return Err(NamespaceError::RootImmutable);
        }
        let id = self.resolve(path)?;
        let doomed = self.subtree(id);

        let parent = self.nodes.get(&id).and_then(Directory::parent);
        if let Some(parent) = parent.and_then(|pid| self.nodes.get_mut(&pid)) {
            parent.remove_subdirectory(id);
        }

        let mut removed = Vec::with_capacity(doomed.len());
        for did in doomed {
            if let Some(dir) = self.nodes.remove(&did) {
                let dir_path = dir.path().to_string();
                self.index.remove(&dir_path);
                removed.push(dir_path);
            }
        }
        Ok(removed)
    }

    /// Re-key the directory at `old` (and every descendant) to `new`.
    ///
    /// Only the last component may change: the directory stays under the
    /// parent it already has, so `new` must derive the same parent path as
    /// `old`. The directory is detached and re-attached, which moves it to
    /// the end of its parent's child order.
    ///
    /// Returns the number of re-keyed directories. A missing `old` reports
    /// `NotFound` before `new` is looked at.
    pub fn rename_dir(&mut self, old: &str, new: &str) -> NamespaceResult<usize> {
        if old == ROOT {
            return Err(NamespaceError::RootImmutable);
        }
        let id = self.resolve(old)?;
        validate_absolute(new)?;
        if old == new {
            return Ok(0);
        }
        if self.contains(new) {
            return Err(NamespaceError::already_exists(new));
        }
        let parent = parent_path(old);
        if parent_path(new) != parent {
            return Err(NamespaceError::CrossParentRename {
                from: old.to_string(),
                to: new.to_string(),
                parent: parent.to_string(),
            });
        }

        let parent_dir = self.dir_mut(parent)?;
        parent_dir.remove_subdirectory(id);
        parent_dir.add_subdirectory(id);

        let mut rekeyed = 0;
        for did in self.subtree(id) {
            let Some(dir) = self.nodes.get_mut(&did) else {
                continue;
            };
            let Some(rebased) = rebase(dir.path(), old, new) else {
                continue;
            };
            self.index.remove(dir.path());
            dir.set_path(rebased.clone());
            self.index.insert(rebased, did);
            rekeyed += 1;
        }
        Ok(rekeyed)
    }

    /// Contents of the directory at `path`.
    pub fn listing(&self, path: &str) -> NamespaceResult<Listing> {
        let dir = self.get(path).ok_or_else(|| NamespaceError::not_found(path))?;
        Ok(Listing {
            path: dir.path().to_string(),
            subdirectories: self
                .children_of(path)?
                .into_iter()
                .map(str::to_string)
                .collect(),
            files: dir.files().iter().map(|f| f.name().to_string()).collect(),
        })
    }

    // ---------------------------------------------------------------
    // File operations
    // ---------------------------------------------------------------

    /// Add a new empty file named `name` to the directory at `dir`.
    pub fn create_file(&mut self, dir: &str, name: &str) -> NamespaceResult<()> {
        let target = self.dir_mut(dir)?;
        validate_file_name(name)?;
        if target.file(name).is_some() {
            return Err(NamespaceError::already_exists(join(dir, name)));
        }
        target.add_file(File::new(name));
        Ok(())
    }

    /// Remove the file `name` from `dir`. Returns `false` if it was absent.
    pub fn delete_file(&mut self, dir: &str, name: &str) -> NamespaceResult<bool> {
        Ok(self.dir_mut(dir)?.remove_file(name).is_some())
    }

    /// Rename `old` to `new` within `dir`. Returns `false` if `old` was absent.
    pub fn rename_file(&mut self, dir: &str, old: &str, new: &str) -> NamespaceResult<bool> {
        let target = self.dir_mut(dir)?;
        if target.file(old).is_none() {
            return Ok(false);
        }
        if old == new {
            return Ok(true);
        }
        validate_file_name(new)?;
        if target.file(new).is_some() {
            return Err(NamespaceError::already_exists(join(dir, new)));
        }
        Ok(target.rename_file(old, new))
    }

    /// Duplicate the file `name` from `src` into `dst` as a new file.
    pub fn copy_file(&mut self, src: &str, dst: &str, name: &str) -> NamespaceResult<()> {
        let src_dir = self.get(src).ok_or_else(|| NamespaceError::not_found(src))?;
        let dst_dir = self.get(dst).ok_or_else(|| NamespaceError::not_found(dst))?;

        let copy = src_dir
            .file(name)
            .map(|f| File::new(f.name()))
            .ok_or_else(|| NamespaceError::FileNotFound {
                dir: src.to_string(),
                name: name.to_string(),
            })?;
        if dst_dir.file(name).is_some() {
            return Err(NamespaceError::already_exists(join(dst, name)));
        }

        self.dir_mut(dst)?.add_file(copy);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Integrity
    // ---------------------------------------------------------------

    /// Describe every broken invariant. Empty when the tree is consistent.
    pub fn consistency_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.id_of(ROOT) != Some(DirId::ROOT) {
            problems.push("root is not indexed at '/'".to_string());
        }
        if self.nodes.len() != self.index.len() {
            problems.push(format!(
                "arena holds {} directories but index holds {}",
                self.nodes.len(),
                self.index.len()
            ));
        }

        for (path, id) in &self.index {
            match self.nodes.get(id) {
                Some(dir) if dir.path() == path => {}
                Some(dir) => problems.push(format!(
                    "index {path} points at {id} labelled {}",
                    dir.path()
                )),
                None => problems.push(format!("index {path} points at missing {id}")),
            }
        }

        for (id, dir) in &self.nodes {
            for child in dir.subdirectories() {
                match self.nodes.get(child) {
                    Some(c) if c.parent() == Some(*id) => {}
                    Some(c) => problems.push(format!(
                        "{} lists child {} whose parent is {:?}",
                        dir.path(),
                        c.path(),
                        c.parent()
                    )),
                    None => problems.push(format!("{} lists missing child {child}", dir.path())),
                }
            }

            if id.is_root() {
                continue;
            }
            let Some(pid) = dir.parent() else {
                problems.push(format!("{} has no parent", dir.path()));
                continue;
            };
            match self.nodes.get(&pid) {
                Some(parent) => {
                    if !parent.has_subdirectory(*id) {
                        problems.push(format!(
                            "{} is not listed by its parent {}",
                            dir.path(),
                            parent.path()
                        ));
                    }
                    if parent.path() != parent_path(dir.path()) {
                        problems.push(format!(
                            "{} sits under {} but derives parent {}",
                            dir.path(),
                            parent.path(),
                            parent_path(dir.path())
                        ));
                    }
                }
                None => problems.push(format!("{} has missing parent {pid}", dir.path())),
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tree_with(paths: &[&str]) -> DirectoryTree {
        let mut tree = DirectoryTree::new();
        for path in paths {
            tree.create_dir(path).unwrap();
        }
        tree
    }

    fn assert_consistent(tree: &DirectoryTree) {
        let problems = tree.consistency_violations();
        assert!(problems.is_empty(), "inconsistent tree: {problems:#?}");
    }

    #[test]
    fn new_tree_has_only_root() {
        let tree = DirectoryTree::new();
        assert_eq!(tree.dir_count(), 1);
        assert!(tree.contains("/"));
        assert_consistent(&tree);
    }

    #[test]
    fn create_attaches_to_derived_parent() {
        let tree = tree_with(&["/a", "/a/b"]);
        assert_eq!(tree.children_of("/").unwrap(), vec!["/a"]);
        assert_eq!(tree.children_of("/a").unwrap(), vec!["/a/b"]);
        let b = tree.get("/a/b").unwrap();
        assert_eq!(b.parent(), tree.id_of("/a"));
        assert_consistent(&tree);
    }

    #[test]
    fn create_without_parent_is_not_found() {
        let mut tree = DirectoryTree::new();
        let err = tree.create_dir("/missing/child").unwrap_err();
        assert!(matches!(err, NamespaceError::NotFound { ref path } if path == "/missing"));
        assert_eq!(tree.dir_count(), 1);
    }

    #[test]
    fn create_existing_is_rejected() {
        let mut tree = tree_with(&["/a"]);
        assert!(matches!(
            tree.create_dir("/a"),
            Err(NamespaceError::AlreadyExists { .. })
        ));
        assert!(matches!(
            tree.create_dir("/"),
            Err(NamespaceError::AlreadyExists { .. })
        ));
        assert_eq!(tree.children_of("/").unwrap().len(), 1);
    }

    #[test]
    fn create_invalid_path() {
        let mut tree = DirectoryTree::new();
        assert!(matches!(
            tree.create_dir("relative"),
            Err(NamespaceError::Invalid(_))
        ));
    }

    #[test]
    fn remove_is_recursive() {
        let mut tree = tree_with(&["/a", "/a/b", "/a/b/c", "/d"]);
        let removed = tree.remove_dir("/a").unwrap();
        assert_eq!(removed, vec!["/a", "/a/b", "/a/b/c"]);
        assert!(!tree.contains("/a/b"));
        assert!(!tree.contains("/a/b/c"));
        assert_eq!(tree.children_of("/").unwrap(), vec!["/d"]);
        assert_consistent(&tree);
    }

    #[test]
    fn remove_missing_leaves_tree_unchanged() {
        let mut tree = tree_with(&["/a"]);
        let before: Vec<String> = tree.paths().map(str::to_string).collect();
        assert!(tree.remove_dir("/nope").unwrap_err().is_not_found());
        let after: Vec<String> = tree.paths().map(str::to_string).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn malformed_paths_are_not_found_for_remove_and_rename() {
        let mut tree = tree_with(&["/a", "/a/b"]);
        for path in ["/a/", "relative", "/a//b", ""] {
            assert!(
                tree.remove_dir(path).unwrap_err().is_not_found(),
                "remove {path:?}"
            );
        }
        assert!(tree.rename_dir("/ghost", "bad").unwrap_err().is_not_found());
        assert!(tree.rename_dir("/a/", "/c").unwrap_err().is_not_found());
        assert_eq!(tree.dir_count(), 3);
        assert_consistent(&tree);
    }

    #[test]
    fn rename_live_dir_to_malformed_path_is_invalid() {
        let mut tree = tree_with(&["/a"]);
        assert!(matches!(
            tree.rename_dir("/a", "bad"),
            Err(NamespaceError::Invalid(_))
        ));
        assert!(matches!(
            tree.rename_dir("/a", "/b/"),
            Err(NamespaceError::Invalid(_))
        ));
        assert!(tree.contains("/a"));
    }

    #[test]
    fn root_cannot_be_removed_or_renamed() {
        let mut tree = DirectoryTree::new();
        assert!(matches!(tree.remove_dir("/"), Err(NamespaceError::RootImmutable)));
        assert!(matches!(
            tree.rename_dir("/", "/x"),
            Err(NamespaceError::RootImmutable)
        ));
    }

    #[test]
    fn rename_rekeys_descendants() {
        let mut tree = tree_with(&["/a", "/a/b", "/a/b/c"]);
        tree.create_file("/a/b", "x.txt").unwrap();

        let rekeyed = tree.rename_dir("/a", "/z").unwrap();
        assert_eq!(rekeyed, 3);
        assert!(!tree.contains("/a"));
        assert!(!tree.contains("/a/b"));
        assert!(tree.contains("/z/b/c"));
        assert_eq!(tree.listing("/z/b").unwrap().files, vec!["x.txt"]);
        assert_consistent(&tree);
    }

    #[test]
    fn rename_keeps_id_and_moves_to_end() {
        let mut tree = tree_with(&["/a", "/b"]);
        let id = tree.id_of("/a").unwrap();
        tree.rename_dir("/a", "/c").unwrap();
        assert_eq!(tree.id_of("/c"), Some(id));
        assert_eq!(tree.children_of("/").unwrap(), vec!["/b", "/c"]);
    }

    #[test]
    fn rename_does_not_touch_siblings_with_shared_prefix() {
        let mut tree = tree_with(&["/a", "/ab"]);
        tree.rename_dir("/a", "/z").unwrap();
        assert!(tree.contains("/ab"));
        assert_consistent(&tree);
    }

    #[test]
    fn rename_onto_existing_is_rejected() {
        let mut tree = tree_with(&["/a", "/b"]);
        assert!(matches!(
            tree.rename_dir("/a", "/b"),
            Err(NamespaceError::AlreadyExists { .. })
        ));
        assert!(tree.contains("/a"));
    }

    #[test]
    fn rename_across_parents_is_rejected() {
        let mut tree = tree_with(&["/a", "/a/b", "/c"]);
        let err = tree.rename_dir("/a/b", "/c/b").unwrap_err();
        assert!(matches!(err, NamespaceError::CrossParentRename { .. }));
        assert!(tree.contains("/a/b"));
        assert_consistent(&tree);
    }

    #[test]
    fn rename_to_self_is_noop() {
        let mut tree = tree_with(&["/a"]);
        assert_eq!(tree.rename_dir("/a", "/a").unwrap(), 0);
        assert!(tree.contains("/a"));
    }

    #[test]
    fn listing_orders_dirs_then_files() {
        let mut tree = tree_with(&["/a", "/a/d2", "/a/d1"]);
        tree.create_file("/a", "f2").unwrap();
        tree.create_file("/a", "f1").unwrap();
        let listing = tree.listing("/a").unwrap();
        assert_eq!(listing.subdirectories, vec!["/a/d2", "/a/d1"]);
        assert_eq!(listing.files, vec!["f2", "f1"]);
    }

    #[test]
    fn file_lifecycle() {
        let mut tree = tree_with(&["/a"]);
        tree.create_file("/a", "x").unwrap();
        assert!(matches!(
            tree.create_file("/a", "x"),
            Err(NamespaceError::AlreadyExists { ref path }) if path == "/a/x"
        ));
        assert!(tree.rename_file("/a", "x", "y").unwrap());
        assert!(!tree.rename_file("/a", "x", "z").unwrap());
        assert!(tree.delete_file("/a", "y").unwrap());
        assert!(!tree.delete_file("/a", "y").unwrap());
        assert!(tree.get("/a").unwrap().files().is_empty());
    }

    #[test]
    fn rename_file_onto_existing_is_rejected() {
        let mut tree = tree_with(&["/a"]);
        tree.create_file("/a", "x").unwrap();
        tree.create_file("/a", "y").unwrap();
        assert!(matches!(
            tree.rename_file("/a", "x", "y"),
            Err(NamespaceError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn file_ops_on_missing_dir() {
        let mut tree = DirectoryTree::new();
        assert!(tree.create_file("/nope", "x").unwrap_err().is_not_found());
        assert!(tree.delete_file("/nope", "x").unwrap_err().is_not_found());
        assert!(tree.rename_file("/nope", "x", "y").unwrap_err().is_not_found());
    }

    #[test]
    fn copy_creates_independent_file() {
        let mut tree = tree_with(&["/src", "/dst"]);
        tree.create_file("/src", "f").unwrap();
        tree.copy_file("/src", "/dst", "f").unwrap();
        tree.rename_file("/dst", "f", "g").unwrap();

        assert_eq!(tree.listing("/src").unwrap().files, vec!["f"]);
        assert_eq!(tree.listing("/dst").unwrap().files, vec!["g"]);
    }

    #[test]
    fn copy_failures() {
        let mut tree = tree_with(&["/src", "/dst"]);
        assert!(matches!(
            tree.copy_file("/src", "/dst", "f"),
            Err(NamespaceError::FileNotFound { .. })
        ));
        assert!(matches!(
            tree.copy_file("/nope", "/dst", "f"),
            Err(NamespaceError::NotFound { ref path }) if path == "/nope"
        ));
        tree.create_file("/src", "f").unwrap();
        assert!(matches!(
            tree.copy_file("/src", "/nope", "f"),
            Err(NamespaceError::NotFound { ref path }) if path == "/nope"
        ));
        assert!(matches!(
            tree.copy_file("/src", "/src", "f"),
            Err(NamespaceError::AlreadyExists { .. })
        ));
        assert!(tree.listing("/dst").unwrap().files.is_empty());
    }

    #[derive(Clone, Debug)]
    enum Op {
        Create(usize, String),
        Remove(usize),
        Rename(usize, String),
    }

    fn op() -> impl Strategy<Value = Op> {
        let name = "[a-c]{1,2}";
        prop_oneof![
            (0usize..32, name).prop_map(|(i, n)| Op::Create(i, n)),
            (0usize..32).prop_map(Op::Remove),
            (0usize..32, name).prop_map(|(i, n)| Op::Rename(i, n)),
        ]
    }

    proptest! {
        #[test]
        fn random_ops_keep_tree_consistent(ops in proptest::collection::vec(op(), 1..40)) {
            let mut tree = DirectoryTree::new();
            for op in ops {
                let paths: Vec<String> = tree.paths().map(str::to_string).collect();
                let pick = |i: usize| paths[i % paths.len()].clone();
                match op {
                    Op::Create(i, name) => {
                        let path = join(&pick(i), &name);
                        if tree.create_dir(&path).is_ok() {
                            prop_assert!(tree.contains(&path));
                            let parent = parent_path(&path);
                            prop_assert!(tree.children_of(parent).unwrap().contains(&path.as_str()));
                        }
                    }
                    Op::Remove(i) => {
                        let path = pick(i);
                        if tree.remove_dir(&path).is_ok() {
                            prop_assert!(!tree.contains(&path));
                        }
                    }
                    Op::Rename(i, name) => {
                        let old = pick(i);
                        let new = join(parent_path(&old), &name);
                        if tree.rename_dir(&old, &new).is_ok() && old != new {
                            prop_assert!(!tree.contains(&old));
                            prop_assert!(tree.contains(&new));
                        }
                    }
                }
                let problems = tree.consistency_violations();
                prop_assert!(problems.is_empty(), "{:?}", problems);
            }
        }
    }
}
