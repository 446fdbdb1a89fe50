//! Maps a source directory onto flat directory and module records.

use std::collections::HashSet;
use std::path::Path;

use super::error::IngestError;
use super::model::{DirectoryRecord, FileError, ModuleRecord};
use crate::ports::{DirListing, FileSystem, IdGenerator};

/// Title of the module generated from the HTML entry point.
pub const INDEX_MODULE_TITLE: &str = "index.html";

/// How many bytes are inspected for NUL when sniffing binary content.
const BINARY_SNIFF_LEN: usize = 8000;

const LINKED_DIRECTORY: &str = "Symbolic links to directories are not supported";
const UNREPRESENTABLE_NAME: &str = "File names must be valid UTF-8";

/// Fresh attempts before falling back to a suffixed identifier.
const MAX_ID_ATTEMPTS: usize = 16;

/// Directory and module records produced by a walk, plus the files left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeMapping {
    /// Directory records in pre-order.
    pub directories: Vec<DirectoryRecord>,
    /// Module records in pre-order, the generated index module first.
    pub modules: Vec<ModuleRecord>,
    /// Files that could not be mapped.
    pub errors: Vec<FileError>,
}

/// Walks `root` and maps every directory and file beneath it.
///
/// A root-level `index.html` module holding `index_body` is injected ahead
/// of the walked files. Files that cannot be read or are not text, names
/// that are not UTF-8 and symbolic links to directories are recorded in
/// [`TreeMapping::errors`] and skipped.
///
/// # Errors
///
/// Returns [`IngestError::SourceTree`] if `root` cannot be listed as a directory.
pub fn map_tree(
    fs: &dyn FileSystem,
    id_gen: &dyn IdGenerator,
    root: &Path,
    index_body: &str,
) -> Result<TreeMapping, IngestError> {
    if !fs.is_dir(root) {
        return Err(IngestError::SourceTree {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }
    let listing = fs.list_dir(root).map_err(|e| IngestError::SourceTree {
        path: root.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut walker =
        TreeWalker { fs, ids: IdAllocator::new(id_gen), mapping: TreeMapping::default() };

    let index_id = walker.ids.allocate();
    walker.mapping.modules.push(ModuleRecord {
        id: index_id,
        title: INDEX_MODULE_TITLE.to_string(),
        content: index_body.to_string(),
        directory_id: None,
    });

    walker.visit_entries(root, &listing, None);
    Ok(walker.mapping)
}

struct TreeWalker<'a> {
    fs: &'a dyn FileSystem,
    ids: IdAllocator<'a>,
    mapping: TreeMapping,
}

impl TreeWalker<'_> {
    fn visit_entries(&mut self, dir: &Path, listing: &DirListing, parent_id: Option<&str>) {
        for name in &listing.names {
            let path = dir.join(name);

            if self.fs.is_dir(&path) {
                // Linked directories are never entered, so the walk cannot cycle.
                if self.fs.is_symlink(&path) {
                    self.mapping.errors.push(FileError::new(path, LINKED_DIRECTORY));
                } else {
                    self.visit_directory(&path, name, parent_id);
                }
                continue;
            }

            if parent_id.is_none() && name == INDEX_MODULE_TITLE {
                self.mapping.errors.push(FileError::new(
                    path,
                    "Conflicts with the index.html generated from public/index.html",
                ));
                continue;
            }

            match self.read_text(&path) {
                Ok(content) => {
                    let id = self.ids.allocate();
                    self.mapping.modules.push(ModuleRecord {
                        id,
                        title: name.clone(),
                        content,
                        directory_id: parent_id.map(str::to_string),
                    });
                }
                Err(message) => self.mapping.errors.push(FileError::new(path, message)),
            }
        }

        for name in &listing.rejected {
            self.mapping.errors.push(FileError::new(dir.join(name), UNREPRESENTABLE_NAME));
        }
    }

    fn visit_directory(&mut self, path: &Path, name: &str, parent_id: Option<&str>) {
        let id = self.ids.allocate();
        self.mapping.directories.push(DirectoryRecord {
            id: id.clone(),
            title: name.to_string(),
            parent_id: parent_id.map(str::to_string),
        });

        match self.fs.list_dir(path) {
            Ok(children) => self.visit_entries(path, &children, Some(&id)),
            Err(e) => self
                .mapping
                .errors
                .push(FileError::new(path, format!("Could not read directory: {e}"))),
        }
    }

    fn read_text(&self, path: &Path) -> Result<String, String> {
        let bytes = self.fs.read(path).map_err(|e| format!("Could not read file: {e}"))?;
        let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
        if sniff.contains(&0) {
            return Err("Binary files are not supported".to_string());
        }
        String::from_utf8(bytes).map_err(|_| "Binary files are not supported".to_string())
    }
}

/// Hands out identifiers from an [`IdGenerator`] that are unique within one walk.
struct IdAllocator<'a> {
    generator: &'a dyn IdGenerator,
    issued: HashSet<String>,
}

impl<'a> IdAllocator<'a> {
    fn new(generator: &'a dyn IdGenerator) -> Self {
        Self { generator, issued: HashSet::new() }
    }

    fn allocate(&mut self) -> String {
        let mut candidate = String::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            candidate = self.generator.generate_id();
            if !candidate.is_empty() && self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }

        // The generator keeps repeating itself; derive a unique id from its last answer.
        let base = if candidate.is_empty() { "id".to_string() } else { candidate };
        let mut suffix = self.issued.len();
        loop {
            let id = format!("{base}-{suffix}");
            if self.issued.insert(id.clone()) {
                return id;
            }
            suffix += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemFs, SequenceIds};
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Always answers with the same identifier.
    struct StuckIds;

    impl IdGenerator for StuckIds {
        fn generate_id(&self) -> String {
            "same".to_string()
        }
    }

    fn ids() -> SequenceIds {
        SequenceIds::new("id")
    }

    fn sample_tree() -> MemFs {
        MemFs::new()
            .file("/app/src/index.js", "import './styles.css';")
            .file("/app/src/styles.css", "body {}")
            .file("/app/src/components/App.js", "export default () => null;")
            .file("/app/src/components/ui/Button.js", "export const Button = 1;")
            .file("/app/src/utils/math.js", "export const add = (a, b) => a + b;")
            .dir("/app/src/empty")
    }

    fn assert_well_formed(mapping: &TreeMapping) {
        let dir_ids: HashMap<&str, Option<&str>> = mapping
            .directories
            .iter()
            .map(|d| (d.id.as_str(), d.parent_id.as_deref()))
            .collect();

        let mut all_ids = HashSet::new();
        let dir_and_module_ids =
            mapping.directories.iter().map(|d| &d.id).chain(mapping.modules.iter().map(|m| &m.id));
        for id in dir_and_module_ids {
            assert!(all_ids.insert(id.clone()), "duplicate id {id}");
        }

        for module in &mapping.modules {
            if let Some(dir) = &module.directory_id {
                assert!(dir_ids.contains_key(dir.as_str()), "dangling directory id {dir}");
            }
        }

        for dir in &mapping.directories {
            let mut seen = HashSet::new();
            let mut cursor = dir.parent_id.as_deref();
            while let Some(parent) = cursor {
                assert!(seen.insert(parent), "cycle through {parent}");
                cursor = *dir_ids.get(parent).expect("dangling parent id");
            }
        }
    }

    #[test]
    fn maps_nested_tree_with_parent_links() {
        let mapping =
            map_tree(&sample_tree(), &ids(), Path::new("/app/src"), "<div></div>").unwrap();

        let dir_titles: Vec<&str> = mapping.directories.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(dir_titles, vec!["components", "ui", "empty", "utils"]);

        let module_titles: Vec<&str> = mapping.modules.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(
            module_titles,
            vec!["index.html", "App.js", "Button.js", "index.js", "styles.css", "math.js"]
        );

        let components = &mapping.directories[0];
        let ui = &mapping.directories[1];
        assert_eq!(components.parent_id, None);
        assert_eq!(ui.parent_id.as_deref(), Some(components.id.as_str()));

        let button = mapping.modules.iter().find(|m| m.title == "Button.js").unwrap();
        assert_eq!(button.directory_id.as_deref(), Some(ui.id.as_str()));
        let index_js = mapping.modules.iter().find(|m| m.title == "index.js").unwrap();
        assert_eq!(index_js.directory_id, None);

        assert!(mapping.errors.is_empty());
        assert_well_formed(&mapping);
    }

    #[test]
    fn injects_index_module_with_html_body() {
        let tree = MemFs::new().dir("/app/src");
        let mapping = map_tree(&tree, &ids(), Path::new("/app/src"), "<p>hi</p>").unwrap();

        assert_eq!(mapping.modules.len(), 1);
        assert_eq!(mapping.modules[0].title, INDEX_MODULE_TITLE);
        assert_eq!(mapping.modules[0].content, "<p>hi</p>");
        assert_eq!(mapping.modules[0].directory_id, None);
    }

    #[test]
    fn one_unreadable_file_yields_one_error() {
        let tree = MemFs::new()
            .file("/app/src/a.js", "a")
            .unreadable("/app/src/b.js")
            .file("/app/src/lib/c.js", "c")
            .file("/app/src/lib/d.js", "d");

        let mapping = map_tree(&tree, &ids(), Path::new("/app/src"), "").unwrap();

        // Three readable files plus the generated index.
        assert_eq!(mapping.modules.len(), 4);
        assert_eq!(mapping.errors.len(), 1);
        assert_eq!(mapping.errors[0].path, PathBuf::from("/app/src/b.js"));
        assert!(mapping.errors[0].message.contains("permission denied"));
    }

    #[test]
    fn binary_files_are_rejected() {
        let tree = MemFs::new()
            .bytes("/app/src/logo.png", &[0x89, b'P', b'N', b'G', 0, 0, 1])
            .bytes("/app/src/latin1.txt", &[0xE9, b't', b'e'])
            .file("/app/src/ok.js", "const café = 1;");

        let mapping = map_tree(&tree, &ids(), Path::new("/app/src"), "").unwrap();

        let titles: Vec<&str> = mapping.modules.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["index.html", "ok.js"]);
        assert_eq!(mapping.errors.len(), 2);
        assert!(mapping.errors.iter().all(|e| e.message == "Binary files are not supported"));
    }

    #[test]
    fn non_utf8_name_is_reported_and_siblings_are_kept() {
        let tree = MemFs::new()
            .file("/app/src/good.js", "ok")
            .rejected_name("/app/src", "bad\u{FFFD}.js")
            .file("/app/src/lib/util.js", "ok")
            .rejected_name("/app/src/lib", "w\u{FFFD}rd.css");

        let mapping = map_tree(&tree, &ids(), Path::new("/app/src"), "").unwrap();

        let titles: Vec<&str> = mapping.modules.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["index.html", "good.js", "util.js"]);
        let paths: Vec<&Path> = mapping.errors.iter().map(|e| e.path.as_path()).collect();
        assert_eq!(
            paths,
            vec![Path::new("/app/src/lib/w\u{FFFD}rd.css"), Path::new("/app/src/bad\u{FFFD}.js")]
        );
        assert!(mapping.errors.iter().all(|e| e.message == UNREPRESENTABLE_NAME));
    }

    #[test]
    fn symlinked_directories_are_not_followed() {
        let tree = MemFs::new()
            .file("/app/src/lib/a.js", "a")
            .symlinked_dir("/app/src/lib/loop")
            .file("/app/src/lib/loop/a.js", "a");

        let mapping = map_tree(&tree, &ids(), Path::new("/app/src"), "").unwrap();

        assert_eq!(mapping.directories.len(), 1);
        assert_eq!(mapping.modules.len(), 2);
        assert_eq!(mapping.errors.len(), 1);
        assert_eq!(mapping.errors[0].path, PathBuf::from("/app/src/lib/loop"));
        assert_eq!(mapping.errors[0].message, LINKED_DIRECTORY);
    }

    #[cfg(unix)]
    #[test]
    fn live_symlink_loop_terminates() {
        use crate::adapters::live::LiveFileSystem;

        let root = std::env::temp_dir().join("sandship_tree_symlink_loop");
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("lib")).unwrap();
        std::fs::write(root.join("lib/a.js"), "a").unwrap();
        std::os::unix::fs::symlink(&root, root.join("lib/loop")).unwrap();

        let mapping = map_tree(&LiveFileSystem, &ids(), &root, "").unwrap();

        assert_eq!(mapping.directories.len(), 1);
        assert_eq!(mapping.modules.len(), 2);
        assert_eq!(mapping.errors.len(), 1);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn root_index_html_conflicts_with_generated_index() {
        let tree = MemFs::new()
            .file("/app/src/index.html", "<p>shadow</p>")
            .file("/app/src/pages/index.html", "<p>nested</p>");

        let mapping = map_tree(&tree, &ids(), Path::new("/app/src"), "<p>real</p>").unwrap();

        let root_index: Vec<&ModuleRecord> =
            mapping.modules.iter().filter(|m| m.directory_id.is_none()).collect();
        assert_eq!(root_index.len(), 1);
        assert_eq!(root_index[0].content, "<p>real</p>");
        assert_eq!(mapping.modules.len(), 2);
        assert_eq!(mapping.errors.len(), 1);
        assert_eq!(mapping.errors[0].path, PathBuf::from("/app/src/index.html"));
    }

    #[test]
    fn unlistable_subdirectory_is_reported_and_walk_continues() {
        let tree = MemFs::new().unlistable("/app/src/locked").file("/app/src/z.js", "z");

        let mapping = map_tree(&tree, &ids(), Path::new("/app/src"), "").unwrap();

        assert_eq!(mapping.directories.len(), 1);
        assert_eq!(mapping.errors.len(), 1);
        assert!(mapping.errors[0].message.starts_with("Could not read directory"));
        assert!(mapping.modules.iter().any(|m| m.title == "z.js"));
        assert_well_formed(&mapping);
    }

    #[test]
    fn missing_root_is_fatal() {
        let tree = MemFs::new().dir("/app/src");
        let err = map_tree(&tree, &ids(), Path::new("/app/nope"), "").unwrap_err();
        assert!(matches!(err, IngestError::SourceTree { .. }));
    }

    #[test]
    fn colliding_generator_still_yields_unique_ids() {
        let mapping = map_tree(&sample_tree(), &StuckIds, Path::new("/app/src"), "").unwrap();

        assert_eq!(mapping.modules.len(), 6);
        assert_eq!(mapping.directories.len(), 4);
        assert_well_formed(&mapping);
    }

    #[test]
    fn allocator_skips_empty_ids() {
        struct EmptyIds;
        impl IdGenerator for EmptyIds {
            fn generate_id(&self) -> String {
                String::new()
            }
        }

        let mut ids = IdAllocator::new(&EmptyIds);
        let first = ids.allocate();
        let second = ids.allocate();
        assert!(!first.is_empty());
        assert_ne!(first, second);
    }
}
