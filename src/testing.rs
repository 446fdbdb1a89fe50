//! In-memory port fakes shared by the unit tests.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::cassette::config::CassetteConfig;
use crate::context::ServiceContext;
use chrono::{DateTime, Utc};

use crate::ports::{
    Clock, CreateFuture, CreatedSandbox, DirListing, FileSystem, IdGenerator, LoginHandshake,
    PortError, Prompt, ResolveFuture, SandboxApi, SandboxApiError, SandboxDraft, ShellExecutor,
    ShellOutput, VersionResolver,
};

/// In-memory filesystem. Parent directories are created implicitly.
#[derive(Default)]
pub struct MemFs {
    tree: Mutex<MemTree>,
}

#[derive(Default)]
struct MemTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
    unlistable: BTreeSet<PathBuf>,
    symlinks: BTreeSet<PathBuf>,
    rejected: BTreeMap<PathBuf, Vec<String>>,
}

impl MemTree {
    fn add_parents(&mut self, path: &Path) {
        for parent in path.ancestors().skip(1) {
            if parent.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(parent.to_path_buf());
        }
    }

    fn add_dir(&mut self, path: &str) {
        self.add_parents(Path::new(path));
        self.dirs.insert(PathBuf::from(path));
    }
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(self, path: &str, contents: &str) -> Self {
        self.bytes(path, contents.as_bytes())
    }

    pub fn bytes(self, path: &str, contents: &[u8]) -> Self {
        {
            let mut tree = self.tree.lock().unwrap();
            tree.add_parents(Path::new(path));
            tree.files.insert(PathBuf::from(path), contents.to_vec());
        }
        self
    }

    pub fn dir(self, path: &str) -> Self {
        self.tree.lock().unwrap().add_dir(path);
        self
    }

    /// A file that is listed but fails to read.
    pub fn unreadable(self, path: &str) -> Self {
        let fs = self.bytes(path, b"");
        fs.tree.lock().unwrap().unreadable.insert(PathBuf::from(path));
        fs
    }

    /// A directory that exists but cannot be listed.
    pub fn unlistable(self, path: &str) -> Self {
        {
            let mut tree = self.tree.lock().unwrap();
            tree.add_dir(path);
            tree.unlistable.insert(PathBuf::from(path));
        }
        self
    }

    /// A symbolic link that resolves to a directory.
    pub fn symlinked_dir(self, path: &str) -> Self {
        {
            let mut tree = self.tree.lock().unwrap();
            tree.add_dir(path);
            tree.symlinks.insert(PathBuf::from(path));
        }
        self
    }

    /// An entry of `dir` whose name is not valid UTF-8, as the live
    /// filesystem reports it.
    pub fn rejected_name(self, dir: &str, lossy_name: &str) -> Self {
        {
            let mut tree = self.tree.lock().unwrap();
            tree.add_dir(dir);
            tree.rejected.entry(PathBuf::from(dir)).or_default().push(lossy_name.to_string());
        }
        self
    }
}

impl FileSystem for MemFs {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(String::from_utf8(self.read(path)?)?)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        let tree = self.tree.lock().unwrap();
        if tree.unreadable.contains(path) {
            return Err("permission denied".into());
        }
        tree.files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let mut tree = self.tree.lock().unwrap();
        tree.add_parents(path);
        tree.files.insert(path.to_path_buf(), contents.as_bytes().to_vec());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), PortError> {
        self.tree.lock().unwrap().files.remove(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let tree = self.tree.lock().unwrap();
        tree.files.contains_key(path) || tree.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.tree.lock().unwrap().dirs.contains(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.tree.lock().unwrap().symlinks.contains(path)
    }

    fn list_dir(&self, path: &Path) -> Result<DirListing, PortError> {
        let tree = self.tree.lock().unwrap();
        if !tree.dirs.contains(path) {
            return Err(format!("Not a directory: {}", path.display()).into());
        }
        if tree.unlistable.contains(path) {
            return Err(format!("cannot list {}", path.display()).into());
        }
        let names: BTreeSet<String> = tree
            .files
            .keys()
            .chain(tree.dirs.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        Ok(DirListing {
            names: names.into_iter().collect(),
            rejected: tree.rejected.get(path).cloned().unwrap_or_default(),
        })
    }
}

/// Hands out `<prefix>1`, `<prefix>2`, ...
pub struct SequenceIds {
    prefix: String,
    next: Mutex<usize>,
}

impl SequenceIds {
    pub fn new(prefix: &str) -> Self {
        Self { prefix: prefix.to_string(), next: Mutex::new(0) }
    }
}

impl IdGenerator for SequenceIds {
    fn generate_id(&self) -> String {
        let mut next = self.next.lock().unwrap();
        *next += 1;
        format!("{}{next}", self.prefix)
    }
}

/// Resolves from a fixed table, or resolves everything to one version.
pub struct TableResolver {
    table: BTreeMap<String, String>,
    fallback: Option<String>,
}

impl TableResolver {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            table: pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
            fallback: None,
        }
    }

    pub fn any(version: &str) -> Self {
        Self { table: BTreeMap::new(), fallback: Some(version.to_string()) }
    }
}

impl VersionResolver for TableResolver {
    fn resolve(&self, name: &str, range: &str) -> ResolveFuture<'_> {
        let answer: Result<String, PortError> = self
            .table
            .get(name)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| format!("no version of {name} matches {range}").into());
        Box::pin(async move { answer })
    }
}

/// Answers confirmations from a script and remembers the questions asked.
#[derive(Clone, Default)]
pub struct ScriptedPrompt {
    answers: Arc<Mutex<VecDeque<bool>>>,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.iter().copied().collect())),
            asked: Arc::default(),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, question: &str, _default: bool) -> Result<bool, PortError> {
        self.asked.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| format!("unexpected question: {question}").into())
    }
}

/// Sandbox API that records uploads and answers with a fixed result.
#[derive(Clone)]
pub struct FakeSandbox {
    result: Result<CreatedSandbox, SandboxApiError>,
    calls: Arc<Mutex<Vec<(SandboxDraft, String)>>>,
}

impl FakeSandbox {
    pub fn returning(id: &str) -> Self {
        Self { result: Ok(CreatedSandbox { id: id.to_string() }), calls: Arc::default() }
    }

    pub fn failing(message: &str, validation: &[&str]) -> Self {
        Self {
            result: Err(SandboxApiError {
                message: message.to_string(),
                validation: validation.iter().map(|v| (*v).to_string()).collect(),
            }),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(SandboxDraft, String)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl SandboxApi for FakeSandbox {
    fn create_sandbox(&self, draft: &SandboxDraft, token: &str) -> CreateFuture<'_> {
        self.calls.lock().unwrap().push((draft.clone(), token.to_string()));
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}

/// A clock stuck at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(rfc3339: &str) -> Self {
        Self(DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Shell that succeeds without running anything and remembers the commands.
#[derive(Clone, Default)]
pub struct FakeShell {
    commands: Arc<Mutex<Vec<String>>>,
}

impl FakeShell {
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl ShellExecutor for FakeShell {
    fn run(&self, command: &str) -> Result<ShellOutput, PortError> {
        self.commands.lock().unwrap().push(command.to_string());
        Ok(ShellOutput { exit_code: 0, stdout: String::new(), stderr: String::new() })
    }
}

/// Handshake that "listens" on a fixed port and delivers a canned message.
pub struct FakeHandshake {
    pub port: u16,
    pub body: String,
}

impl LoginHandshake for FakeHandshake {
    fn receive_credentials(
        &self,
        on_listening: &mut dyn FnMut(u16) -> Result<(), String>,
    ) -> Result<String, PortError> {
        on_listening(self.port)?;
        Ok(self.body.clone())
    }
}

/// A context whose ingestion ports are the given fakes; every other port panics.
pub fn test_context(
    fs: MemFs,
    resolver: TableResolver,
    prompt: ScriptedPrompt,
) -> ServiceContext {
    let mut ctx = ServiceContext::replaying_from(&CassetteConfig::panic_on_unspecified())
        .expect("panic config should always succeed");
    ctx.fs = Box::new(fs);
    ctx.id_gen = Box::new(SequenceIds::new("id"));
    ctx.registry = Box::new(resolver);
    ctx.prompt = Box::new(prompt);
    ctx
}
