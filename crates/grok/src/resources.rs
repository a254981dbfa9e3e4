//! Access to the resource directories next to a module.
//!
//! Paths are relative to the module and use `/` separators.

use crate::error::{GrokError, GrokErrorExt};
use crate::module::ModuleInfo;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub trait ResourceProvider: std::fmt::Debug + Send + Sync {
    fn resource_exists(&self, module: &ModuleInfo, path: &str) -> bool;

    /// Whether `path` names a directory rather than a single file.
    fn is_directory(&self, module: &ModuleInfo, path: &str) -> bool;

    /// File names directly inside the directory at `path`, sorted.
    ///
    /// # Errors
    /// The directory cannot be read.
    fn list_resources(&self, module: &ModuleInfo, path: &str) -> Result<Vec<String>, GrokError>;

    /// # Errors
    /// The resource cannot be read.
    fn read_resource(&self, module: &ModuleInfo, path: &str) -> Result<Vec<u8>, GrokError>;

    /// Where the resource lives, for diagnostics and directory resources.
    fn location(&self, module: &ModuleInfo, path: &str) -> PathBuf {
        module.directory().map_or_else(|| PathBuf::from(path), |dir| dir.join(path))
    }
}

/// Whether `path` is relative and never climbs out of the module directory.
pub(crate) fn stays_inside(path: &str) -> bool {
    let relative = Path::new(path);
    !path.is_empty()
        && relative.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Resources on the local filesystem, resolved against [`ModuleInfo::directory`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FsResources;

impl FsResources {
    fn resolve(module: &ModuleInfo, path: &str) -> Result<PathBuf, GrokError> {
        if !stays_inside(path) {
            return Err(GrokError::configuration(format!(
                "Resource path '{path}' must stay inside module '{}'",
                module.dotted_name()
            )));
        }

        let directory = module.directory().ok_or_else(|| {
            GrokError::configuration(format!(
                "Module '{}' has no filesystem location",
                module.dotted_name()
            ))
        })?;
        Ok(directory.join(path))
    }
}

impl ResourceProvider for FsResources {
    fn resource_exists(&self, module: &ModuleInfo, path: &str) -> bool {
        Self::resolve(module, path).is_ok_and(|p| p.exists())
    }

    fn is_directory(&self, module: &ModuleInfo, path: &str) -> bool {
        Self::resolve(module, path).is_ok_and(|p| p.is_dir())
    }

    fn list_resources(&self, module: &ModuleInfo, path: &str) -> Result<Vec<String>, GrokError> {
        let directory = Self::resolve(module, path)?;
        let mut names = Vec::new();
        for entry in WalkDir::new(&directory).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from).context(directory.display().to_string())?;
            if entry.file_type().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_resource(&self, module: &ModuleInfo, path: &str) -> Result<Vec<u8>, GrokError> {
        let file = Self::resolve(module, path)?;
        std::fs::read(&file).context(file.display().to_string())
    }
}

/// Resources held in memory, keyed by module dotted name.
#[derive(Debug, Default)]
pub struct MemoryResources {
    files: RwLock<FxHashMap<String, BTreeMap<String, Vec<u8>>>>,
}

impl MemoryResources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, module: impl Into<String>, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.write().entry(module.into()).or_default().insert(path.into(), bytes.into());
    }
}

impl ResourceProvider for MemoryResources {
    fn resource_exists(&self, module: &ModuleInfo, path: &str) -> bool {
        let prefix = format!("{path}/");
        self.files.read().get(module.dotted_name()).is_some_and(|files| {
            files.keys().any(|key| key == path || key.starts_with(&prefix))
        })
    }

    fn is_directory(&self, module: &ModuleInfo, path: &str) -> bool {
        let prefix = format!("{path}/");
        self.files
            .read()
            .get(module.dotted_name())
            .is_some_and(|files| files.keys().any(|key| key.starts_with(&prefix)))
    }

    fn list_resources(&self, module: &ModuleInfo, path: &str) -> Result<Vec<String>, GrokError> {
        let prefix = format!("{path}/");
        let files = self.files.read();
        let names = files
            .get(module.dotted_name())
            .into_iter()
            .flat_map(|files| files.keys())
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_owned)
            .collect();
        Ok(names)
    }

    fn read_resource(&self, module: &ModuleInfo, path: &str) -> Result<Vec<u8>, GrokError> {
        self.files
            .read()
            .get(module.dotted_name())
            .and_then(|files| files.get(path))
            .cloned()
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, path.to_owned()).into()
            })
    }
}
