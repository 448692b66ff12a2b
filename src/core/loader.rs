//! Asset loading — runs independent loads concurrently and opens a
//! readiness gate once every one of them has succeeded.

use rustc_hash::FxHashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use thiserror::Error;
use tokio::sync::watch;

use crate::core::config::{ConfigError, ShellConfig};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type LoadFuture<T> = Pin<Box<dyn Future<Output = Result<T, LoadError>> + Send>>;

/// Read-only view of whether loading has finished.
///
/// Stays unready for good if any load fails.
#[derive(Debug, Clone)]
pub struct Readiness(watch::Receiver<bool>);

impl Readiness {
    pub fn is_ready(&self) -> bool {
        *self.0.borrow()
    }

    /// Wait until ready. Returns `false` if the loader finished without
    /// becoming ready.
    pub async fn wait(&mut self) -> bool {
        self.0.wait_for(|ready| *ready).await.is_ok()
    }
}

/// Successfully loaded items, by name.
#[derive(Debug)]
pub struct Resources<T> {
    items: FxHashMap<String, T>,
}

impl<T> Resources<T> {
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.get(name)
    }

    /// Remove and return an item.
    pub fn take(&mut self, name: &str) -> Option<T> {
        self.items.remove(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Collects named load operations and runs them together.
pub struct ResourceLoader<T> {
    jobs: Vec<(String, LoadFuture<T>)>,
    ready: watch::Sender<bool>,
}

impl<T: Send + 'static> Default for ResourceLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> ResourceLoader<T> {
    pub fn new() -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            ready,
        }
    }

    /// Register a load whose result will be stored under `name`.
    pub fn load_to<F>(&mut self, name: &str, load: F) -> &mut Self
    where
        F: Future<Output = Result<T, LoadError>> + Send + 'static,
    {
        self.jobs.push((name.to_string(), Box::pin(load)));
        self
    }

    pub fn readiness(&self) -> Readiness {
        Readiness(self.ready.subscribe())
    }

    /// Run every registered load concurrently.
    ///
    /// `on_error` is called once per failed item. Resolves to the loaded
    /// items only if all of them succeeded, and opens the readiness gate
    /// at the same moment.
    pub async fn start<F>(self, mut on_error: F) -> Option<Resources<T>>
    where
        F: FnMut(&str, &LoadError),
    {
        let total = self.jobs.len();
        // Spawned up front so every load runs concurrently; the handles keep
        // their names so a panicked task is still reported against its item.
        let handles: Vec<_> = self
            .jobs
            .into_iter()
            .map(|(name, load)| (name, tokio::spawn(load)))
            .collect();

        let mut items = FxHashMap::default();
        let mut failed = 0usize;
        for (name, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_err) => Err(LoadError::Task(join_err)),
            };
            match result {
                Ok(value) => {
                    tracing::debug!("loaded '{}'", name);
                    items.insert(name, value);
                }
                Err(err) => {
                    failed += 1;
                    on_error(&name, &err);
                }
            }
        }

        if failed > 0 {
            tracing::warn!("{} of {} loads failed; staying unready", failed, total);
            return None;
        }

        tracing::info!("all {} loads finished", total);
        self.ready.send_replace(true);
        Some(Resources { items })
    }

    /// [`ResourceLoader::start`] with failures logged at error level.
    pub async fn start_logged(self) -> Option<Resources<T>> {
        self.start(|name, err| {
            tracing::error!("encountered an error when attempting to load {}: {}", name, err)
        })
        .await
    }
}

/// Read a text asset as lines.
pub async fn load_lines(path: impl AsRef<Path>) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(contents.lines().map(str::to_string).collect())
}

/// Read a RON shell config.
pub async fn load_config(path: impl AsRef<Path>) -> Result<ShellConfig, LoadError> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(ShellConfig::parse_ron(&contents)?)
}
