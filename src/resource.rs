use once_cell::sync::OnceCell;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, warn};

type Loader<T, E> = Box<dyn Fn() -> Result<Arc<T>, E> + Send + Sync>;

/// A read-only value loaded once and shared by every request.
///
/// The loader runs on first access. A failed load is reported to the caller
/// and not remembered, so the next access tries again.
pub struct Resource<T: ?Sized, E> {
    name: &'static str,
    cell: OnceCell<Arc<T>>,
    loader: Loader<T, E>,
}

impl<T: ?Sized, E: Display> Resource<T, E> {
    pub fn new<F>(name: &'static str, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<T>, E> + Send + Sync + 'static,
    {
        Self {
            name,
            cell: OnceCell::new(),
            loader: Box::new(loader),
        }
    }

    /// A resource that is already initialized with `value`.
    pub fn ready(name: &'static str, value: Arc<T>) -> Self
    where
        T: Send + Sync + 'static,
        E: 'static,
    {
        let held = Arc::clone(&value);
        let resource = Self::new(name, move || Ok(Arc::clone(&held)));
        let _ = resource.cell.set(value);
        resource
    }

    pub fn get(&self) -> Result<Arc<T>, E> {
        self.cell
            .get_or_try_init(|| match (self.loader)() {
                Ok(value) => {
                    info!("{} loaded", self.name);
                    Ok(value)
                }
                Err(e) => {
                    warn!("{} failed to load: {}", self.name, e);
                    Err(e)
                }
            })
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
