//! Per-department stage catalogs with single-fetch caching.
//!
//! Stage catalogs are treated as immutable within a session: each department
//! is fetched at most once per registry lifetime and served from cache after
//! that. Concurrent callers for the same department share one request
//! through a per-department gate instead of racing independent fetches.
//!
//! Fetch failures never escape this module as errors: they are recorded,
//! toasted, and answered with an empty catalog so views degrade instead of
//! crashing. Failed departments are not cached, so a later mount retries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, RwLock};

use futures_util::future::join_all;
use log::{debug, warn};
use reqwest::Method;
use tokio::sync::Mutex;

use super::model::Stage;
use crate::api::{parse_list, ApiTransport};
use crate::broadcast::ToastBroadcaster;

const DEPARTMENTS_PATH: &str = "stages/departments";
const STAGES_PATH: &str = "stages";

pub struct StageRegistry {
    transport: Arc<dyn ApiTransport>,
    toasts: ToastBroadcaster,
    catalogs: RwLock<HashMap<String, Arc<[Stage]>>>,
    departments: RwLock<Vec<String>>,
    last_error: StdMutex<Option<String>>,
    // One gate per department; whoever holds it performs the fetch, late
    // acquirers find the cache populated.
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl StageRegistry {
    pub fn new(transport: Arc<dyn ApiTransport>, toasts: ToastBroadcaster) -> Self {
        Self {
            transport,
            toasts,
            catalogs: RwLock::new(HashMap::new()),
            departments: RwLock::new(Vec::new()),
            last_error: StdMutex::new(None),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Fetches the department list.
    ///
    /// On failure the list is cleared to empty and the error is recorded for
    /// display; nothing is thrown past this boundary.
    pub async fn fetch_departments(&self) -> Vec<String> {
        let result = self
            .transport
            .request(Method::GET, DEPARTMENTS_PATH, &[], None)
            .await
            .and_then(|payload| parse_list::<String>(DEPARTMENTS_PATH, payload));

        match result {
            Ok(departments) => {
                *self.departments.write().unwrap_or_else(|e| e.into_inner()) = departments.clone();
                self.record_error(None);
                departments
            }
            Err(e) => {
                warn!("Failed to fetch departments: {}", e);
                self.departments
                    .write()
                    .unwrap_or_else(|e| e.into_inner())
                    .clear();
                self.record_error(Some(e.to_string()));
                self.toasts.error(format!("Failed to load departments: {}", e));
                Vec::new()
            }
        }
    }

    /// Returns the cached department list without a fetch.
    pub fn departments(&self) -> Vec<String> {
        self.departments
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Returns the department's catalog, fetching it on first access.
    ///
    /// The returned slice is the cached value itself; repeated calls for a
    /// cached department hand back the same allocation.
    pub async fn stages_for_department(&self, department: &str) -> Arc<[Stage]> {
        if let Some(cached) = self.cached_stages(department) {
            return cached;
        }

        let gate = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight
                .entry(department.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _guard = gate.lock().await;

        // Whoever held the gate before us may have filled the cache.
        if let Some(cached) = self.cached_stages(department) {
            return cached;
        }

        let query = vec![("department".to_string(), department.to_string())];
        let result = self
            .transport
            .request(Method::GET, STAGES_PATH, &query, None)
            .await
            .and_then(|payload| parse_list::<Stage>(STAGES_PATH, payload));

        match result {
            Ok(mut stages) => {
                // Stable sort: equal orders keep the server-returned order.
                stages.sort_by_key(|s| s.stage_order);
                debug!("Cached {} stages for department '{}'", stages.len(), department);

                let catalog: Arc<[Stage]> = stages.into();
                self.catalogs
                    .write()
                    .unwrap_or_else(|e| e.into_inner())
                    .insert(department.to_string(), catalog.clone());
                catalog
            }
            Err(e) => {
                warn!("Failed to fetch stages for '{}': {}", department, e);
                self.record_error(Some(e.to_string()));
                self.toasts
                    .error(format!("Failed to load stages for {}: {}", department, e));
                Vec::new().into()
            }
        }
    }

    /// Warms every department's catalog. Failures degrade per department.
    pub async fn prefetch_all(&self) {
        let departments = self.fetch_departments().await;
        let fetches = departments
            .iter()
            .map(|department| self.stages_for_department(department));
        join_all(fetches).await;
    }

    /// Cache-only read; `None` until the department has been fetched.
    pub fn cached_stages(&self, department: &str) -> Option<Arc<[Stage]>> {
        self.catalogs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(department)
            .cloned()
    }

    /// Display name for a stage; falls back to the code when not cached.
    pub fn stage_name(&self, department: &str, stage_code: &str) -> String {
        self.lookup(department, stage_code, |stage| {
            Some(stage.stage_name.clone()).filter(|name| !name.is_empty())
        })
        .unwrap_or_else(|| stage_code.to_string())
    }

    /// Terminal flag for a stage; false when not cached.
    pub fn is_terminal(&self, department: &str, stage_code: &str) -> bool {
        self.lookup(department, stage_code, |stage| Some(stage.is_terminal))
            .unwrap_or(false)
    }

    /// Order of a stage; 0 when not cached.
    pub fn stage_order(&self, department: &str, stage_code: &str) -> i32 {
        self.lookup(department, stage_code, |stage| Some(stage.stage_order))
            .unwrap_or(0)
    }

    /// The most recent fetch error, for display next to degraded views.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn lookup<T>(
        &self,
        department: &str,
        stage_code: &str,
        read: impl Fn(&Stage) -> Option<T>,
    ) -> Option<T> {
        let catalogs = self.catalogs.read().unwrap_or_else(|e| e.into_inner());
        catalogs
            .get(department)?
            .iter()
            .find(|stage| stage.stage_code == stage_code)
            .and_then(read)
    }

    fn record_error(&self, error: Option<String>) {
        *self.last_error.lock().unwrap_or_else(|e| e.into_inner()) = error;
    }
}
