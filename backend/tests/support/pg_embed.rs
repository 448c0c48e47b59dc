//! Embedded PostgreSQL for the Diesel adapter suites.
//!
//! Every suite in a test binary shares one cluster. Each test receives its own
//! database cloned from a template that already carries the embedded
//! migrations, so suites never see each other's rows.
//!
//! Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start; tests then skip
//! with a marker instead of failing.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use bug_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use rstest::fixture;
use tokio::runtime::Runtime;
use uuid::Uuid;

const TEMPLATE_PREFIX: &str = "bug_tracker_template";
const PROVISION_RETRIES: usize = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// A migrated scratch database, its pool and the runtime that drives it.
pub struct TestDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn skip_requested() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Keep the cluster password stable so binaries reusing the data directory
/// can still authenticate.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        #[allow(
            unsafe_code,
            reason = "edition 2024 requires unsafe for set_var in test setup"
        )]
        // SAFETY: runs before the cluster bootstrap spawns threads and the
        // template lock serialises callers within this process.
        unsafe {
            std::env::set_var("PG_PASSWORD", "bug_tracker_embedded_test");
        }
    }
}

fn template_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_PREFIX}_{short}"))
}

fn ensure_template(cluster: &ClusterHandle, runtime: &Runtime) -> Result<String, String> {
    let name = template_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());
    let exists = cluster
        .database_exists(name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&name);
        runtime
            .block_on(run_pending_migrations(&url))
            .map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(name)
}

fn clone_template(
    cluster: &ClusterHandle,
    runtime: &Runtime,
) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::from("no attempt made");
    for attempt in 1..=PROVISION_RETRIES {
        let cloned = ensure_template(cluster, runtime).and_then(|template| {
            let name = format!("test_{}", Uuid::new_v4().simple());
            cluster
                .temporary_database_from_template(name.as_str(), template.as_str())
                .map_err(|err| format!("clone template: {err:?}"))
        });
        match cloned {
            Ok(database) => return Ok(database),
            Err(error) => last_error = format!("attempt {attempt}/{PROVISION_RETRIES}: {error}"),
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(RETRY_DELAY);
        }
    }
    Err(last_error)
}

fn provision() -> Result<TestDatabase, String> {
    ensure_stable_password();
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}"))?;
    let database = clone_template(cluster, &runtime)?;
    let config = PoolConfig::new(database.url().to_string())
        .with_max_size(4)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;
    Ok(TestDatabase {
        runtime,
        pool,
        _database: database,
    })
}

/// Fresh database per test, or `None` when skipping is requested.
#[fixture]
pub fn database() -> Option<TestDatabase> {
    match provision() {
        Ok(database) => Some(database),
        Err(reason) if skip_requested() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            None
        }
        Err(reason) => {
            panic!("test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    }
}
