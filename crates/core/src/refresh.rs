//! Refresh orchestration across environment scopes.
//!
//! Refreshing an environment also refreshes the global scope, because
//! environment catalogs may inherit from global definitions. The global stage
//! only runs after the environment stage succeeded.

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};

/// The scope holding catalog definitions shared by every environment.
pub const GLOBAL_SCOPE: &str = "global";

/// Errors reported by the synchronization engine.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("sync engine unreachable: {0}")]
    Transport(String),

    #[error("sync engine rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Trigger for the external catalog synchronization engine.
///
/// The engine is responsible for serializing concurrent refreshes of the same
/// scope.
#[async_trait]
pub trait CatalogSync: Send + Sync {
    /// Synchronize catalogs in `scope`. `force` requests a full refresh.
    async fn refresh(&self, scope: &str, force: bool) -> Result<(), SyncError>;
}

/// Force-refresh `scope`, then the global scope unless `scope` is global.
pub async fn refresh_scope(sync: &dyn CatalogSync, scope: &str) -> CoreResult<()> {
    run_stage(sync, scope).await?;
    if scope != GLOBAL_SCOPE {
        run_stage(sync, GLOBAL_SCOPE).await?;
    }
    Ok(())
}

async fn run_stage(sync: &dyn CatalogSync, scope: &str) -> CoreResult<()> {
    tracing::info!(scope, "Refreshing catalogs");
    sync.refresh(scope, true).await.map_err(|err| {
        tracing::warn!(scope, error = %err, "Catalog refresh failed");
        CoreError::Refresh {
            scope: scope.to_string(),
            message: err.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::testing::RecordingSync;

    #[tokio::test]
    async fn environment_refresh_also_refreshes_global() {
        let sync = RecordingSync::new();
        refresh_scope(&sync, "envA").await.unwrap();

        assert_eq!(
            sync.calls(),
            vec![("envA".to_string(), true), ("global".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn global_refresh_runs_once() {
        let sync = RecordingSync::new();
        refresh_scope(&sync, GLOBAL_SCOPE).await.unwrap();

        assert_eq!(sync.scopes(), vec!["global"]);
    }

    #[tokio::test]
    async fn environment_failure_skips_global() {
        let sync = RecordingSync::new();
        sync.fail_scope("envA");

        let err = refresh_scope(&sync, "envA").await.unwrap_err();

        assert_matches!(err, CoreError::Refresh { scope, .. } if scope == "envA");
        assert_eq!(sync.scopes(), vec!["envA"]);
    }

    #[tokio::test]
    async fn global_failure_is_reported() {
        let sync = RecordingSync::new();
        sync.fail_scope(GLOBAL_SCOPE);

        let err = refresh_scope(&sync, "envA").await.unwrap_err();

        assert_matches!(err, CoreError::Refresh { scope, .. } if scope == "global");
        assert_eq!(sync.scopes(), vec!["envA", "global"]);
    }

    #[test]
    fn sync_error_display() {
        let err = SyncError::Rejected {
            status: 409,
            body: "busy".into(),
        };
        assert_eq!(
            err.to_string(),
            "sync engine rejected the request with status 409: busy"
        );
    }
}
