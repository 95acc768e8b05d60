//! Injectable, process-lifetime reference store.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use gridcast_core::ProjectId;

use crate::records::{
    Dataset, ForecastFilter, ForecastHistoryEntry, MaterialSummary, NewProject, ProcurementOrder, Project,
    Supplier,
};
use crate::seed;
use crate::stats::DashboardStats;

/// In-memory dataset used when the remote service is unavailable.
///
/// Read-mostly; the only mutation is fallback-create, which appends a project.
/// Derived values are never cached.
#[derive(Debug, Default)]
pub struct ReferenceStore {
    inner: RwLock<Dataset>,
}

impl ReferenceStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            inner: RwLock::new(dataset),
        }
    }

    /// Store preloaded with the bundled reference dataset.
    pub fn seeded() -> Self {
        Self::new(seed::dataset())
    }

    fn data(&self) -> RwLockReadGuard<'_, Dataset> {
        // Writers never leave the dataset half-updated, so a poisoned lock is still readable.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn data_mut(&self) -> RwLockWriteGuard<'_, Dataset> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Owned copy of the current dataset.
    pub fn snapshot(&self) -> Dataset {
        self.data().clone()
    }

    pub fn project_count(&self) -> usize {
        self.data().projects.len()
    }

    pub fn find_project(&self, id: &ProjectId) -> Option<Project> {
        self.data().projects.iter().find(|p| &p.id == id).cloned()
    }

    /// Project listing; every record is marked fully fulfilled.
    pub fn projects(&self) -> Vec<Project> {
        self.data()
            .projects
            .iter()
            .cloned()
            .map(|mut p| {
                p.fulfillment = Some(100.0);
                p
            })
            .collect()
    }

    /// Append a project with a freshly issued local id.
    ///
    /// The id is derived from the project count while the write lock is held,
    /// so interleaved creates never observe the same count.
    pub fn create_project(&self, new: NewProject) -> Project {
        let mut data = self.data_mut();
        let id = next_local_id(&data);
        let project = Project::from_new(id, new);
        data.projects.push(project.clone());
        tracing::info!(project_id = %project.id, total = data.projects.len(), "project appended to local store");
        project
    }

    /// Materials joined with their inventory lines.
    pub fn materials_summary(&self) -> Vec<MaterialSummary> {
        let data = self.data();
        data.materials
            .iter()
            .map(|m| {
                let stock = data.inventory.iter().find(|i| i.material_id == m.id);
                MaterialSummary::join(m, stock)
            })
            .collect()
    }

    pub fn forecast_history(&self, filter: &ForecastFilter) -> Vec<ForecastHistoryEntry> {
        self.data()
            .forecasts
            .iter()
            .map(ForecastHistoryEntry::from)
            .filter(|e| filter.matches(e))
            .collect()
    }

    pub fn suppliers(&self) -> Vec<Supplier> {
        self.data().suppliers.clone()
    }

    pub fn procurement_orders(&self) -> Vec<ProcurementOrder> {
        self.data().procurement.clone()
    }

    /// Dashboard stats derived from the current dataset.
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::derive(&self.data(), Utc::now())
    }
}

/// `PRJ{count + 1}`, skipping forward past any id already taken.
fn next_local_id(data: &Dataset) -> ProjectId {
    let mut ordinal = data.projects.len() + 1;
    loop {
        let candidate = ProjectId::sequenced(ordinal);
        if !data.projects.iter().any(|p| p.id == candidate) {
            return candidate;
        }
        ordinal += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ForecastRecord, ProjectStatus};
    use gridcast_core::ForecastId;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn two_projects() -> ReferenceStore {
        let dataset = Dataset {
            projects: vec![
                Project::from_new(ProjectId::sequenced(1), NewProject::new("A", 100.0)),
                Project::from_new(ProjectId::sequenced(2), NewProject::new("B", 200.0)),
            ],
            ..Dataset::default()
        };
        ReferenceStore::new(dataset)
    }

    #[test]
    fn create_appends_with_next_sequence_id() {
        let store = two_projects();
        let created = store.create_project(NewProject::new("X", 500.0));

        assert_eq!(created.id.as_str(), "PRJ003");
        assert_eq!(created.name, "X");
        assert_eq!(created.budget, 500.0);
        assert_eq!(created.status, ProjectStatus::Planning);
        assert_eq!(created.completion, Some(0.0));
        assert_eq!(store.project_count(), 3);
        assert_eq!(store.find_project(&created.id), Some(created));
    }

    #[test]
    fn create_skips_ids_already_taken() {
        let dataset = Dataset {
            projects: vec![Project::from_new(ProjectId::sequenced(2), NewProject::new("B", 1.0))],
            ..Dataset::default()
        };
        let store = ReferenceStore::new(dataset);
        assert_eq!(store.create_project(NewProject::new("C", 1.0)).id.as_str(), "PRJ003");
        assert_eq!(store.create_project(NewProject::new("D", 1.0)).id.as_str(), "PRJ004");
    }

    #[test]
    fn concurrent_creates_issue_distinct_ids() {
        let store = Arc::new(ReferenceStore::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.create_project(NewProject::new(format!("P{i}"), 1.0)).id)
            })
            .collect();

        let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        assert_eq!(store.project_count(), 8);
    }

    #[test]
    fn stats_reflect_just_created_projects() {
        let store = two_projects();
        assert_eq!(store.dashboard_stats().total_projects, 2);
        store.create_project(NewProject::new("X", 500.0));
        let stats = store.dashboard_stats();
        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.total_budget, 800.0);
    }

    #[test]
    fn listings_mark_fulfillment() {
        let store = two_projects();
        assert!(store.projects().iter().all(|p| p.fulfillment == Some(100.0)));
        assert!(store.snapshot().projects.iter().all(|p| p.fulfillment.is_none()));
    }

    #[test]
    fn history_applies_filters() {
        let record = |id: &str, name: &str, status: &str| ForecastRecord {
            id: ForecastId::new(id),
            project_id: None,
            project_name: name.into(),
            estimated_cost: 10.0,
            actual_cost: None,
            accuracy: None,
            status: Some(status.into()),
            created_at: None,
        };
        let store = ReferenceStore::new(Dataset {
            forecasts: vec![record("F1", "A", "Active"), record("F2", "B", "Completed")],
            ..Dataset::default()
        });

        assert_eq!(store.forecast_history(&ForecastFilter::default()).len(), 2);
        let only_b = store.forecast_history(&ForecastFilter {
            project_name: Some("B".into()),
            status: None,
        });
        assert_eq!(only_b.len(), 1);
        assert_eq!(only_b[0].status.as_deref(), Some("Completed"));
    }

    #[test]
    fn seeded_store_is_internally_consistent() {
        let store = ReferenceStore::seeded();
        let data = store.snapshot();
        assert!(!data.materials.is_empty());
        for line in &data.inventory {
            assert!(data.materials.iter().any(|m| m.id == line.material_id));
        }
        let summary = store.materials_summary();
        assert_eq!(summary.len(), data.materials.len());
        assert!(summary.iter().all(|s| s.alert_level.is_some()));
        assert_eq!(store.dashboard_stats().total_projects as usize, data.projects.len());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: N sequential creates yield N distinct, increasing ids.
        #[test]
        fn sequential_creates_are_monotonic(seeded in 0usize..5, n in 1usize..30) {
            let dataset = Dataset {
                projects: (1..=seeded)
                    .map(|i| Project::from_new(ProjectId::sequenced(i), NewProject::new("s", 0.0)))
                    .collect(),
                ..Dataset::default()
            };
            let store = ReferenceStore::new(dataset);

            let ordinals: Vec<usize> = (0..n)
                .map(|i| store.create_project(NewProject::new(format!("n{i}"), 0.0)).id.local_ordinal().unwrap())
                .collect();

            prop_assert!(ordinals.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(ordinals[0], seeded + 1);
            prop_assert_eq!(store.project_count(), seeded + n);
        }
    }
}
