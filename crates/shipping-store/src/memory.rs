// crates/shipping-store/src/memory.rs
//
// In-memory consignment repository implementing the `ConsignmentRepository` trait.
//
// A single append-only Vec guarded by a reader/writer lock. Creates serialize
// on the write guard; reads share the read guard and take an owned copy, so a
// reader always sees the sequence as it was between two complete appends.
// Nothing is persisted; the contents live as long as the process.

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use async_trait::async_trait;

use shipping_core::consignment::Consignment;
use shipping_core::error::ShippingError;
use shipping_core::traits::ConsignmentRepository;

/// Append-only in-memory consignment store.
#[derive(Debug, Default)]
pub struct InMemoryConsignmentRepository {
    consignments: RwLock<Vec<Consignment>>,
}

impl InMemoryConsignmentRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            consignments: RwLock::new(Vec::new()),
        }
    }

    /// Create a repository pre-populated with the given consignments, in order.
    pub fn with_consignments(consignments: Vec<Consignment>) -> Self {
        Self {
            consignments: RwLock::new(consignments),
        }
    }

    /// Return the number of consignments currently stored.
    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    /// Return whether the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned lock still holds a valid prefix: the only mutation is a
    // single push, which either completed or did not happen.
    fn read_guard(&self) -> RwLockReadGuard<'_, Vec<Consignment>> {
        self.consignments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ConsignmentRepository for InMemoryConsignmentRepository {
    async fn create(&self, consignment: Consignment) -> Result<Consignment, ShippingError> {
        let mut store = self
            .consignments
            .write()
            .map_err(|e| ShippingError::StorageWrite(format!("RwLock poisoned: {}", e)))?;
        store.push(consignment.clone());
        tracing::debug!(total = store.len(), "Consignment appended");
        Ok(consignment)
    }

    async fn get_all(&self) -> Vec<Consignment> {
        self.read_guard().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    fn consignment(id: &str) -> Consignment {
        Consignment {
            id: id.to_string(),
            description: format!("cargo {}", id),
            weight: 100,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fresh_repository_is_empty() {
        let repo = InMemoryConsignmentRepository::new();
        assert!(repo.get_all().await.is_empty());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_record_unchanged() {
        let repo = InMemoryConsignmentRepository::new();
        let input = consignment("x1");
        let created = repo.create(input.clone()).await.unwrap();
        assert_eq!(created, input);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_sequential_creates_preserve_order() {
        let repo = InMemoryConsignmentRepository::new();
        repo.create(consignment("a")).await.unwrap();
        repo.create(consignment("b")).await.unwrap();

        let ids: Vec<String> = repo.get_all().await.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_duplicate_records_are_both_kept() {
        let repo = InMemoryConsignmentRepository::new();
        repo.create(consignment("same")).await.unwrap();
        repo.create(consignment("same")).await.unwrap();
        assert_eq!(repo.get_all().await.len(), 2);
    }

    #[tokio::test]
    async fn test_reads_without_writes_are_identical() {
        let repo = InMemoryConsignmentRepository::with_consignments(vec![
            consignment("a"),
            consignment("b"),
        ]);
        let first = repo.get_all().await;
        let second = repo.get_all().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_returned_snapshot_is_detached() {
        let repo = InMemoryConsignmentRepository::new();
        repo.create(consignment("a")).await.unwrap();

        let mut snapshot = repo.get_all().await;
        snapshot.clear();

        assert_eq!(repo.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_lose_nothing() {
        let repo = Arc::new(InMemoryConsignmentRepository::new());
        let n = 200;

        let mut handles = Vec::with_capacity(n);
        for i in 0..n {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.create(consignment(&format!("c{}", i))).await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let all = repo.get_all().await;
        assert_eq!(all.len(), n);
        let unique: HashSet<String> = all.into_iter().map(|c| c.id).collect();
        assert_eq!(unique.len(), n);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_readers_only_see_prefixes() {
        let repo = Arc::new(InMemoryConsignmentRepository::new());

        let writer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for i in 0..100 {
                    repo.create(consignment(&format!("w{}", i))).await.unwrap();
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let repo = repo.clone();
            readers.push(tokio::spawn(async move {
                let mut snapshots = Vec::new();
                for _ in 0..50 {
                    snapshots.push(repo.get_all().await);
                    tokio::task::yield_now().await;
                }
                snapshots
            }));
        }

        writer.await.unwrap();
        let final_state = repo.get_all().await;

        for r in readers {
            for snap in r.await.unwrap() {
                assert!(snap.len() <= final_state.len());
                assert_eq!(snap.as_slice(), &final_state[..snap.len()]);
            }
        }
    }

    #[tokio::test]
    async fn test_poisoned_lock_fails_create_but_not_reads() {
        let repo = Arc::new(InMemoryConsignmentRepository::with_consignments(vec![
            consignment("kept"),
        ]));

        let poisoner = repo.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.consignments.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = repo.create(consignment("rejected")).await.unwrap_err();
        assert!(matches!(err, ShippingError::StorageWrite(_)));

        let all = repo.get_all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "kept");
    }
}
