//! Macro-generated test suite for `Repository<Buyer>` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod support;
//!
//! use support::*;
//!
//! repository_tests!(InMemoryRepository::<Buyer>::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_create_and_get`: create then retrieve
//! - `test_get_nonexistent`: unknown ID returns None
//! - `test_list_empty`: empty repository lists nothing
//! - `test_list_keeps_insertion_order`: list order equals creation order
//! - `test_update_existing`: update is visible in get and list
//! - `test_update_nonexistent`: unknown ID is an error
//! - `test_delete_existing`: deleted entity is gone
//! - `test_delete_nonexistent`: unknown ID is an error
//! - `test_invalid_entity_rejected`: validation runs on create
//! - `test_concurrent_access`: parallel creates from spawned tasks

/// Generate a `Repository<Buyer>` conformance test suite.
///
/// `$factory` is re-evaluated for each test. For the concurrent access test
/// the repository must also be `Clone + 'static`.
macro_rules! repository_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use boi::prelude::*;

            #[tokio::test]
            async fn test_create_and_get() {
                let repo = $factory;
                let created = repo.create(buyer("Carlos Mendes")).await.unwrap();

                let fetched = repo.get(&created.id).await.unwrap().unwrap();
                assert_eq!(fetched, created);
                assert_eq!(Buyer::entity_type(), "buyer");
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let repo = $factory;
                assert!(repo.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let repo = $factory;
                assert!(repo.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_keeps_insertion_order() {
                let repo = $factory;
                for name in ["Carlos Mendes", "Ana Paula", "Bruno Lima"] {
                    repo.create(buyer(name)).await.unwrap();
                }

                let names: Vec<String> =
                    repo.list().await.unwrap().iter().map(|b| b.name.clone()).collect();
                assert_eq!(names, vec!["Carlos Mendes", "Ana Paula", "Bruno Lima"]);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let repo = $factory;
                let mut created = repo.create(buyer("Carlos Mendes")).await.unwrap();

                created.city = "Anápolis".to_string();
                repo.update(&created.id, created.clone()).await.unwrap();

                let fetched = repo.get(&created.id).await.unwrap().unwrap();
                assert_eq!(fetched.city, "Anápolis");
                assert_eq!(repo.list().await.unwrap()[0].city, "Anápolis");
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let repo = $factory;
                let stranger = buyer("Carlos Mendes");
                let err = repo.update(&stranger.id, stranger.clone()).await.unwrap_err();
                assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let repo = $factory;
                let created = repo.create(buyer("Carlos Mendes")).await.unwrap();

                repo.delete(&created.id).await.unwrap();
                assert!(repo.get(&created.id).await.unwrap().is_none());
                assert!(repo.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let repo = $factory;
                let err = repo.delete(&Uuid::new_v4()).await.unwrap_err();
                assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_invalid_entity_rejected() {
                let repo = $factory;
                let mut invalid = buyer("Carlos Mendes");
                invalid.document = "000.000.000-00".to_string();

                let err = repo.create(invalid).await.unwrap_err();
                match err {
                    BoiError::Validation(e) => assert!(e.has_field("document")),
                    other => panic!("expected a validation error, got {other:?}"),
                }
            }

            #[tokio::test]
            async fn test_concurrent_access() {
                let repo = $factory;
                let mut handles = Vec::new();
                for i in 0..10 {
                    let repo = repo.clone();
                    handles.push(tokio::spawn(async move {
                        repo.create(buyer(&format!("Comprador {i}"))).await.unwrap();
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }
                assert_eq!(repo.list().await.unwrap().len(), 10);
            }
        }
    };
}
