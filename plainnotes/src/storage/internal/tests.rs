use std::sync::Arc;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use data::validation::{NoteField, Violation};
use time::Duration;
use uuid::Uuid;
use mocks::TestStorageIo;
use fixtures::*;
use super::*;


async fn make_storage(io: TestStorageIo) -> NoteStoreImpl<TestStorageIo> {
    NoteStoreImpl::new_internal(io, RULES).await
        .expect("storage creation failed")
}

#[tokio::test]
async fn create_then_get_returns_same_note() {
    let storage = make_storage(TestStorageIo::new()).await;
    let created = storage.create(groceries()).await.expect("create failed");
    assert_eq!(created.title, "Groceries");
    assert_eq!(created.description, "Milk, eggs");
    assert_eq!(created.created_at, START_TIME);
    assert_eq!(created.updated_at, None);

    let read = storage.get(created.id).await.expect("get failed");
    assert_eq!(read, created);
    assert_eq!(storage.io.last_saved(), Some(vec![created]));
}

#[tokio::test]
async fn create_rejects_blank_fields_without_touching_the_list() {
    let storage = make_storage(TestStorageIo::new()).await;
    let err = storage.create(NoteDraft::new("", "x")).await
        .expect_err("should fail");
    let StorageError::Validation(errors) = err else {
        panic!("wrong error type: {err:#?}")
    };
    assert_eq!(
        errors.get(NoteField::Title).map(|e| e.violation),
        Some(Violation::Required),
    );
    assert!(errors.get(NoteField::Description).is_none());

    let err = storage.create(NoteDraft::new("title", "   ")).await
        .expect_err("should fail");
    assert!(matches!(err, StorageError::Validation(_)), "wrong error type: {err:#?}");

    assert_eq!(storage.count().await, 0);
    assert_eq!(storage.io.save_count(), 0);
}

#[tokio::test]
async fn create_enforces_configured_maximum_lengths() {
    let storage = NoteStoreImpl::new_internal(
        TestStorageIo::new(),
        ValidationRules::server(5, 10),
    ).await.unwrap();
    let err = storage.create(NoteDraft::new("too long", "fine")).await
        .expect_err("should fail");
    let StorageError::Validation(errors) = err else {
        panic!("wrong error type: {err:#?}")
    };
    assert_eq!(errors.messages(), vec!["Title must be at most 5 characters"]);
    storage.create(NoteDraft::new("short", "fine")).await
        .expect("within limits");
}

#[tokio::test]
async fn list_keeps_insertion_order() {
    let storage = make_storage(TestStorageIo::new()).await;
    let first = storage.create(NoteDraft::new("first", "1")).await.unwrap();
    let second = storage.create(NoteDraft::new("second", "2")).await.unwrap();
    let third = storage.create(NoteDraft::new("third", "3")).await.unwrap();
    storage.update(first.id, NoteDraft::new("first, edited", "1")).await.unwrap();

    let ids: Vec<_> = storage.list().await.into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

#[tokio::test]
async fn update_replaces_fields_and_stamps_updated_at() {
    let storage = make_storage(TestStorageIo::new()).await;
    let created = storage.create(groceries()).await.unwrap();
    storage.io.advance_clock(Duration::minutes(5));

    let updated = storage
        .update(created.id, NoteDraft::new("Groceries v2", "Milk"))
        .await
        .expect("update failed");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Groceries v2");
    assert_eq!(updated.description, "Milk");
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.updated_at, Some(START_TIME + Duration::minutes(5)));
    assert_eq!(storage.get(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn updated_at_never_precedes_created_at() {
    let storage = make_storage(TestStorageIo::new()).await;
    let created = storage.create(groceries()).await.unwrap();
    storage.io.advance_clock(Duration::seconds(-30));

    let updated = storage.update(created.id, groceries()).await.unwrap();
    assert!(updated.updated_at.unwrap() >= updated.created_at);
}

#[tokio::test]
async fn update_unknown_id_is_not_found_even_for_invalid_draft() {
    let storage = make_storage(TestStorageIo::new()).await;
    storage.create(groceries()).await.unwrap();
    let unknown = NoteId::from(Uuid::from_u128(0xdead));

    for draft in [groceries(), NoteDraft::new("", "")] {
        let err = storage.update(unknown, draft).await.expect_err("should fail");
        assert!(matches!(err, StorageError::NoteNotFound), "wrong error type: {err:#?}");
    }
}

#[tokio::test]
async fn update_with_invalid_draft_keeps_the_note() {
    let storage = make_storage(TestStorageIo::new()).await;
    let created = storage.create(groceries()).await.unwrap();

    let err = storage.update(created.id, NoteDraft::new("x", ""))
        .await
        .expect_err("should fail");
    assert!(matches!(err, StorageError::Validation(_)), "wrong error type: {err:#?}");
    assert_eq!(storage.get(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn delete_twice_reports_not_found() {
    let storage = make_storage(TestStorageIo::new()).await;
    let created = storage.create(groceries()).await.unwrap();

    storage.delete(created.id).await.expect("first delete failed");
    let err = storage.delete(created.id).await.expect_err("should fail");
    assert!(matches!(err, StorageError::NoteNotFound), "wrong error type: {err:#?}");
    let err = storage.get(created.id).await.expect_err("should fail");
    assert!(matches!(err, StorageError::NoteNotFound), "wrong error type: {err:#?}");
    assert_eq!(storage.io.last_saved(), Some(Vec::new()));
}

#[tokio::test]
async fn failed_save_rolls_back_every_mutation() {
    let storage = make_storage(TestStorageIo::new()).await;
    let kept = storage.create(groceries()).await.unwrap();
    storage.io.set_failing_saves(true);

    let err = storage.create(NoteDraft::new("other", "note")).await
        .expect_err("should fail");
    assert!(matches!(err, StorageError::Io(_)), "wrong error type: {err:#?}");

    let err = storage.update(kept.id, NoteDraft::new("changed", "note")).await
        .expect_err("should fail");
    assert!(matches!(err, StorageError::Io(_)), "wrong error type: {err:#?}");

    let err = storage.delete(kept.id).await.expect_err("should fail");
    assert!(matches!(err, StorageError::Io(_)), "wrong error type: {err:#?}");

    assert_eq!(storage.list().await, vec![kept]);
}

#[tokio::test]
async fn loads_notes_from_the_backend() {
    let initial = vec![stored_note(10, "a"), stored_note(11, "b")];
    let storage = make_storage(TestStorageIo::with_notes(initial.clone())).await;
    assert_eq!(storage.list().await, initial);
    assert_eq!(storage.get(initial[1].id).await.unwrap(), initial[1]);
}

#[tokio::test]
async fn duplicate_stored_ids_are_rejected() {
    let io = TestStorageIo::with_notes(vec![stored_note(7, "a"), stored_note(7, "b")]);
    let result = NoteStoreImpl::new_internal(io, RULES).await;
    assert!(
        matches!(result, Err(StorageError::DuplicateId(id)) if id == Uuid::from_u128(7).into()),
        "duplicates must not load",
    );
}

#[tokio::test]
async fn blank_stored_notes_are_rejected() {
    let mut blank = stored_note(8, "b");
    blank.title = "  ".into();
    let io = TestStorageIo::with_notes(vec![stored_note(7, "a"), blank]);
    let result = NoteStoreImpl::new_internal(io, RULES).await;
    assert!(
        matches!(
            result,
            Err(StorageError::InvalidStoredNote { id, ref errors })
                if id == Uuid::from_u128(8).into()
                    && errors.get(NoteField::Title).is_some()
        ),
        "blank notes must not load",
    );
}

#[tokio::test]
async fn fresh_ids_skip_taken_ones() {
    // the mock hands out 1, 2, 3...; 1 and 2 are already stored
    let io = TestStorageIo::with_notes(vec![stored_note(1, "a"), stored_note(2, "b")]);
    let storage = make_storage(io).await;
    let created = storage.create(groceries()).await.unwrap();
    assert_eq!(created.id, Uuid::from_u128(3).into());
}

#[tokio::test]
async fn list_count_matches_gettable_ids() {
    let storage = make_storage(TestStorageIo::new()).await;
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(storage.create(NoteDraft::new(format!("note {i}"), "x")).await.unwrap().id);
    }
    storage.delete(ids[1]).await.unwrap();
    storage.delete(ids[3]).await.unwrap();

    let mut gettable = 0;
    for id in &ids {
        if storage.get(*id).await.is_ok() {
            gettable += 1;
        }
    }
    assert_eq!(storage.list().await.len(), gettable);
    assert_eq!(gettable, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_ids() {
    let storage = Arc::new(make_storage(TestStorageIo::new()).await);
    let tasks: Vec<_> = (0..64)
        .map(|i| {
            let storage = storage.clone();
            tokio::spawn(async move {
                storage.create(NoteDraft::new(format!("note {i}"), "x")).await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().expect("create failed");
    }

    let notes = storage.list().await;
    assert_eq!(notes.len(), 64);
    let distinct: HashSet<_> = notes.iter().map(|n| n.id).collect();
    assert_eq!(distinct.len(), 64);
    assert_eq!(storage.io.save_count(), 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deletes_of_different_notes() {
    let initial: Vec<_> = (1..=32)
        .map(|i| stored_note(i, &format!("note {i}")))
        .collect();
    let storage = Arc::new(make_storage(TestStorageIo::with_notes(initial.clone())).await);
    let tasks: Vec<_> = initial
        .iter()
        .filter(|n| n.id.into_uuid().as_u128() % 2 == 0)
        .map(|n| {
            let storage = storage.clone();
            let id = n.id;
            tokio::spawn(async move { storage.delete(id).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().expect("delete failed");
    }

    let remaining: Vec<_> = storage.list().await
        .into_iter()
        .map(|n| n.id.into_uuid().as_u128())
        .collect();
    assert_eq!(remaining, (1..=32).step_by(2).collect::<Vec<u128>>());
}

async fn make_file_storage(path: &std::path::Path) -> Result<NoteStore, StorageError> {
    NoteStoreImpl::new_internal(
        ProductionNoteStorageIo::File { path: path.to_owned() },
        RULES,
    ).await
}

#[tokio::test]
async fn file_backend_starts_empty_without_a_file() {
    let dir = TempDir::new().unwrap();
    let storage = make_file_storage(&dir.path().join("notes.json")).await
        .expect("storage creation failed");
    assert!(storage.list().await.is_empty());
}

#[tokio::test]
async fn file_backend_survives_reopening() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.json");

    let storage = make_file_storage(&path).await.unwrap();
    let kept = storage.create(groceries()).await.unwrap();
    let dropped = storage.create(NoteDraft::new("temporary", "x")).await.unwrap();
    let kept = storage.update(kept.id, NoteDraft::new("Groceries v2", "Milk")).await.unwrap();
    storage.delete(dropped.id).await.unwrap();
    drop(storage);

    let reopened = make_file_storage(&path).await.unwrap();
    assert_eq!(reopened.list().await, vec![kept]);
}

#[tokio::test]
async fn file_backend_leaves_no_tmp_files() {
    let dir = TempDir::new().unwrap();
    let storage = make_file_storage(&dir.path().join("notes.json")).await.unwrap();
    storage.create(groceries()).await.unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["notes.json"]);
}

#[tokio::test]
async fn file_backend_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("notes.json");
    file.write_str("not json").unwrap();
    let err = make_file_storage(file.path()).await
        .err()
        .expect("should fail");
    assert!(matches!(err, StorageError::Serialization(_)), "wrong error type: {err:#?}");
}

#[tokio::test]
async fn file_backend_reports_unwritable_location() {
    let dir = TempDir::new().unwrap();
    let storage = make_file_storage(&dir.path().join("missing/notes.json")).await
        .expect("a missing file is fine until the first write");
    let err = storage.create(groceries()).await.expect_err("should fail");
    assert!(matches!(err, StorageError::Io(_)), "wrong error type: {err:#?}");
    assert_eq!(storage.count().await, 0);
}
