use storage::repository::{QuestionRepository, StorageError};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_preserves_insertion_order() {
    let repo = connect("memdb_roundtrip").await;

    repo.append("2+2?", "4").await.unwrap();
    repo.append("Capital of France?", "Paris").await.unwrap();

    let rows = repo.load_all().await.expect("load");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].text, "2+2?");
    assert_eq!(rows[0].answer, "4");
    assert_eq!(rows[1].text, "Capital of France?");
    assert!(rows[0].id < rows[1].id);

    let question = rows[1].clone().into_question().expect("rehydrate");
    assert!(question.accepts("paris"));
}

#[tokio::test]
async fn sqlite_delete_at_collapses_positions() {
    let repo = connect("memdb_delete").await;

    for (text, answer) in [("a?", "1"), ("b?", "2"), ("c?", "3")] {
        repo.append(text, answer).await.unwrap();
    }

    repo.delete_at(2).await.expect("delete");

    let rows = repo.load_all().await.unwrap();
    let texts: Vec<_> = rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["a?", "c?"]);
}

#[tokio::test]
async fn sqlite_delete_at_out_of_range_is_not_found() {
    let repo = connect("memdb_delete_oob").await;
    repo.append("a?", "1").await.unwrap();

    assert!(matches!(
        repo.delete_at(0).await,
        Err(StorageError::NotFound)
    ));
    assert!(matches!(
        repo.delete_at(2).await,
        Err(StorageError::NotFound)
    ));
    assert_eq!(repo.load_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn sqlite_clear_restarts_identifiers() {
    let repo = connect("memdb_clear").await;

    repo.append("a?", "1").await.unwrap();
    repo.append("b?", "2").await.unwrap();
    repo.clear().await.expect("clear");

    assert!(repo.load_all().await.unwrap().is_empty());

    let id = repo.append("c?", "3").await.unwrap();
    assert_eq!(id.value(), 1);
}

#[tokio::test]
async fn sqlite_migrate_is_idempotent() {
    let repo = connect("memdb_idempotent").await;
    repo.migrate().await.expect("second migrate");

    repo.append("a?", "1").await.unwrap();
    assert_eq!(repo.load_all().await.unwrap().len(), 1);
}
