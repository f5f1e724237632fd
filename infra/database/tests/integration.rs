use dhub_database::*;

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    // Health should be OK for mem://
    db.health().await.expect("health check");
    db.use_ns("test_ns").use_db("test_db").await.expect("session switch");

    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));

    let err = Database::builder().url("mem://").init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn schema_enforces_non_negative_scores() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    let result = db.query("CREATE match:bad SET team1_score = -5").await.expect("query").check();
    assert!(result.is_err(), "negative score should be rejected by the schema");
}

#[tokio::test]
async fn schema_defaults_apply_on_create() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    db.query("CREATE match:defaults").await.expect("create").check().expect("check");

    // Field defaults come from the schema, not the client.
    let mut response = db
        .query("SELECT VALUE team1_name FROM ONLY match:defaults")
        .await
        .expect("select name");
    let name = response.take::<Option<String>>(0).expect("take name");
    assert_eq!(name.as_deref(), Some("Team1"));

    let mut response = db
        .query("SELECT VALUE team1_score FROM ONLY match:defaults")
        .await
        .expect("select score");
    let score = response.take::<Option<i64>>(0).expect("take score");
    assert_eq!(score, Some(0));
}
