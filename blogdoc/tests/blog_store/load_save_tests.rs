use super::support::*;

#[test]
fn empty_store_seeds_and_persists_defaults() {
    let ts = TestStore::fresh();
    assert!(!ts.store.exists());

    let doc = ts.store.load().expect("load");

    assert!(ts.store.exists());
    assert_eq!(doc.users.len(), 1);
    let ids: Vec<_> = doc.posts.iter().map(|p| p.post_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(doc.notifications.is_empty());

    let reloaded = ts.store.load().expect("reload");
    assert_eq!(reloaded, doc);
}

#[test]
fn save_then_load_round_trips() {
    let ts = TestStore::fresh();
    let mut doc = ts.store.load().expect("load");
    let me = doc.current_user.clone();
    blogdoc::create_post(&mut doc, me.user_id, &me.username, "Round trip ✨", Some("blog_images/a.png".into()))
        .expect("create");
    blogdoc::toggle_like(&mut doc, 1, 5).expect("like");
    blogdoc::add_comment(&mut doc, 2, 5, "friend5", "nice").expect("comment");

    ts.store.save(&doc).expect("save");
    let loaded = ts.store.load().expect("load");

    assert_eq!(loaded, doc);
}

#[test]
fn saved_file_is_pretty_utf8_json() {
    let ts = TestStore::fresh();
    ts.store.load().expect("load");
    let raw = ts.raw();
    assert!(raw.contains("\n  \"current_user\": {"));
    assert!(raw.contains("🌅"), "non-ascii text is written as-is");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert!(value["notifications"].as_array().expect("array").is_empty());
}

#[test]
fn invalid_syntax_regenerates_defaults() {
    let ts = TestStore::with_contents("{ this is not json");

    let doc = ts.store.load().expect("load recovers");

    assert_eq!(doc.posts.len(), 3);
    assert_eq!(doc.current_user.username, "harini");
    let on_disk: Document = serde_json::from_str(&ts.raw()).expect("file rewritten");
    assert_eq!(on_disk, doc);
}

#[test]
fn invalid_utf8_regenerates_defaults() {
    let ts = TestStore::with_contents(b"{\"current_user\": \xff\xfe }");

    let err = ts.store.try_load().expect_err("not utf-8");
    assert!(matches!(err, StoreError::CorruptData { .. }));

    let doc = ts.store.load().expect("load recovers");
    assert_eq!(doc.posts.len(), 3);
    let on_disk: Document = serde_json::from_str(&ts.raw()).expect("file rewritten");
    assert_eq!(on_disk, doc);
}

#[test]
fn try_load_surfaces_corrupt_data() {
    let ts = TestStore::with_contents("[1, 2, 3]");
    let err = ts.store.try_load().expect_err("corrupt");
    assert!(matches!(err, StoreError::CorruptData { .. }));
    assert_eq!(ts.raw(), "[1, 2, 3]", "try_load does not touch the file");
}

#[test]
fn duplicate_post_ids_are_corrupt() {
    let ts = TestStore::fresh();
    let mut doc = ts.store.load().expect("load");
    doc.posts[1].post_id = doc.posts[0].post_id;
    fs::write(ts.store.data_file(), serde_json::to_string(&doc).unwrap()).unwrap();

    let err = ts.store.try_load().expect_err("duplicate ids");
    match err {
        StoreError::CorruptData { message, .. } => assert!(message.contains("duplicate post_id")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn legacy_file_without_follows_loads() {
    let ts = TestStore::with_contents(
        r#"{
  "current_user": {"user_id": 1, "username": "harini", "email": "harini@example.com",
                   "bio": "hi", "created_at": "2024-05-01T09:30:00.123456"},
  "posts": [
    {"post_id": 7, "user_id": 1, "username": "harini", "content": "old post",
     "image_path": null, "likes": 3, "liked_by": [2],
     "comments": [{"user_id": 2, "username": "friend1", "text": "yo",
                   "created_at": "2024-05-01T09:31:00"}],
     "created_at": "2024-05-01T09:30:30.5"}
  ],
  "users": [],
  "notifications": []
}"#,
    );

    let doc = ts.store.try_load().expect("legacy layout");
    assert!(doc.follows.is_empty());
    assert_eq!(doc.post(7).unwrap().comments[0].text, "yo");
    assert_eq!(doc.next_post_id(), 8);
}

#[test]
fn save_creates_missing_parent_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        data_file: dir.path().join("nested/deeper/blog.json"),
        images_dir: dir.path().join("images"),
    };
    let store = DocumentStore::new(config);

    let doc = store.load().expect("load");
    store.save(&doc).expect("save");

    let names: Vec<_> = fs::read_dir(dir.path().join("nested/deeper"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["blog.json".to_string()]);
}

#[test]
fn failed_save_reports_io_and_keeps_target() {
    let ts = TestStore::fresh();
    let doc = blogdoc::default_document();
    // A directory where the file should be makes the final rename fail.
    fs::create_dir(ts.store.data_file()).unwrap();

    let err = ts.store.save(&doc).expect_err("save over a directory");

    assert!(matches!(err, StoreError::Io { .. }));
    assert!(ts.store.data_file().is_dir());
    let leftovers = fs::read_dir(ts.dir.path()).unwrap().count();
    assert_eq!(leftovers, 1, "temp file is cleaned up");
}

#[test]
fn update_does_not_write_when_mutation_fails() {
    let ts = TestStore::fresh();
    ts.store.load().expect("seed");
    let before = ts.raw();

    let err = ts
        .store
        .update(|doc| blogdoc::toggle_like(doc, 999, 1))
        .expect_err("missing post");

    assert!(err.is_not_found());
    assert_eq!(ts.raw(), before);
}

#[test]
fn update_persists_successful_mutation() {
    let ts = TestStore::fresh();
    let (doc, post_id) = ts
        .store
        .update(|doc| blogdoc::create_post(doc, 1, "harini", "persisted", None))
        .expect("update");

    assert_eq!(post_id, 4);
    assert_eq!(ts.store.load().expect("load"), doc);
}

#[test]
fn post_id_high_water_mark_survives_reload() {
    let ts = TestStore::fresh();
    let (_, first) = ts
        .store
        .update(|doc| blogdoc::create_post(doc, 1, "harini", "gone soon", None))
        .expect("create");
    ts.store.update(|doc| blogdoc::delete_post(doc, first, 1)).expect("delete");

    let (doc, second) = ts
        .store
        .update(|doc| blogdoc::create_post(doc, 1, "harini", "after delete", None))
        .expect("create again");

    assert_eq!((first, second), (4, 5));
    assert_eq!(doc.last_post_id, 5);
}
