use std::collections::BTreeSet;

use blogdoc::images::{store_image, with_stored_image};
use blogdoc::{create_post, toggle_like};

use super::support::*;

#[test]
fn create_post_after_max_id_three_goes_to_the_head() {
    let ts = TestStore::fresh();
    let mut doc = ts.store.load().unwrap();
    assert_eq!(doc.posts.iter().map(|p| p.post_id).max(), Some(3));

    let id = create_post(&mut doc, 1, "harini", "fourth", None).unwrap();

    assert_eq!(id, 4);
    assert_eq!(doc.posts[0].post_id, 4);
    assert_eq!(doc.posts.len(), 4);
}

#[test]
fn toggle_like_on_preset_count() {
    let mut doc = blogdoc::default_document();
    let post = doc.post_mut(1).unwrap();
    post.likes = 2;
    post.liked_by.clear();

    toggle_like(&mut doc, 1, 5).unwrap();
    let post = doc.post(1).unwrap();
    assert_eq!(post.likes, 3);
    assert_eq!(post.liked_by, BTreeSet::from([5]));

    toggle_like(&mut doc, 1, 5).unwrap();
    let post = doc.post(1).unwrap();
    assert_eq!(post.likes, 2);
    assert!(post.liked_by.is_empty());
}

#[test]
fn full_ui_cycle_with_image_attachment() {
    let ts = TestStore::fresh();
    let source = ts.dir.path().join("sunset.jpg");
    fs::write(&source, b"jpeg bytes").unwrap();

    let stored = store_image(ts.store.images_dir(), &source).unwrap();
    assert!(stored.starts_with(ts.store.images_dir()));
    assert!(stored.file_name().unwrap().to_string_lossy().ends_with("_sunset.jpg"));

    let image = stored.to_string_lossy().into_owned();
    let (_, id) = ts
        .store
        .update(|doc| {
            let me = doc.current_user.clone();
            create_post(doc, me.user_id, &me.username, "With a picture", Some(image))
        })
        .unwrap();

    let doc = ts.store.load().unwrap();
    let post = doc.post(id).unwrap();
    assert_eq!(fs::read(post.image_path.as_deref().unwrap()).unwrap(), b"jpeg bytes");
}

#[test]
fn rejected_post_leaves_no_image_behind() {
    let ts = TestStore::fresh();
    ts.store.load().unwrap();
    let before = ts.raw();
    let source = ts.dir.path().join("sunset.jpg");
    fs::write(&source, b"jpeg bytes").unwrap();

    let err = with_stored_image(ts.store.images_dir(), Some(&source), |image| {
        ts.store.update(|doc| create_post(doc, 1, "harini", "   ", image))
    })
    .unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(fs::read_dir(ts.store.images_dir()).unwrap().count(), 0);
    assert_eq!(ts.raw(), before);
}

#[test]
fn corrupt_store_then_regular_use() {
    let ts = TestStore::with_contents(r#"{"current_user": 12}"#);

    let (doc, outcome) = ts.store.update(|doc| toggle_like(doc, 3, 1)).unwrap();

    assert_eq!(outcome, blogdoc::LikeOutcome::Liked);
    assert_eq!(doc.post(3).unwrap().likes, 36);
    assert_eq!(ts.store.try_load().unwrap(), doc);
}
