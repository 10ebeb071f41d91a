use blogdoc::queries::{all_users, feed, notifications_for, profile_stats, search_users, unread_count};
use blogdoc::{
    FollowOutcome, LikeOutcome, add_comment, admin_delete_post, admin_delete_user, create_post, default_document,
    delete_post, edit_post, register_user, switch_user, toggle_follow, toggle_like, update_bio,
};

use super::support::*;

#[test]
fn created_post_ids_are_unique_and_increasing() {
    let mut doc = default_document();
    let mut last = doc.posts.iter().map(|p| p.post_id).max().unwrap();
    for n in 0..25 {
        let id = create_post(&mut doc, 1, "harini", &format!("post {n}"), None).unwrap();
        assert!(id > last);
        last = id;
    }
    let mut ids: Vec<_> = doc.posts.iter().map(|p| p.post_id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), doc.posts.len());
}

#[test]
fn ids_are_not_reused_after_deleting_an_older_post() {
    let mut doc = default_document();
    delete_post(&mut doc, 2, 1).unwrap();
    assert_eq!(create_post(&mut doc, 1, "harini", "next", None).unwrap(), 4);
}

#[test]
fn deleting_the_newest_post_does_not_free_its_id() {
    let mut doc = default_document();
    let first = create_post(&mut doc, 1, "harini", "short lived", None).unwrap();
    delete_post(&mut doc, first, 1).unwrap();

    let second = create_post(&mut doc, 1, "harini", "replacement", None).unwrap();

    assert!(second > first, "got {second} after {first}");
}

#[test]
fn first_post_in_empty_document_gets_id_one() {
    let mut doc = default_document();
    doc.posts.clear();
    assert_eq!(create_post(&mut doc, 1, "harini", "hello", None).unwrap(), 1);
}

#[test]
fn new_post_starts_clean() {
    let mut doc = default_document();
    let id = create_post(&mut doc, 1, "harini", "  trimmed caption \n", Some("blog_images/x.png".into())).unwrap();
    let post = doc.post(id).unwrap();
    assert_eq!(post.content, "trimmed caption");
    assert_eq!(post.likes, 0);
    assert!(post.liked_by.is_empty());
    assert!(post.comments.is_empty());
    assert_eq!(post.image_path.as_deref(), Some("blog_images/x.png"));
}

#[test]
fn double_toggle_restores_like_state() {
    let mut doc = default_document();
    let before = doc.post(2).unwrap().clone();

    assert_eq!(toggle_like(&mut doc, 2, 7).unwrap(), LikeOutcome::Liked);
    assert_eq!(toggle_like(&mut doc, 2, 7).unwrap(), LikeOutcome::Unliked);

    let after = doc.post(2).unwrap();
    assert_eq!(after.likes, before.likes);
    assert_eq!(after.liked_by, before.liked_by);
}

#[test]
fn like_count_tracks_liker_set_on_new_posts() {
    let mut doc = default_document();
    let id = create_post(&mut doc, 1, "harini", "count me", None).unwrap();
    let snapshot = doc.clone();
    for user in [2, 3, 4, 3, 5, 2, 2] {
        toggle_like(&mut doc, id, user).unwrap();
        let post = doc.post(id).unwrap();
        assert_eq!(post.likes as usize, post.liked_by.len());
    }
    assert!(likes_match_delta(&snapshot, &doc));
}

#[test]
fn toggle_like_on_missing_post_changes_nothing() {
    let mut doc = default_document();
    let before = doc.clone();
    let err = toggle_like(&mut doc, 42, 1).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(doc, before);
}

#[test]
fn comments_keep_call_order() {
    let mut doc = default_document();
    for text in ["first", "second", "third"] {
        add_comment(&mut doc, 3, 2, "friend1", text).unwrap();
    }
    let texts: Vec<_> = doc.post(3).unwrap().comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn comment_on_missing_post_is_not_found() {
    let mut doc = default_document();
    let before = doc.clone();
    assert!(add_comment(&mut doc, 99, 1, "harini", "hello").unwrap_err().is_not_found());
    assert_eq!(doc, before);
}

#[test]
fn blank_comment_is_rejected() {
    let mut doc = default_document();
    let err = add_comment(&mut doc, 1, 1, "harini", "\n  ").unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(doc.post(1).unwrap().comments.len(), 2);
}

#[test]
fn likes_and_comments_notify_the_author_only() {
    let mut doc = default_document();
    let friend = register_user(&mut doc, "friend1", "friend1@example.com", None).unwrap();

    toggle_like(&mut doc, 1, friend).unwrap();
    add_comment(&mut doc, 1, friend, "friend1", "Amazing shot!").unwrap();
    add_comment(&mut doc, 1, 1, "harini", "thanks!").unwrap();

    let inbox = notifications_for(&doc, 1);
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox.iter().filter(|n| n.message.contains("liked")).count(), 1);
    assert_eq!(inbox.iter().filter(|n| n.message.contains("commented")).count(), 1);
    assert_eq!(unread_count(&doc, 1), 2);
    assert!(notifications_for(&doc, friend).is_empty());
}

#[test]
fn delete_cascades_comments_and_likes() {
    let mut doc = default_document();
    toggle_like(&mut doc, 1, 4).unwrap();
    let removed = delete_post(&mut doc, 1, 1).unwrap();
    assert_eq!(removed.comments.len(), 2);
    assert!(removed.liked_by.contains(&4));
    assert!(doc.post(1).is_none());
    assert_eq!(profile_stats(&doc, 1).posts, 2);
}

#[test]
fn only_the_author_can_delete_or_edit() {
    let mut doc = default_document();
    assert!(delete_post(&mut doc, 1, 2).unwrap_err().is_not_found());
    assert!(edit_post(&mut doc, 1, 2, "nope").unwrap_err().is_not_found());
    edit_post(&mut doc, 1, 1, "Golden hour 🌅").unwrap();
    assert_eq!(doc.post(1).unwrap().content, "Golden hour 🌅");
    assert_eq!(doc.posts.len(), 3);
}

#[test]
fn bio_edit_keeps_denormalized_usernames() {
    let mut doc = default_document();
    update_bio(&mut doc, 1, "New bio").unwrap();
    assert_eq!(doc.current_user.bio.as_deref(), Some("New bio"));
    assert_eq!(doc.users[0].bio.as_deref(), Some("New bio"));
    assert!(doc.posts.iter().all(|p| p.username == "harini"));
    assert!(update_bio(&mut doc, 77, "ghost").unwrap_err().is_not_found());
}

#[test]
fn register_and_switch_user() {
    let mut doc = default_document();
    let id = register_user(&mut doc, " friend1 ", "Friend1@Example.com", Some("hey")).unwrap();
    assert_eq!(id, 2);
    let err = register_user(&mut doc, "FRIEND1", "other@example.com", None).unwrap_err();
    let StoreError::Validation(validation) = err else {
        panic!("expected validation error");
    };
    assert!(validation.has_code("unique"));

    switch_user(&mut doc, id).unwrap();
    assert_eq!(doc.current_user.username, "friend1");
    assert!(switch_user(&mut doc, 50).unwrap_err().is_not_found());
}

#[test]
fn follow_toggles_and_rejects_self_follow() {
    let mut doc = default_document();
    let friend = register_user(&mut doc, "friend1", "friend1@example.com", None).unwrap();

    let err = toggle_follow(&mut doc, 1, 1).unwrap_err();
    assert!(matches!(err, StoreError::Validation(ref v) if v.has_code("self_follow")));
    assert!(toggle_follow(&mut doc, 1, 404).unwrap_err().is_not_found());

    assert_eq!(toggle_follow(&mut doc, friend, 1).unwrap(), FollowOutcome::Followed);
    assert!(doc.is_following(friend, 1));
    assert_eq!(profile_stats(&doc, 1).followers, 1);
    assert_eq!(profile_stats(&doc, friend).following, 1);
    assert_eq!(notifications_for(&doc, 1).len(), 1);

    assert_eq!(toggle_follow(&mut doc, friend, 1).unwrap(), FollowOutcome::Unfollowed);
    assert!(doc.follows.is_empty());
}

#[test]
fn search_excludes_current_user_and_sorts() {
    let mut doc = default_document();
    register_user(&mut doc, "zed", "zed@example.com", None).unwrap();
    register_user(&mut doc, "amy", "amy@friends.org", None).unwrap();

    let all: Vec<_> = search_users(&doc, "").iter().map(|u| u.username.as_str()).collect();
    assert_eq!(all, vec!["amy", "zed"]);
    let by_email: Vec<_> = search_users(&doc, "FRIENDS").iter().map(|u| u.username.as_str()).collect();
    assert_eq!(by_email, vec!["amy"]);
    assert!(search_users(&doc, "harini").is_empty());
}

#[test]
fn feed_lists_newest_first() {
    let mut doc = default_document();
    let id = create_post(&mut doc, 1, "harini", "latest", None).unwrap();
    let order: Vec<_> = feed(&doc).iter().map(|p| p.post_id).collect();
    assert_eq!(order[0], id);
    // Seeded posts share one timestamp, so the higher id comes first.
    assert_eq!(&order[1..], &[3, 2, 1]);
}

#[test]
fn admin_user_removal_cascades() {
    let mut doc = default_document();
    let friend = register_user(&mut doc, "friend1", "friend1@example.com", None).unwrap();
    let other = register_user(&mut doc, "friend2", "friend2@example.com", None).unwrap();

    let friend_post = create_post(&mut doc, friend, "friend1", "mine", None).unwrap();
    toggle_like(&mut doc, friend_post, other).unwrap();
    toggle_like(&mut doc, 1, friend).unwrap();
    add_comment(&mut doc, 2, friend, "friend1", "great").unwrap();
    add_comment(&mut doc, 2, other, "friend2", "stays").unwrap();
    toggle_follow(&mut doc, friend, 1).unwrap();
    toggle_follow(&mut doc, 1, friend).unwrap();
    toggle_follow(&mut doc, other, 1).unwrap();
    let likes_before = doc.post(1).unwrap().likes;

    let removed = admin_delete_user(&mut doc, friend).unwrap();

    assert_eq!(removed.user.username, "friend1");
    assert_eq!((removed.posts, removed.comments, removed.likes, removed.follows), (1, 1, 1, 2));
    assert!(all_users(&doc).iter().all(|u| u.user_id != friend));
    assert!(doc.post(friend_post).is_none());
    assert_eq!(doc.post(1).unwrap().likes, likes_before - 1);
    assert!(!doc.post(1).unwrap().liked_by.contains(&friend));
    let texts: Vec<_> = doc.post(2).unwrap().comments.iter().map(|c| c.text.as_str()).collect();
    assert!(!texts.contains(&"great"));
    assert!(texts.contains(&"stays"));
    assert!(doc.follows.iter().all(|f| f.follower_id != friend && f.following_id != friend));
    assert!(doc.is_following(other, 1));
    assert!(notifications_for(&doc, friend).is_empty());
    assert!(doc.check_integrity().is_ok());
}

#[test]
fn admin_cannot_remove_active_or_unknown_user() {
    let mut doc = default_document();
    let before = doc.clone();

    let err = admin_delete_user(&mut doc, 1).unwrap_err();
    assert!(matches!(err, StoreError::Validation(ref v) if v.has_code("active_user")));
    assert!(admin_delete_user(&mut doc, 404).unwrap_err().is_not_found());
    assert_eq!(doc, before);
}

#[test]
fn admin_removes_posts_by_any_author() {
    let mut doc = default_document();
    let friend = register_user(&mut doc, "friend1", "friend1@example.com", None).unwrap();
    let id = create_post(&mut doc, friend, "friend1", "not yours", None).unwrap();

    assert!(delete_post(&mut doc, id, 1).unwrap_err().is_not_found());
    let removed = admin_delete_post(&mut doc, id).unwrap();

    assert_eq!(removed.user_id, friend);
    assert!(doc.post(id).is_none());
    assert!(admin_delete_post(&mut doc, id).unwrap_err().is_not_found());
}
