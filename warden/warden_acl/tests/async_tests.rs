use std::sync::{Arc, Mutex};
use std::time::Duration;

use warden_acl::{Acl, AclOptions, Error, Policy, Test, VerbObject};

struct User {
    id: u64,
    is_admin: bool,
}

struct Post {
    owner_id: u64,
}

fn user(id: u64) -> User {
    User {
        id,
        is_admin: false,
    }
}

fn delayed(answer: bool, log: &Arc<Mutex<Vec<&'static str>>>, label: &'static str) -> Test<User> {
    let log = Arc::clone(log);
    Test::future(move |_, _, _, _| {
        let log = Arc::clone(&log);
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            log.lock().unwrap().push(label);
            answer
        })
    })
}

#[tokio::test]
async fn test_async_predicate() {
    let mut acl: Acl<User> = Acl::new();
    acl.rule(
        "edit",
        VerbObject::of::<Post>(),
        Test::future(|user: &User, verb_object, _, _| {
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                verb_object
                    .downcast_ref::<Post>()
                    .is_some_and(|post| post.owner_id == user.id)
            })
        }),
    )
    .unwrap();

    let post = Post { owner_id: 4 };
    assert!(acl
        .can_async(&user(4), "edit", VerbObject::instance(&post), &[])
        .await
        .unwrap());
    assert!(!acl
        .can_async(&user(5), "edit", VerbObject::instance(&post), &[])
        .await
        .unwrap());
}

#[tokio::test]
async fn test_async_entry_point_handles_sync_tests() {
    let mut acl: Acl<User> = Acl::new();
    acl.allow("view", "Post").unwrap();
    acl.global_rule("purgeInactive", Test::user(|user: &User| user.is_admin));

    assert!(acl.can_async(&user(1), "view", "Post", &[]).await.unwrap());
    assert!(!acl
        .can_async(&user(1), "purgeInactive", VerbObject::Global, &[])
        .await
        .unwrap());
}

#[tokio::test]
async fn test_async_strict_errors() {
    let mut acl: Acl<User> = Acl::with_options(AclOptions::strict());
    acl.allow("view", "Post").unwrap();

    let result = acl.can_async(&user(1), "view", "Comment", &[]).await;
    assert!(matches!(result, Err(Error::UnknownVerbObject(name)) if name == "Comment"));

    let result = acl.can_async(&user(1), "delete", "Post", &[]).await;
    assert!(matches!(result, Err(Error::UnknownVerb(verb)) if verb == "delete"));
}

#[tokio::test]
async fn test_async_before_all() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut acl: Acl<User> = Acl::new();
    acl.policy(
        Policy::new()
            .before_all_async(|_, user: &User, _, _, _| {
                Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    user.is_admin.then_some(true)
                })
            })
            .verb("edit", delayed(false, &log, "edit")),
        "Post",
    )
    .unwrap();

    let admin = User {
        id: 0,
        is_admin: true,
    };
    assert!(acl.can_async(&admin, "edit", "Post", &[]).await.unwrap());
    assert!(log.lock().unwrap().is_empty());

    assert!(!acl.can_async(&user(1), "edit", "Post", &[]).await.unwrap());
    assert_eq!(*log.lock().unwrap(), vec!["edit"]);
}

#[tokio::test]
async fn test_some_async_is_sequential_and_short_circuits() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut acl: Acl<User> = Acl::new();
    acl.rule("read", "Draft", delayed(false, &log, "draft")).unwrap();
    acl.rule("read", "Article", delayed(true, &log, "article")).unwrap();
    acl.rule("read", "Page", delayed(true, &log, "page")).unwrap();

    let objects = [
        VerbObject::name("Draft"),
        VerbObject::name("Article"),
        VerbObject::name("Page"),
    ];
    assert!(acl.some_async(&user(1), "read", &objects, &[]).await.unwrap());
    assert_eq!(*log.lock().unwrap(), vec!["draft", "article"]);
}

#[tokio::test]
async fn test_every_async_is_sequential_and_short_circuits() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut acl: Acl<User> = Acl::new();
    acl.rule("read", "Article", delayed(true, &log, "article")).unwrap();
    acl.rule("read", "Draft", delayed(false, &log, "draft")).unwrap();
    acl.rule("read", "Page", delayed(true, &log, "page")).unwrap();

    let objects = [
        VerbObject::name("Article"),
        VerbObject::name("Draft"),
        VerbObject::name("Page"),
    ];
    assert!(!acl.every_async(&user(1), "read", &objects, &[]).await.unwrap());
    assert_eq!(*log.lock().unwrap(), vec!["article", "draft"]);

    assert!(acl.every_async(&user(1), "read", &[], &[]).await.unwrap());
    assert!(!acl.some_async(&user(1), "read", &[], &[]).await.unwrap());
}

#[tokio::test]
async fn test_bound_user_async() {
    let mut acl: Acl<User> = Acl::new();
    acl.rule(
        "like",
        "Post",
        Test::user_async(|user: &User| Box::pin(async move { user.id != 0 })),
    )
    .unwrap();

    let reader = user(3);
    let bound = acl.user(&reader);
    assert!(bound.can_async("like", "Post", &[]).await.unwrap());
    assert!(bound
        .every_async("like", &[VerbObject::name("Post")], &[])
        .await
        .unwrap());
    assert!(bound
        .some_async("like", &[VerbObject::name("Post")], &[])
        .await
        .unwrap());
}
