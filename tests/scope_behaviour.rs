use std::sync::Arc;

use wireup::{scoped, singleton, transient, ResolveError, ServiceCollection, ServiceProvider};

#[derive(Debug)]
struct Db;

#[derive(Debug)]
struct Session {
    db: Arc<Db>,
}

struct Request;

#[derive(Debug)]
struct UnitOfWork {
    session: Arc<Session>,
}

struct Reporter {
    session: Arc<Session>,
}

fn provider() -> ServiceProvider {
    let mut services = ServiceCollection::new();
    services.add(singleton(|| Db));
    services.add(scoped(|db: Arc<Db>| Session { db }));
    services.add(transient(|| Request));
    services.build()
}

#[test]
fn scoped_is_memoized_per_scope() {
    let scope = provider().create_scope();

    let first = scope.resolve::<Session>().unwrap();
    let second = scope.resolve::<Session>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn scopes_are_isolated() {
    let provider = provider();

    let scope_a = provider.create_scope();
    let scope_b = provider.create_scope();

    let a = scope_a.resolve::<Session>().unwrap();
    let b = scope_b.resolve::<Session>().unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn scoped_outside_a_scope_is_an_error() {
    let err = provider().resolve::<Session>().unwrap_err();

    assert!(matches!(err, ResolveError::OutOfScope { .. }));
}

#[test]
fn singletons_fall_through_to_the_root() {
    let provider = provider();
    let scope = provider.create_scope();

    let from_root = provider.resolve::<Db>().unwrap();
    let from_scope = scope.resolve::<Db>().unwrap();

    assert!(Arc::ptr_eq(&from_root, &from_scope));
}

#[test]
fn scoped_services_share_the_root_singleton() {
    let provider = provider();

    let scope_a = provider.create_scope();
    let scope_b = provider.create_scope();

    let a = scope_a.resolve::<Session>().unwrap();
    let b = scope_b.resolve::<Session>().unwrap();

    assert!(Arc::ptr_eq(&a.db, &b.db));
}

#[test]
fn transient_in_a_scope_is_fresh() {
    let scope = provider().create_scope();

    let first = scope.resolve::<Request>().unwrap();
    let second = scope.resolve::<Request>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn scoped_dependency_is_shared_within_a_scope() {
    let mut services = ServiceCollection::new();
    services.add(singleton(|| Db));
    services.add(scoped(|db: Arc<Db>| Session { db }));
    services.add(scoped(|session: Arc<Session>| UnitOfWork { session }));
    services.add(scoped(|session: Arc<Session>| Reporter { session }));

    let scope = services.build().create_scope();

    let work = scope.resolve::<UnitOfWork>().unwrap();
    let reporter = scope.resolve::<Reporter>().unwrap();

    assert!(Arc::ptr_eq(&work.session, &reporter.session));
}

#[test]
fn singleton_cannot_capture_a_scoped_instance() {
    let mut services = ServiceCollection::new();
    services.add(singleton(|| Db));
    services.add(scoped(|db: Arc<Db>| Session { db }));
    services.add(singleton(|session: Arc<Session>| UnitOfWork { session }));

    let scope = services.build().create_scope();
    let err = scope.resolve::<UnitOfWork>().unwrap_err();

    assert!(matches!(err, ResolveError::Dependency { .. }));
    assert!(matches!(err.root_cause(), ResolveError::OutOfScope { .. }));
}

#[test]
fn clones_share_the_scope_instance() {
    let scope = provider().create_scope();
    let clone = scope.clone();

    let original = scope.resolve::<Session>().unwrap();
    let via_clone = clone.resolve::<Session>().unwrap();

    assert!(Arc::ptr_eq(&original, &via_clone));
}

#[test]
fn sibling_scope_gets_fresh_slots() {
    let scope = provider().create_scope();
    let sibling = scope.create_scope();

    let original = scope.resolve::<Session>().unwrap();
    let fresh = sibling.resolve::<Session>().unwrap();

    assert!(!Arc::ptr_eq(&original, &fresh));
}
