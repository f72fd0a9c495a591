mod components;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use components::{Config, Pool};
use wireup::{instance, singleton, transient, ServiceCollection};

#[test]
fn singleton_is_memoized_per_provider() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut services = ServiceCollection::new();
    services.add(singleton(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Config::localhost()
    }));

    let provider = services.build();

    let first = provider.resolve::<Config>().unwrap();
    let second = provider.resolve::<Config>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn transient_is_fresh_on_every_resolution() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut services = ServiceCollection::new();
    services.add(transient(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Config::localhost()
    }));

    let provider = services.build();

    let first = provider.resolve::<Config>().unwrap();
    let second = provider.resolve::<Config>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn dependencies_are_injected() {
    let mut services = ServiceCollection::new();
    services.add(singleton(Config::localhost));
    services.add(singleton(Pool::new));

    let provider = services.build();
    let pool = provider.resolve::<Pool>().unwrap();

    assert_eq!(pool.config.url, "localhost");
}

#[test]
fn precomputed_instance_is_shared() {
    let mut services = ServiceCollection::new();
    services.add(instance(Config { url: "10.0.0.1" }));

    let provider = services.build();

    let first = provider.resolve::<Config>().unwrap();
    let second = provider.resolve::<Config>().unwrap();

    assert_eq!(first.url, "10.0.0.1");
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn last_registration_wins() {
    let mut services = ServiceCollection::new();
    services.add(instance(1_i32));
    services.add(instance(2_i32));

    let provider = services.build();

    assert_eq!(*provider.resolve::<i32>().unwrap(), 2);
}

#[test]
fn keyed_registration_does_not_shadow_unkeyed() {
    let mut services = ServiceCollection::new();
    services.add(transient(|| 1_i32).key("one"));

    let provider = services.build();

    assert!(provider.resolve::<i32>().unwrap_err().is_not_found());
    assert_eq!(*provider.resolve_keyed::<i32>("one").unwrap(), 1);
}

#[test]
fn empty_key_is_distinct_from_no_key() {
    let mut services = ServiceCollection::new();
    services.add(transient(|| 1_i32).key(""));

    let provider = services.build();

    assert!(provider.resolve_option::<i32>().unwrap().is_none());
    assert_eq!(*provider.resolve_keyed::<i32>("").unwrap(), 1);
}

#[test]
fn resolve_option_reports_absence_as_none() {
    let provider = ServiceCollection::new().build();

    assert!(provider.resolve_option::<Config>().unwrap().is_none());
    assert!(provider.resolve_option_keyed::<Config>("main").unwrap().is_none());
    assert!(provider.resolve::<Config>().unwrap_err().is_not_found());
}

#[test]
fn contains_and_len() {
    let mut services = ServiceCollection::new();
    services.add(singleton(Config::localhost));
    services.add(transient(|| 1_i32).key("one"));

    assert_eq!(services.len(), 2);

    let provider = services.build();

    assert_eq!(provider.len(), 2);
    assert!(!provider.is_empty());
    assert!(provider.contains::<Config>());
    assert!(provider.contains_keyed::<i32>("one"));
    assert!(!provider.contains::<i32>());
    assert!(!provider.contains::<Pool>());
}
