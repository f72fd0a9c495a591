use std::{io, sync::Arc};

use wireup::{singleton, transient, try_transient, ResolveError, ServiceCollection};

#[derive(Debug)]
struct Handler(&'static str);

struct Fanout {
    handlers: Vec<Arc<Handler>>,
}

#[test]
fn resolve_all_preserves_registration_order() {
    let mut services = ServiceCollection::new();
    services.add(transient(|| Handler("first")));
    services.add(transient(|| Handler("second")));
    services.add(transient(|| Handler("third")));

    let provider = services.build();
    let handlers = provider.resolve_all::<Handler>().unwrap();

    let names = handlers.iter().map(|h| h.0).collect::<Vec<_>>();
    assert_eq!(names, ["first", "second", "third"]);
}

#[test]
fn resolve_all_on_absent_type_is_empty() {
    let provider = ServiceCollection::new().build();

    assert!(provider.resolve_all::<Handler>().unwrap().is_empty());
}

#[test]
fn single_resolution_still_sees_last_registration() {
    let mut services = ServiceCollection::new();
    services.add(transient(|| Handler("first")));
    services.add(transient(|| Handler("second")));

    let provider = services.build();

    assert_eq!(provider.resolve::<Handler>().unwrap().0, "second");
}

#[test]
fn vec_dependency_collects_every_registration() {
    let mut services = ServiceCollection::new();
    services.add(singleton(|| Handler("metrics")));
    services.add(singleton(|| Handler("audit")));
    services.add(singleton(|handlers: Vec<Arc<Handler>>| Fanout { handlers }));

    let provider = services.build();
    let fanout = provider.resolve::<Fanout>().unwrap();

    let names = fanout.handlers.iter().map(|h| h.0).collect::<Vec<_>>();
    assert_eq!(names, ["metrics", "audit"]);
}

#[test]
fn vec_dependency_on_absent_type_is_empty() {
    let mut services = ServiceCollection::new();
    services.add(singleton(|handlers: Vec<Arc<Handler>>| Fanout { handlers }));

    let provider = services.build();
    let fanout = provider.resolve::<Fanout>().unwrap();

    assert!(fanout.handlers.is_empty());
}

#[test]
fn resolve_all_fails_fast() {
    let mut services = ServiceCollection::new();
    services.add(transient(|| Handler("ok")));
    services.add(try_transient(|| -> Result<Handler, io::Error> {
        Err(io::Error::new(io::ErrorKind::Other, "backend down"))
    }));
    services.add(transient(|| Handler("never reached")));

    let provider = services.build();
    let err = provider.resolve_all::<Handler>().unwrap_err();

    assert!(matches!(err, ResolveError::Factory { .. }));
}

#[test]
fn keyed_registrations_form_their_own_group() {
    let mut services = ServiceCollection::new();
    services.add(transient(|| Handler("plain")));
    services.add(transient(|| Handler("a")).key("extra"));
    services.add(transient(|| Handler("b")).key("extra"));

    let provider = services.build();

    assert_eq!(provider.resolve_all::<Handler>().unwrap().len(), 1);

    let extras = provider.resolve_all_keyed::<Handler>("extra").unwrap();
    let names = extras.iter().map(|h| h.0).collect::<Vec<_>>();
    assert_eq!(names, ["a", "b"]);
}
