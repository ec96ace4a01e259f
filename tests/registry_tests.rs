// tests/registry_tests.rs

use scmdoc::domain::{
    CollectingSink, FunctionXRef, ObjType, ObjectEntry, PendingXRef, ScmDomain, XRefResolver,
    SEARCH_PRIORITY,
};

#[test]
fn test_duplicate_registration_warns_and_overwrites() {
    let mut domain = ScmDomain::new();
    let mut sink = CollectingSink::new();
    let objects = domain.objects_mut();
    objects.register("f", "doc1", ObjType::Function, None, &mut sink);
    objects.register("f", "doc2", ObjType::Function, None, &mut sink);

    assert_eq!(sink.warnings.len(), 1);
    assert!(sink.warnings[0].message.contains("doc1"));
    assert_eq!(
        domain.objects().resolve("f"),
        Some(&ObjectEntry {
            docname: "doc2".to_string(),
            objtype: ObjType::Function,
        })
    );
}

#[test]
fn test_clear_isolates_documents() {
    let mut domain = ScmDomain::new();
    let mut sink = CollectingSink::new();
    domain.objects_mut().register("f", "doc1", ObjType::Function, None, &mut sink);
    domain.objects_mut().register("f", "doc2", ObjType::Function, None, &mut sink);

    domain.clear_doc("doc2");
    assert_eq!(domain.objects().resolve("f"), None);
    domain.clear_doc("doc1");
    assert!(domain.objects().is_empty());
}

#[test]
fn test_unknown_resolve_is_not_an_error() {
    let domain = ScmDomain::new();
    assert_eq!(domain.objects().resolve("nonexistent"), None);
    assert_eq!(domain.resolve_xref("index", "nonexistent", "(nonexistent)"), None);
}

#[test]
fn test_title_formatting() {
    let mut domain = ScmDomain::new();
    let mut sink = CollectingSink::new();
    domain
        .objects_mut()
        .register("make-foo", "api", ObjType::Function, None, &mut sink);

    let bare = PendingXRef { target: "make-foo", title: None };
    let titled = PendingXRef { target: "make-foo", title: Some("Custom") };
    assert_eq!(FunctionXRef.resolve(&domain, "guide", &bare).unwrap().title, "(make-foo)");
    assert_eq!(FunctionXRef.resolve(&domain, "guide", &titled).unwrap().title, "Custom");
}

#[test]
fn test_enumeration_is_restartable() {
    let mut domain = ScmDomain::new();
    let mut sink = CollectingSink::new();
    for (name, doc) in [("a", "one"), ("b", "one"), ("c", "two")] {
        domain.objects_mut().register(name, doc, ObjType::Function, None, &mut sink);
    }

    let mut first: Vec<_> = domain.get_objects().map(|r| (r.name, r.docname)).collect();
    let mut second: Vec<_> = domain.get_objects().map(|r| (r.name, r.docname)).collect();
    first.sort();
    second.sort();
    assert_eq!(first, vec![("a", "one"), ("b", "one"), ("c", "two")]);
    assert_eq!(first, second);
    assert!(domain
        .get_objects()
        .all(|r| r.priority == SEARCH_PRIORITY && r.anchor == r.name && r.display_name == r.name));

    domain.clear_doc("one");
    assert_eq!(domain.get_objects().count(), 1);
}
