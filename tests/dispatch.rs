//! End-to-end dispatch behavior through configuration and the public API.

use route_dispatch::config::parse_config;
use route_dispatch::routing::{
    MacroBindings, MacroFlavor, PatternError, RegisterError, RouteTable, Router, Verb,
};
use rstest::rstest;

mod common;

#[test]
fn test_exact_literal_precedence() {
    let router = common::router(MacroFlavor::Simple, &[("/{x}", "macro"), ("/dummy", "literal")]);
    assert_eq!(common::handler(&router, "/dummy").as_deref(), Some("literal"));
    assert_eq!(common::handler(&router, "/foo").as_deref(), Some("macro"));
}

#[rstest]
#[case("/a/b")]
#[case("/a/b/c")]
fn test_segment_count_exactness(#[case] path: &str) {
    let router = common::router(MacroFlavor::Simple, &[("/{x}", "one")]);
    assert_eq!(common::handler(&router, path), None);
}

#[test]
fn test_mixed_segment_specificity() {
    let router = common::router(MacroFlavor::Simple, &[("/{one}", "one"), ("/xxx-{two}", "two")]);

    let hit = router.lookup("/xxx-foo", None).unwrap();
    assert_eq!(hit.handler, "two");
    assert_eq!(hit.bindings.get("two"), Some("foo"));

    let hit = router.lookup("/other", None).unwrap();
    assert_eq!(hit.handler, "one");
    assert_eq!(hit.bindings.get("one"), Some("other"));
}

#[rstest]
#[case("/foo", Some("one"))]
#[case("/dummy", Some("dummy"))]
#[case("/scott/ramonna", Some("two"))]
#[case("/life/universe", Some("three"))]
#[case("/scott/ramonna/envy", None)]
#[case("/life/universe/else", None)]
fn test_leftmost_segment_dominance(#[case] path: &str, #[case] expected: Option<&str>) {
    let router = common::router(
        MacroFlavor::Simple,
        &[
            ("/{one}", "one"),
            ("/dummy", "dummy"),
            ("/{two}/{three}", "two"),
            ("/life/{three}", "three"),
        ],
    );
    assert_eq!(common::handler(&router, path).as_deref(), expected);
}

#[test]
fn test_duplicate_rejection() {
    let mut table = RouteTable::new(MacroFlavor::Simple);
    table.register("/xxx-{two}", Verb::GET, "FooAction#two").unwrap();
    let err = table
        .register("/xxx-{two}", Verb::GET, "FooAction#two")
        .unwrap_err();
    assert!(matches!(err, RegisterError::Conflict { .. }));
    assert_eq!(table.route_count(), 1);
}

#[test]
fn test_duplicate_rejected_by_config_validation() {
    let err = parse_config(
        r#"
        [[routes]]
        pattern = "/xxx-{two}"
        verb = "GET"
        handler = "FooAction#two"

        [[routes]]
        pattern = "/xxx-{other}"
        verb = "GET"
        handler = "FooAction#other"
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("conflicts with previously registered route `/xxx-{two}`"));
}

#[rstest]
#[case(MacroFlavor::Regex, "/{one:[ab]+}", "/a", true)]
#[case(MacroFlavor::Regex, "/{one:[ab]+}", "/ac", false)]
#[case(MacroFlavor::Wildcard, "/{one:a?a}", "/aaa", true)]
#[case(MacroFlavor::Wildcard, "/{one:a?a}", "/aab", false)]
fn test_constrained_macros(
    #[case] flavor: MacroFlavor,
    #[case] pattern: &str,
    #[case] path: &str,
    #[case] matches: bool,
) {
    let router = common::router(flavor, &[(pattern, "one")]);
    assert_eq!(router.lookup(path, None).is_some(), matches);
}

#[test]
fn test_simple_flavor_rejects_constraint() {
    let mut table = RouteTable::new(MacroFlavor::Simple);
    assert!(matches!(
        table.register("/{one:[ab]+}", Verb::Any, ()),
        Err(RegisterError::Malformed(PatternError::ConstraintNotSupported { .. }))
    ));
}

#[test]
fn test_regex_constraint_cannot_break_anchoring() {
    let mut table = RouteTable::new(MacroFlavor::Regex);
    assert!(matches!(
        table.register("/{one:a)|(b}", Verb::Any, ()),
        Err(RegisterError::Malformed(PatternError::InvalidConstraint { .. }))
    ));
    assert_eq!(table.route_count(), 0);
    assert!(table.lookup("/axyz", None).is_none());
}

#[test]
fn test_lookup_is_idempotent() {
    let router = common::router(
        MacroFlavor::Simple,
        &[("/{two}/{three}", "two"), ("/life/{three}", "three")],
    );
    let first = router.lookup("/life/universe", None);
    for _ in 0..50 {
        assert_eq!(router.lookup("/life/universe", None), first);
    }
}

#[test]
fn test_verbs_from_config() {
    let config = parse_config(
        r#"
        [[routes]]
        pattern = "/users/{id}"
        verb = "GET"
        handler = "UserAction#view"

        [[routes]]
        pattern = "/users/{id}"
        verb = "DELETE"
        handler = "UserAction#remove"

        [[routes]]
        pattern = "/users/{id}"
        verb = "*"
        handler = "UserAction#other"
        "#,
    )
    .unwrap();
    let router = Router::from_config(&config).unwrap();

    assert_eq!(router.lookup("/users/1", Some("GET")).unwrap().handler, "UserAction#view");
    assert_eq!(router.lookup("/users/1", Some("DELETE")).unwrap().handler, "UserAction#remove");
    assert_eq!(router.lookup("/users/1", Some("PATCH")).unwrap().handler, "UserAction#other");
    assert_eq!(router.lookup("/users/1", None).unwrap().handler, "UserAction#other");
}

#[test]
fn test_match_all_missing_verb_from_config() {
    let config = parse_config(
        r#"
        [router]
        missing_verb = "match-all"

        [[routes]]
        pattern = "/users/{id}"
        verb = "GET"
        handler = "UserAction#view"
        "#,
    )
    .unwrap();
    let router = Router::from_config(&config).unwrap();
    assert_eq!(router.lookup("/users/1", None).unwrap().handler, "UserAction#view");
}

#[test]
fn test_reverse_routing_round_trips_through_lookup() {
    let config = parse_config(
        r#"
        [router]
        macro_flavor = "wildcard"

        [[routes]]
        pattern = "/files/{dir}/{name:*.txt}"
        handler = "FileAction#text"
        alias = "file.text"
        "#,
    )
    .unwrap();
    let router = Router::from_config(&config).unwrap();

    let values: MacroBindings = [("dir", "docs"), ("name", "readme.txt")].into_iter().collect();
    let path = router.reverse("file.text", &values).unwrap();
    assert_eq!(path, "/files/docs/readme.txt");

    let hit = router.lookup(&path, None).unwrap();
    assert_eq!(hit.alias.as_deref(), Some("file.text"));
    assert_eq!(hit.bindings, values);
}

#[test]
fn test_custom_delimiters_from_config() {
    let config = parse_config(
        r#"
        [router]
        macro_flavor = "regex"

        [router.syntax]
        open = "<"
        separator = "="
        close = ">"

        [[routes]]
        pattern = "/order-<id=[0-9]{4}>"
        handler = "OrderAction#view"
        "#,
    )
    .unwrap();
    let router = Router::from_config(&config).unwrap();
    assert_eq!(router.lookup("/order-1234", None).unwrap().bindings.get("id"), Some("1234"));
    assert!(router.lookup("/order-123", None).is_none());
}

#[test]
fn test_loads_router_from_file() {
    let (_dir, path) = common::write_config(
        r#"
        [[routes]]
        pattern = "/"
        handler = "IndexAction#view"
        "#,
    );
    let router = Router::load(&path).unwrap();
    assert_eq!(router.lookup("/", None).unwrap().handler, "IndexAction#view");
}
