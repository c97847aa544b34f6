mod common;

use std::sync::Arc;

use common::{actions, init_logging, registry_with, Recorder, StaticFetcher};
use extractor_engine::{
    ActionDescriptor, ActionRegistry, ExtractError, Extractor, RegistryError, Verb,
};

#[test]
fn builtins_cover_every_verb() {
    let registry = registry_with(Arc::new(StaticFetcher::new()));
    assert_eq!(registry.len(), Verb::ALL.len());
    for verb in Verb::ALL {
        assert!(registry.contains(verb.name()), "missing {verb}");
        assert_eq!(Verb::from_name(verb.name()), Some(verb));
    }
    assert_eq!(Verb::from_name("findall"), None);
}

#[test]
fn compile_preserves_descriptor_order() {
    init_logging();
    let registry = registry_with(Arc::new(StaticFetcher::new()));
    let chain = registry
        .compile(&actions(&[
            ("go", "/list"),
            ("extract", "<a>(.*?)</a>"),
            ("findAll", ""),
            ("findFirst", "x"),
            ("store", "out"),
        ]))
        .unwrap();

    let compiled: Vec<(&str, &str)> = chain.iter().map(|b| (b.verb(), b.param())).collect();
    assert_eq!(
        compiled,
        vec![
            ("go", "/list"),
            ("extract", "<a>(.*?)</a>"),
            ("findAll", ""),
            ("findFirst", "x"),
            ("store", "out"),
        ]
    );
}

#[test]
fn unknown_verb_fails_compilation_and_leaves_registry_alone() {
    let registry = registry_with(Arc::new(StaticFetcher::new()));
    let err = registry
        .compile(&actions(&[("go", ""), ("scrape", ""), ("store", "")]))
        .unwrap_err();

    assert_eq!(err, ExtractError::UnknownAction("scrape".to_string()));
    assert_eq!(registry.len(), Verb::ALL.len());
    assert!(!registry.contains("scrape"));
}

#[test]
fn compilation_does_not_validate_patterns() {
    let registry = registry_with(Arc::new(StaticFetcher::new()));
    let chain = registry.compile(&actions(&[("extract", "(unclosed")]));
    assert!(chain.is_ok());
}

#[test]
fn register_returns_the_replaced_handler() {
    let mut registry = ActionRegistry::new();
    assert!(registry.is_empty());

    let first = registry
        .register("record", Arc::new(Recorder::default()))
        .unwrap();
    assert!(first.is_none());

    let second = registry
        .register("record", Arc::new(Recorder::default()))
        .unwrap();
    assert!(second.is_some());
    assert_eq!(registry.len(), 1);
}

#[test]
fn empty_verb_cannot_be_registered() {
    let mut registry = ActionRegistry::new();
    let err = registry
        .register("", Arc::new(Recorder::default()))
        .err().unwrap();
    assert_eq!(err, RegistryError::EmptyVerb);
    assert!(registry.is_empty());
}

#[test]
fn custom_verbs_compile_alongside_builtins() {
    let mut registry = registry_with(Arc::new(StaticFetcher::new()));
    let recorder = Arc::new(Recorder::default());
    registry.register("record", recorder.clone()).unwrap();

    let extractor =
        Extractor::compile(&registry, &actions(&[("record", ""), ("store", "seen")])).unwrap();
    let extraction = extractor.run("http://x", "");

    assert!(extraction.is_ok());
    assert_eq!(recorder.calls(), vec![(String::new(), String::new())]);
    assert_eq!(extraction.text("seen").as_deref(), Some(""));
}

#[test]
fn descriptors_deserialize_from_config_json() {
    let parsed: Vec<ActionDescriptor> = serde_json::from_str(
        r#"[{"action": "go", "param": "/p/${search}"}, {"action": "store"}]"#,
    )
    .unwrap();
    assert_eq!(
        parsed,
        vec![
            ActionDescriptor::new("go", "/p/${search}"),
            ActionDescriptor::new("store", ""),
        ]
    );
}

#[test]
fn empty_chain_runs_to_an_empty_success() {
    let extractor = Extractor::compile(&ActionRegistry::new(), &[]).unwrap();
    let extraction = extractor.run("http://x", "");
    assert!(extraction.is_ok());
    assert!(extraction.results.is_empty());
    assert_eq!(extraction.last_url, None);
}
