//! Registry tests: names, aliases, prefixes, and conflicts.

use parley_command::{CommandMeta, Engine, HandlerMethod};
use parley_foundation::{ErrorKind, Value};

fn noop(meta: CommandMeta) -> HandlerMethod {
    HandlerMethod::new("method", |_| Ok(Value::Nil)).with_meta(meta)
}

fn snapshot(engine: &Engine) -> (Vec<String>, Vec<String>) {
    let registry = engine.registry();
    let mut aliases: Vec<String> = registry.alias_keys().map(String::from).collect();
    aliases.sort();
    (registry.names().map(String::from).collect(), aliases)
}

#[test]
fn canonical_name_is_self_alias() {
    let engine = Engine::new();
    engine.register(noop(CommandMeta::named("status"))).unwrap();
    let (_, aliases) = snapshot(&engine);
    assert_eq!(aliases, ["status"]);
}

#[test]
fn method_name_used_when_no_name_declared() {
    let engine = Engine::new();
    let descriptor = engine
        .register(HandlerMethod::new("list_users", |_| Ok(Value::Nil)))
        .unwrap();
    assert_eq!(descriptor.name, "list_users");
}

#[test]
fn case_only_difference_is_a_conflict() {
    let engine = Engine::new();
    engine
        .register(noop(CommandMeta::named("Deploy").with_alias("ship")))
        .unwrap();
    let before = snapshot(&engine);

    let err = engine
        .register(noop(CommandMeta::named("deploy").with_alias("push")))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NameConflict { .. }));
    assert_eq!(snapshot(&engine), before);
}

#[test]
fn alias_colliding_with_existing_name_is_a_conflict() {
    let engine = Engine::new();
    engine.register(noop(CommandMeta::named("deploy"))).unwrap();

    let err = engine
        .register(noop(CommandMeta::named("release").with_alias("DEPLOY")))
        .unwrap_err();
    match err.kind {
        ErrorKind::NameConflict { name, existing } => {
            assert_eq!(name, "DEPLOY");
            assert_eq!(existing, "deploy");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(engine.is_command_name_available("release"));
}

#[test]
fn prefix_applies_to_aliases() {
    let engine = Engine::new();
    engine
        .register(noop(
            CommandMeta::named("restart").with_prefix("svc:").with_alias("rs"),
        ))
        .unwrap();

    assert_eq!(engine.get_command("SVC:RS").unwrap().name, "svc:restart");
    assert!(engine.get_command("rs").is_none());
    assert!(engine.get_command("restart").is_none());
}

#[test]
fn get_commands_filters_by_exact_prefix() {
    let engine = Engine::new();
    engine
        .register(noop(CommandMeta::named("a").with_prefix("x.")))
        .unwrap();
    engine
        .register(noop(CommandMeta::named("b").with_prefix("x.y.")))
        .unwrap();
    engine.register(noop(CommandMeta::named("c"))).unwrap();

    let names = |prefix: Option<&str>| -> Vec<String> {
        engine
            .get_commands(prefix)
            .iter()
            .map(|d| d.name.clone())
            .collect()
    };
    assert_eq!(names(Some("x.")), ["x.a"]);
    assert_eq!(names(Some("x.y.")), ["x.y.b"]);
    assert_eq!(names(None), ["c", "x.a", "x.y.b"]);
}

#[test]
fn unregister_frees_every_alias() {
    let engine = Engine::new();
    engine
        .register(noop(CommandMeta::named("deploy").with_aliases(["ship", "push"])))
        .unwrap();

    let removed = engine.unregister("Ship").unwrap();
    assert_eq!(removed.name, "deploy");
    for name in ["deploy", "ship", "push"] {
        assert!(engine.is_command_name_available(name));
    }

    let err = engine.unregister("deploy").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownCommand(_)));
}

#[test]
fn descriptive_fields_are_kept() {
    let engine = Engine::new();
    let descriptor = engine
        .register(noop(
            CommandMeta::named("deploy")
                .with_description("Ship the build")
                .with_author("release team")
                .with_version("2.1"),
        ))
        .unwrap();
    assert_eq!(descriptor.description, "Ship the build");
    assert_eq!(descriptor.author, "release team");
    assert_eq!(descriptor.version, "2.1");
    assert_eq!(descriptor.arity, 0);
}
