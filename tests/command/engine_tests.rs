//! Engine tests: the full tokenize, resolve, bind, invoke pipeline.

use std::error::Error as _;
use std::sync::{Arc, Mutex};

use parley_command::{
    CommandHandler, CommandMeta, Converter, Engine, EngineConfig, FnConverter, HandlerMethod,
    ParamMeta,
};
use parley_foundation::{ErrorKind, Type, Value};

fn greet_method(log: Arc<Mutex<Vec<String>>>) -> HandlerMethod {
    HandlerMethod::new("greet", move |args| {
        let name = args.str(0).ok_or("name is unset")?;
        let times = args.int(1).unwrap_or(1);
        let mut log = log.lock().map_err(|_| "log poisoned")?;
        for _ in 0..times {
            log.push(format!("hello, {name}"));
        }
        Ok(Value::Nil)
    })
    .with_param(Type::String, ParamMeta::new("name"))
    .with_param(Type::Int, ParamMeta::new("times").with_required(false))
}

#[test]
fn greet_alice_end_to_end() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let engine = Engine::new();
    engine.register(greet_method(Arc::clone(&log))).unwrap();

    let invocation = engine.resolve("greet Alice").unwrap().unwrap();
    assert_eq!(invocation.args().str(0), Some("Alice"));
    assert!(!invocation.args().is_set(1));
    invocation.invoke().unwrap();

    engine.dispatch("greet \"Bob Jones\" 2").unwrap();
    assert_eq!(
        *log.lock().unwrap(),
        ["hello, Alice", "hello, Bob Jones", "hello, Bob Jones"]
    );
}

#[test]
fn blank_and_unknown_lines() {
    let engine = Engine::new();
    assert!(engine.dispatch("  \t").unwrap().is_none());
    assert!(engine.resolve("").unwrap().is_none());

    let err = engine.dispatch("launch now").unwrap_err();
    assert_eq!(err.to_string(), "unknown command: launch");
    assert_eq!(err.context.and_then(|c| c.offset), Some(0));
}

#[test]
fn handler_errors_keep_their_cause() {
    #[derive(Debug)]
    struct Denied;
    impl std::fmt::Display for Denied {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "permission denied")
        }
    }
    impl std::error::Error for Denied {}

    let engine = Engine::new();
    engine
        .register(HandlerMethod::new("rm", |_| Err(Denied.into())))
        .unwrap();

    let err = engine.dispatch("rm").unwrap_err();
    assert_eq!(err.legacy_message(), "permission denied");
    assert!(err.source().unwrap().downcast_ref::<Denied>().is_some());
}

#[test]
fn strict_arity_rejects_extra_tokens() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let lenient = Engine::new();
    lenient.register(greet_method(Arc::clone(&log))).unwrap();
    assert!(lenient.dispatch("greet Al 1 surplus").is_ok());

    let strict = Engine::with_config(EngineConfig::new().with_strict_arity(true));
    strict.register(greet_method(log)).unwrap();
    let err = strict.dispatch("greet Al 1 surplus").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ArityMismatch { .. }));
}

#[test]
fn invalid_signatures_are_rejected() {
    let engine = Engine::new();
    let err = engine
        .register(
            HandlerMethod::new("sum", |_| Ok(Value::Nil))
                .with_param(Type::Int, ParamMeta::new("values"))
                .variadic(),
        )
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidSignature { .. }));
    assert!(engine.is_command_name_available("sum"));
}

struct Inventory;

impl CommandHandler for Inventory {
    fn methods(&self) -> Vec<HandlerMethod> {
        vec![
            HandlerMethod::new("add", |args| {
                let count = args.list(1).map_or(0, im::Vector::len);
                Ok(Value::from(format!("{} x{count}", args.str(0).unwrap_or_default())))
            })
            .with_meta(CommandMeta::new().with_prefix("inv."))
            .with_param(Type::String, ParamMeta::new("item"))
            .with_param(Type::list(Type::named("sku")), ParamMeta::new("skus"))
            .variadic(),
            HandlerMethod::new("count", |_| Ok(Value::Int(0)))
                .with_meta(CommandMeta::new().with_prefix("inv.")),
        ]
    }

    fn converters(&self) -> Vec<Arc<dyn Converter>> {
        vec![Arc::new(FnConverter::new("sku", |raw: &str, target: &Type| {
            (*target == Type::named("sku") && raw.starts_with("SKU-"))
                .then(|| Value::object("sku", raw.to_string()))
        }))]
    }
}

#[test]
fn handler_brings_its_converters() {
    let engine = Engine::new();
    let descriptors = engine.register_handler(&Inventory).unwrap();
    assert_eq!(descriptors.len(), 2);
    assert_eq!(engine.converters().len(), 1);

    assert_eq!(
        engine.dispatch("inv.add widget SKU-1 SKU-2").unwrap(),
        Some(Value::from("widget x2"))
    );
    assert!(engine.dispatch("inv.add widget 42").is_err());
    assert_eq!(engine.get_commands(Some("inv.")).len(), 2);
}

#[test]
fn handler_registration_is_all_or_nothing() {
    let engine = Engine::new();
    engine
        .register(HandlerMethod::new("inv.count", |_| Ok(Value::Nil)))
        .unwrap();

    let err = engine.register_handler(&Inventory).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NameConflict { .. }));
    assert!(engine.get_command("inv.add").is_none());
    assert!(engine.converters().is_empty());
}

#[test]
fn add_converters_from_registers_only_converters() {
    let engine = Engine::new();
    assert_eq!(engine.add_converters_from(&Inventory), 1);
    assert!(engine.command_names().is_empty());
}
