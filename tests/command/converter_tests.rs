//! Converter chain tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parley_command::{Converter, Engine, FnConverter};
use parley_foundation::{ErrorKind, NamedType, Type, Value};

#[derive(Debug, PartialEq)]
struct Celsius(f64);

fn temperature() -> Type {
    Type::named("temperature")
}

fn temperature_converter() -> Arc<dyn Converter> {
    Arc::new(FnConverter::new("temperature", |raw: &str, target: &Type| {
        if *target != temperature() {
            return None;
        }
        let degrees = raw.strip_suffix('C')?.parse::<f64>().ok()?;
        Some(Value::object("temperature", Celsius(degrees)))
    }))
}

#[test]
fn custom_converter_runs_before_fallback() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let engine = Engine::new();
    engine.add_converter(Arc::new(FnConverter::new("counting", move |raw: &str, target: &Type| {
        counter.fetch_add(1, Ordering::SeqCst);
        (*target == Type::Int).then(|| Value::Int(raw.len().try_into().unwrap_or(i32::MAX)))
    })));

    // The fallback could parse "42" too, but the converter wins.
    assert_eq!(engine.convert("42", &Type::Int).unwrap(), Value::Int(2));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Not applicable: fallback handles it.
    assert_eq!(engine.convert("42", &Type::Long).unwrap(), Value::Long(42));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn named_type_from_converter() {
    let engine = Engine::new();
    engine.add_converter(temperature_converter());

    let value = engine.convert("21.5C", &temperature()).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.downcast_ref::<Celsius>(), Some(&Celsius(21.5)));

    let err = engine.convert("warm", &temperature()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Conversion { .. }));
}

#[test]
fn named_type_from_string_constructor() {
    fn parse(raw: &str) -> Result<Value, String> {
        raw.parse::<f64>()
            .map(|d| Value::object("temperature", Celsius(d)))
            .map_err(|e| e.to_string())
    }
    let target = Type::Named(NamedType::with_constructor("temperature", parse));

    let value = Engine::new().convert("3", &target).unwrap();
    assert_eq!(value.value_type(), temperature());
}

#[test]
fn contract_violation_is_distinct_from_no_converter() {
    let engine = Engine::new();
    engine.add_converter(Arc::new(FnConverter::new("wrong", |_: &str, target: &Type| {
        (*target == Type::Bool).then_some(Value::Int(1))
    })));

    let err = engine.convert("true", &Type::Bool).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConverterContract { .. }));
    assert!(err.to_string().contains("'wrong'"));
}

#[test]
fn removing_a_converter_restores_fallback() {
    let engine = Engine::new();
    let converter = temperature_converter();
    engine.add_converter(Arc::clone(&converter));
    assert!(engine.convert("5C", &temperature()).is_ok());

    assert!(engine.remove_converter(&converter));
    assert!(engine.convert("5C", &temperature()).is_err());
    assert!(!engine.remove_converter(&converter));
}

#[test]
fn no_numeric_promotion() {
    let engine = Engine::new();
    assert!(engine.convert("1.5", &Type::Int).is_err());
    assert_eq!(engine.convert("7", &Type::Double).unwrap(), Value::Double(7.0));
}
