//! Binder tests: fixed, optional, and variadic parameters.

use parley_command::{
    CommandDescriptor, ConverterChain, EngineConfig, HandlerMethod, OptionalFlag, ParamMeta, bind,
};
use parley_foundation::{ErrorKind, Type, Value};
use parley_lexer::tokenize;

fn descriptor(method: &HandlerMethod, flag: OptionalFlag) -> CommandDescriptor {
    CommandDescriptor::from_method(method, flag).unwrap()
}

fn greet(times_required: bool) -> HandlerMethod {
    HandlerMethod::new("greet", |_| Ok(Value::Nil))
        .with_param(Type::String, ParamMeta::new("name"))
        .with_param(Type::Int, ParamMeta::new("times").with_required(times_required))
}

fn tail() -> HandlerMethod {
    HandlerMethod::new("tail", |_| Ok(Value::Nil))
        .with_param(Type::String, ParamMeta::new("file"))
        .with_param(Type::list(Type::Long), ParamMeta::new("lines"))
        .variadic()
}

fn bind_line(line: &str, descriptor: &CommandDescriptor) -> parley_foundation::Result<parley_command::BoundArgs> {
    bind(&tokenize(line), descriptor, &ConverterChain::new(), &EngineConfig::default())
}

#[test]
fn variadic_binds_five_trailing_tokens() {
    let desc = descriptor(&tail(), OptionalFlag::Negated);
    let args = bind_line("tail log.txt 1 2 3 4 5", &desc).unwrap();
    let lines = args.list(1).unwrap();
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|v| matches!(v, Value::Long(_))));
}

#[test]
fn variadic_binds_zero_trailing_tokens() {
    let desc = descriptor(&tail(), OptionalFlag::Negated);
    let args = bind_line("tail log.txt", &desc).unwrap();
    assert_eq!(args.list(1).map(im::Vector::len), Some(0));
}

#[test]
fn optional_last_parameter_left_unset() {
    let desc = descriptor(&greet(false), OptionalFlag::Negated);
    let args = bind_line("greet Alice", &desc).unwrap();
    assert_eq!(args.str(0), Some("Alice"));
    assert!(!args.is_set(1));
}

#[test]
fn required_last_parameter_reports_missing_value() {
    let desc = descriptor(&greet(true), OptionalFlag::Negated);
    let err = bind_line("greet Alice", &desc).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingArgument { position: 1, .. }));
    assert!(err.to_string().contains("no value provided"));
}

// Legacy semantics copy `required` straight into `optional`, so the
// parameter declared required is the one that may be omitted.
#[test]
fn legacy_flag_inverts_which_parameter_may_be_omitted() {
    let desc = descriptor(&greet(true), OptionalFlag::Legacy);
    assert!(bind_line("greet Alice", &desc).unwrap().int(1).is_none());

    let desc = descriptor(&greet(false), OptionalFlag::Legacy);
    let err = bind_line("greet Alice", &desc).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingArgument { .. }));
}

#[test]
fn conversion_error_is_wrapped_with_token() {
    let desc = descriptor(&tail(), OptionalFlag::Negated);
    let err = bind_line("tail log.txt 10 ten", &desc).unwrap_err();
    match &err.kind {
        ErrorKind::InvalidArgument { token, source } => {
            assert_eq!(token, "ten");
            assert!(matches!(source.kind, ErrorKind::Conversion { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.context.and_then(|c| c.offset), Some(16));
}

#[test]
fn parameters_without_metadata_are_optional() {
    let method = HandlerMethod::new("move", |_| Ok(Value::Nil))
        .with_unnamed_param(Type::Int)
        .with_unnamed_param(Type::Int);
    let desc = descriptor(&method, OptionalFlag::Negated);
    assert_eq!(desc.parameters[0].name, "p1");

    let args = bind_line("move 3", &desc).unwrap();
    assert_eq!(args.int(0), Some(3));
    assert!(!args.is_set(1));

    let err = bind_line("move", &desc).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingArgument { position: 0, .. }));
}
