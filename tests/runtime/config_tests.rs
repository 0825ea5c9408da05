//! Configuration tests: TOML files driving the shell and its engine.

use std::fs;

use parley_command::OptionalFlag;
use parley_foundation::ErrorKind;
use parley_runtime::{Shell, ShellConfig};

use crate::{MockEditor, temp_path};

#[test]
fn load_config_file() {
    let path = temp_path("load.toml");
    fs::write(
        &path,
        "prompt = \"ops> \"\nbanner = false\n\n[engine]\noptional-flag = \"legacy\"\n",
    )
    .unwrap();

    let config = ShellConfig::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.prompt, "ops> ");
    assert!(!config.banner);
    assert_eq!(config.engine.optional_flag, OptionalFlag::Legacy);
    assert!(!config.engine.strict_arity);
    assert_eq!(config.log_filter, "warn");
}

#[test]
fn unknown_engine_values_are_rejected() {
    let err = ShellConfig::from_toml_str("[engine]\noptional-flag = \"sometimes\"\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Config(_)));
}

#[test]
fn shell_uses_configured_prompt() {
    let (editor, transcript) = MockEditor::new(&["echo hi"]);
    let config = ShellConfig::from_toml_str("prompt = \"ops> \"\nbanner = false\n").unwrap();
    let mut shell = Shell::with_editor(editor, config).unwrap();
    shell.run().unwrap();

    assert_eq!(transcript.borrow().prompts, ["ops> ", "ops> "]);
}

#[test]
fn shell_engine_follows_strict_arity() {
    let (editor, _) = MockEditor::new(&[]);
    let config = ShellConfig::from_toml_str("banner = false\n[engine]\nstrict-arity = true\n")
        .unwrap();
    let mut shell = Shell::with_editor(editor, config).unwrap();

    assert!(shell.engine().config().strict_arity);
    let err = shell.execute("escape one two").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ArityMismatch { .. }));
}
