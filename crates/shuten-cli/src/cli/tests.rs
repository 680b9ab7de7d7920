use super::*;
use clap::CommandFactory;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_parse_parse_stdin_defaults() {
    match parse(&["shuten", "parse"]) {
        CliCommand::Parse {
            path,
            multiline,
            strip_embedded,
            json,
        } => {
            assert!(path.is_none());
            assert!(!multiline);
            assert!(!strip_embedded);
            assert!(!json);
        }
        _ => panic!("expected Parse"),
    }
}

#[test]
fn cli_parse_parse_with_flags() {
    match parse(&[
        "shuten",
        "parse",
        "guide.txt",
        "--multiline",
        "--strip-embedded",
        "--json",
    ]) {
        CliCommand::Parse {
            path,
            multiline,
            strip_embedded,
            json,
        } => {
            assert_eq!(path, Some(PathBuf::from("guide.txt")));
            assert!(multiline);
            assert!(strip_embedded);
            assert!(json);
        }
        _ => panic!("expected Parse with flags"),
    }
}

#[test]
fn cli_parse_strip() {
    match parse(&["shuten", "strip", "-"]) {
        CliCommand::Strip { path } => assert_eq!(path, Some(PathBuf::from("-"))),
        _ => panic!("expected Strip"),
    }
}

#[test]
fn cli_parse_annotate_fields() {
    match parse(&[
        "shuten",
        "annotate",
        "plan.json",
        "--field",
        "description",
        "--field",
        "comment",
    ]) {
        CliCommand::Annotate {
            path,
            fields,
            multiline,
        } => {
            assert_eq!(path, PathBuf::from("plan.json"));
            assert_eq!(fields, vec!["description".to_string(), "comment".to_string()]);
            assert!(!multiline);
        }
        _ => panic!("expected Annotate"),
    }
}

#[test]
fn cli_annotate_requires_field() {
    assert!(Cli::try_parse_from(["shuten", "annotate", "plan.json"]).is_err());
}

#[test]
fn cli_parse_completions() {
    match parse(&["shuten", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
    assert!(Cli::try_parse_from(["shuten", "completions", "cmd"]).is_err());
}

#[test]
fn cli_parse_man() {
    assert!(matches!(parse(&["shuten", "man"]), CliCommand::Man));
}
