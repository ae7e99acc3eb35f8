use super::*;

const REQUIRED: [&str; 5] = [
    "hookrelay",
    "--slack-webhook-url",
    "https://hooks.slack.com/services/T000/B000/XXX",
    "--cicd-url",
    "https://ci.example.com/trigger",
];

fn parse(extra: &[&str]) -> Cli {
    Cli::try_parse_from(REQUIRED.iter().chain(extra.iter())).unwrap()
}

#[test]
fn test_defaults() {
    let cli = parse(&[]);

    assert_eq!(cli.bind, "0.0.0.0:3000".parse().unwrap());
    assert_eq!(cli.event_log, PathBuf::from("events.jsonl"));
    assert_eq!(cli.log_format, LogFormat::Json);
    assert_eq!(cli.http_timeout(), Duration::from_secs(10));
    assert!(cli.validate().is_ok());
    assert_eq!(cli.router_config(), RouterConfig::default());
}

#[test]
fn test_sensitive_files_replace_the_default_list() {
    let cli = parse(&[
        "--sensitive-file",
        "deploy.key",
        "--sensitive-file",
        "id_rsa, .npmrc",
    ]);

    let files = cli.router_config().sensitive_files;

    assert_eq!(files.len(), 3);
    assert!(files.contains("deploy.key"));
    assert!(files.contains("id_rsa"));
    assert!(files.contains(".npmrc"));
    assert!(!files.contains(".env"));
}

#[test]
fn test_always_log_selects_always_policy() {
    let cli = parse(&["--always-log"]);

    assert_eq!(cli.router_config().logging, LoggingPolicy::Always);
}

#[test]
fn test_missing_slack_url_is_a_parse_error() {
    let result = Cli::try_parse_from(["hookrelay", "--cicd-url", "https://ci.example.com"]);

    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_non_http_urls() {
    let cli = Cli::try_parse_from([
        "hookrelay",
        "--slack-webhook-url",
        "ftp://hooks.example.com",
        "--cicd-url",
        "https://ci.example.com/trigger",
    ])
    .unwrap();

    let err = cli.validate().unwrap_err();

    assert!(err.to_string().contains("--slack-webhook-url"), "{err}");
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let cli = parse(&["--http-timeout-secs", "0"]);

    assert!(cli.validate().is_err());
}
