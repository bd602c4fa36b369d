use std::time::Duration;

use conjure::backend::{BackendMode, RemoteApi};
use conjure::config::Config;
use conjure::error::ConjureError;
use conjure::prompt::build_prompt;

// ---------------------------------------------------------------------------
// Backend mode: parsing, delimiter convention, toggling.
// ---------------------------------------------------------------------------

#[test]
fn backend_mode_parses_known_names() {
    assert_eq!("local".parse::<BackendMode>().unwrap(), BackendMode::Local);
    assert_eq!("proxy".parse::<BackendMode>().unwrap(), BackendMode::Local);
    assert_eq!("remote".parse::<BackendMode>().unwrap(), BackendMode::Remote);
    assert_eq!("REMOTE".parse::<BackendMode>().unwrap(), BackendMode::Remote);
    assert!(" gibberish ".parse::<BackendMode>().is_err());
}

#[test]
fn backend_mode_delimiter_convention() {
    assert_eq!(BackendMode::Local.delimiter(), "\n");
    assert_eq!(BackendMode::Remote.delimiter(), "\\n");
}

#[test]
fn toggling_twice_restores_mode_and_delimiter() {
    for mode in [BackendMode::Local, BackendMode::Remote] {
        assert_eq!(mode.toggled().toggled(), mode);
        assert_eq!(mode.toggled().toggled().delimiter(), mode.delimiter());
        assert_ne!(mode.toggled(), mode);
    }
}

#[test]
fn remote_api_parses_known_names() {
    assert_eq!("chat".parse::<RemoteApi>().unwrap(), RemoteApi::Chat);
    assert_eq!(
        "completions".parse::<RemoteApi>().unwrap(),
        RemoteApi::Completions
    );
    assert!("sse".parse::<RemoteApi>().is_err());
}

// ---------------------------------------------------------------------------
// Error taxonomy: player-facing text and retry classification.
// ---------------------------------------------------------------------------

#[test]
fn rate_limit_user_message_reads_like_the_original() {
    assert_eq!(
        ConjureError::RateLimited.user_message(),
        "Rate limit, please try again."
    );
}

#[test]
fn user_messages_do_not_leak_transport_detail() {
    let io: ConjureError =
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "127.0.0.1:23484").into();
    assert!(!io.user_message().contains("127.0.0.1"));

    let upstream = ConjureError::Upstream {
        message: "500: internal backend trace".to_string(),
        status: Some(500),
    };
    assert!(!upstream.user_message().contains("trace"));
}

#[test]
fn retryable_classification() {
    assert!(ConjureError::RateLimited.is_retryable());
    assert!(ConjureError::Timeout(5000).is_retryable());
    assert!(
        ConjureError::Upstream {
            message: String::new(),
            status: Some(503),
        }
        .is_retryable()
    );
    assert!(
        !ConjureError::Upstream {
            message: String::new(),
            status: Some(404),
        }
        .is_retryable()
    );
    assert!(!ConjureError::SchemaParse(String::new()).is_retryable());
    assert!(!ConjureError::EmptyPrompt.is_retryable());
}

// ---------------------------------------------------------------------------
// Config defaults.
// ---------------------------------------------------------------------------

#[test]
fn default_config_matches_reference_deployment() {
    let config = Config::default();
    assert_eq!(config.proxy.addr.to_string(), "127.0.0.1:23484");
    assert_eq!(config.book_title, "gpt");
    assert_eq!(config.tick_interval, Duration::from_millis(50));
    assert_eq!(config.remote.model, "gpt-3.5-turbo");
    assert_eq!(config.remote.api, RemoteApi::Chat);
    assert_eq!(config.mode, BackendMode::Remote);
}

#[test]
fn default_allow_list_is_conservative_but_usable() {
    let config = Config::default();
    assert!(config.allowed_commands.iter().any(|c| c == "say"));
    assert!(config.allowed_commands.iter().any(|c| c == "time"));
    // Nothing that grants operators or runs arbitrary functions.
    assert!(!config.allowed_commands.iter().any(|c| c == "op"));
    assert!(!config.allowed_commands.iter().any(|c| c == "execute"));
    assert!(!config.allowed_commands.iter().any(|c| c == "function"));
}

// ---------------------------------------------------------------------------
// Prompt assembly.
// ---------------------------------------------------------------------------

#[test]
fn prompt_wraps_user_text_in_the_instruction_template() {
    let prompt = build_prompt("make it rain").unwrap();
    assert!(prompt.starts_with("You are an expert"));
    assert!(prompt.contains("make it rain"));
    assert!(prompt.ends_with(". Commands:"));
}

#[test]
fn prompt_trims_user_text() {
    let prompt = build_prompt("  make it rain  ").unwrap();
    assert!(prompt.contains("Prompt: make it rain. Commands:"));
}

#[test]
fn empty_or_whitespace_prompt_is_rejected() {
    assert!(matches!(build_prompt(""), Err(ConjureError::EmptyPrompt)));
    assert!(matches!(
        build_prompt("   \n\t"),
        Err(ConjureError::EmptyPrompt)
    ));
}
