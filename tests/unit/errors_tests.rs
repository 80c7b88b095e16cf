/*!
 * Tests for error types and conversions
 */

use selectrans::errors::{ProviderError, SelectionError, TranslationError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection reset".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection reset"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_isRetryable_shouldSeparateTransientFaults() {
    assert!(ProviderError::Timeout("5s".to_string()).is_retryable());
    assert!(ProviderError::ConnectionError("refused".to_string()).is_retryable());
    assert!(ProviderError::ApiError { status_code: 503, message: String::new() }.is_retryable());
    assert!(ProviderError::ApiError { status_code: 429, message: String::new() }.is_retryable());
    assert!(!ProviderError::ApiError { status_code: 404, message: String::new() }.is_retryable());
    assert!(!ProviderError::ParseError("bad json".to_string()).is_retryable());
}

#[test]
fn test_selectionError_commandFailed_shouldShowStatusAndStderr() {
    let error = SelectionError::CommandFailed {
        status: "exit status: 1".to_string(),
        stderr: "Can't open display".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("exit status: 1"));
    assert!(display.contains("Can't open display"));

    let not_found = SelectionError::CommandNotFound("xsel".to_string());
    assert!(not_found.to_string().contains("xsel"));
}

#[test]
fn test_translationError_fromProviderError_shouldWrapCorrectly() {
    let translation_error: TranslationError = ProviderError::RequestFailed("Test error".to_string()).into();
    assert!(matches!(translation_error, TranslationError::Provider(_)));
    assert!(translation_error.to_string().contains("Test error"));
}

#[test]
fn test_translationError_fallbackFailed_shouldMentionBothErrors() {
    let error = TranslationError::FallbackFailed {
        dictionary: ProviderError::Timeout("dictionary".to_string()),
        fallback: ProviderError::ConnectionError("translate".to_string()),
    };
    let display = error.to_string();
    assert!(display.contains("dictionary"));
    assert!(display.contains("translate"));
}
