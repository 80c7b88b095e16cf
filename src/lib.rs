/*!
 * # selectrans - selection-driven translation
 *
 * Watches the text selection of the desktop session and prints a translation
 * or dictionary breakdown for every new selection, in the order the
 * selections were made.
 *
 * ## Features
 *
 * - Selection polling through an external command (`xsel` by default)
 * - Single words go to a dictionary, with machine translation as fallback
 * - Sentences go to machine translation
 * - Concurrent lookups with in-order output
 * - Network and parse failures degrade to inline notices instead of exiting
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `selection`: Reading, normalizing and change detection of the selection
 * - `translation`: Routing, lookup composition, ordering and the poll loop
 * - `providers`: Clients for the translation and dictionary services
 * - `parsers`: Response parsing (JSON and dictionary HTML)
 * - `render`: Console output
 * - `language_utils`: Language tag validation
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod parsers;
pub mod providers;
pub mod render;
pub mod selection;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ProviderError, SelectionError, TranslationError};
pub use language_utils::{get_language_name, validate_language_code};
pub use render::Renderer;
pub use selection::{CommandSelectionSource, SelectionSource};
pub use translation::{Monitor, MonitorStats, TranslationResult, Translator};
