/*!
 * Translation pipeline from accepted selection to rendered result.
 *
 * - `types`: request and result records
 * - `router`: classifies a selection as word lookup, sentence or rejection
 * - `service`: runs the providers for one request
 * - `queue`: restores selection order among finished results
 * - `monitor`: the poll loop tying it all together
 */

pub mod monitor;
pub mod queue;
pub mod router;
pub mod service;
pub mod types;

// Re-export main types for easier usage
pub use self::monitor::{Monitor, MonitorStats, PollOutcome};
pub use self::queue::{Keyed, ReorderBuffer, ResultOrderingQueue};
pub use self::router::{RejectReason, RouteDecision, TranslationRouter};
pub use self::service::Translator;
pub use self::types::{LookupKind, LookupStatus, TranslationRequest, TranslationResult};
