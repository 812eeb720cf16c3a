//! Widget payloads emitted by the orchestrator
//!
//! A widget event carries a serialized list of descriptors. The extractor
//! pulls the latest list out of the chat log, and the registry turns each
//! descriptor into a typed, renderable handle.

pub mod descriptor;
pub mod export;
pub mod extract;
pub mod registry;

pub use descriptor::{ComparisonSymbol, Spreadsheet, Widget, WidgetDescriptor};
pub use export::{rows_to_csv, save_csv};
pub use extract::{extract_latest_widget, latest_widget_payload, parse_widget_details};
pub use registry::{render_key, resolve, resolve_all, RenderHandle, WidgetKind};
