//! HTML dashboard generation
//!
//! This module turns a snapshot history into one self-contained HTML page:
//! chart fragments, headline values with their change since the previous run,
//! and a latest-values table, all wrapped by one of the registered layouts.
//!
//! # Implementation Model
//!
//! Building a page happens in two steps:
//!
//! - [`build_context`] derives a [`RenderContext`] from the settings, the
//!   history and the current snapshot. All chart rendering, axis tiering and
//!   delta formatting happens here.
//! - A [`Layout`] writes the page from that context. Layouts only arrange
//!   prerendered pieces; they never look at snapshots.
//!
//! Colors and other presentation values are CSS custom properties. Each
//! layout has a default token set, a theme from the [`ThemeRegistry`] is laid
//! over it, and individual `theme_tokens` from the configuration come last.
//!
//! Layout and theme names are looked up through explicit registries; a
//! malformed or unknown name is a [`LookupError`] that lists what is
//! available.
//!
//! The `console` module prints the same context as a terminal summary.

mod builder;
mod console;
mod context;
mod format;
mod layout;
mod layouts;
mod lookup;
mod settings;
mod theme;

pub use builder::{build_context, render_report};
pub use console::generate as generate_console;
pub use context::RenderContext;
pub use layout::Layout;
pub use lookup::LookupError;
pub use settings::ReportSettings;
pub use theme::ThemeRegistry;
