//! Themes map semantic roles to terminal styles.
//!
//! Renderers never pick colours. They ask the theme for the style of a
//! [`ThemeStyle`] role (`Number`, `LevelError`, ...) and hand it to the sink
//! untouched. A theme that leaves a role unassigned renders it plain.
//!
//! Themes come from three places:
//!
//! - presets: [`ConsoleTheme::literate`], [`ConsoleTheme::code`], ...
//! - code: [`ConsoleTheme::add`]
//! - YAML: [`ConsoleTheme::from_yaml`] / [`ConsoleTheme::from_file`]

mod color;
mod definition;
mod presets;
mod style;
#[allow(clippy::module_inception)]
mod theme;

pub use color::ColorDef;
pub use presets::PRESET_NAMES;
pub use style::ThemeStyle;
pub use theme::ConsoleTheme;
