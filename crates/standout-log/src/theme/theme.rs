//! The role-to-style lookup used while rendering.
//!
//! # Construction
//!
//! Programmatic:
//!
//! ```rust
//! use standout_log::{ConsoleTheme, ThemeStyle};
//! use console::Style;
//!
//! let theme = ConsoleTheme::named("mine")
//!     .add(ThemeStyle::Number, Style::new().magenta())
//!     .add(ThemeStyle::LevelError, Style::new().red().bold());
//! assert_eq!(theme.len(), 2);
//! ```
//!
//! From YAML:
//!
//! ```rust
//! use standout_log::ConsoleTheme;
//!
//! let theme = ConsoleTheme::from_yaml(r##"
//! string: "#d7875f"
//! number: { fg: 151 }
//! boolean: number
//! level_fatal: "white on red bold"
//! "##).unwrap();
//! assert_eq!(theme.len(), 4);
//! ```
//!
//! Roles that were never assigned resolve to a plain style, so every lookup
//! succeeds.

use std::collections::HashMap;
use std::path::Path;

use console::Style;
use once_cell::sync::Lazy;

use super::definition::StyleDefinition;
use super::style::ThemeStyle;
use crate::error::ThemeError;

static PLAIN: Lazy<Style> = Lazy::new(Style::new);

/// An immutable map from [`ThemeStyle`] roles to `console` styles.
#[derive(Debug, Clone, Default)]
pub struct ConsoleTheme {
    name: Option<String>,
    styles: HashMap<ThemeStyle, Style>,
}

impl ConsoleTheme {
    /// Creates an empty, unnamed theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty theme with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            styles: HashMap::new(),
        }
    }

    /// Creates a theme from role/style pairs. Later pairs win.
    pub fn from_styles<I>(name: impl Into<String>, styles: I) -> Self
    where
        I: IntoIterator<Item = (ThemeStyle, Style)>,
    {
        Self {
            name: Some(name.into()),
            styles: styles.into_iter().collect(),
        }
    }

    /// Assigns a style to a role.
    pub fn add(mut self, role: ThemeStyle, style: Style) -> Self {
        self.styles.insert(role, style);
        self
    }

    /// Returns a theme with `other`'s assignments layered on top of this one.
    pub fn merge(mut self, other: ConsoleTheme) -> Self {
        self.styles.extend(other.styles);
        if other.name.is_some() {
            self.name = other.name;
        }
        self
    }

    /// The style for `role`, or a plain style when the role is unassigned.
    pub fn style(&self, role: ThemeStyle) -> &Style {
        self.styles.get(&role).unwrap_or(&PLAIN)
    }

    /// Returns true when the role has an explicit assignment.
    pub fn contains(&self, role: ThemeStyle) -> bool {
        self.styles.contains_key(&role)
    }

    /// The theme's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of assigned roles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns true when no role is assigned.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Parses a theme from YAML: a mapping from role name to style definition.
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML, unknown roles, invalid colours, unknown
    /// attributes and alias cycles.
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        let root: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ThemeError::Parse {
                message: e.to_string(),
            })?;

        let map = match root {
            serde_yaml::Value::Mapping(map) => map,
            serde_yaml::Value::Null => return Ok(Self::new()),
            other => {
                return Err(ThemeError::Parse {
                    message: format!("expected a mapping of roles, got {:?}", other),
                })
            }
        };

        let mut definitions = Vec::with_capacity(map.len());
        for (key, value) in &map {
            // An unquoted `null:` key parses as YAML null.
            let key = match key {
                serde_yaml::Value::String(s) => s.as_str(),
                serde_yaml::Value::Null => "null",
                other => {
                    return Err(ThemeError::Parse {
                        message: format!("role names must be strings, got {:?}", other),
                    })
                }
            };
            let role: ThemeStyle = key.parse()?;
            definitions.push((role, StyleDefinition::parse(value, key)?));
        }

        resolve(definitions).map(|styles| Self { name: None, styles })
    }

    /// Loads a YAML theme from disk. The file stem becomes the theme name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ThemeError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut theme = Self::from_yaml(&content)?;
        theme.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        Ok(theme)
    }
}

fn resolve(
    definitions: Vec<(ThemeStyle, StyleDefinition)>,
) -> Result<HashMap<ThemeStyle, Style>, ThemeError> {
    let lookup: HashMap<ThemeStyle, &StyleDefinition> =
        definitions.iter().map(|(role, def)| (*role, def)).collect();

    let mut styles = HashMap::with_capacity(definitions.len());
    for (role, _) in &definitions {
        let mut current = *role;
        let mut hops = 0;
        let attrs = loop {
            match lookup.get(&current) {
                Some(StyleDefinition::Attributes(attrs)) => break Some(attrs),
                Some(StyleDefinition::Alias(target)) => {
                    hops += 1;
                    if hops > ThemeStyle::ALL.len() {
                        return Err(ThemeError::InvalidDefinition {
                            role: role.name().to_string(),
                            message: "alias cycle".to_string(),
                        });
                    }
                    current = *target;
                }
                // Alias to a role the file leaves unassigned.
                None => break None,
            }
        };
        styles.insert(*role, attrs.map_or_else(Style::new, |a| a.to_style()));
    }
    Ok(styles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_unassigned_role_is_plain() {
        let theme = ConsoleTheme::new();
        for role in ThemeStyle::ALL {
            let rendered = theme
                .style(role)
                .clone()
                .force_styling(true)
                .apply_to("x")
                .to_string();
            assert_eq!(rendered, "x", "role {role}");
        }
    }

    #[test]
    fn test_add_and_lookup() {
        let theme = ConsoleTheme::new().add(ThemeStyle::Number, Style::new().red());
        assert!(theme.contains(ThemeStyle::Number));
        assert!(!theme.contains(ThemeStyle::String));
        let rendered = theme
            .style(ThemeStyle::Number)
            .clone()
            .force_styling(true)
            .apply_to("1")
            .to_string();
        assert_ne!(rendered, "1");
    }

    #[test]
    fn test_merge_overrides() {
        let base = ConsoleTheme::named("base")
            .add(ThemeStyle::Text, Style::new().white())
            .add(ThemeStyle::Name, Style::new().cyan());
        let extra = ConsoleTheme::new().add(ThemeStyle::Name, Style::new().red());
        let merged = base.merge(extra);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.name(), Some("base"));
    }

    #[test]
    fn test_from_yaml_resolves_aliases() {
        let theme = ConsoleTheme::from_yaml(
            r#"
number: magenta
boolean: number
scalar: boolean
"#,
        )
        .unwrap();
        let render = |role| {
            theme
                .style(role)
                .clone()
                .force_styling(true)
                .apply_to("v")
                .to_string()
        };
        assert_eq!(render(ThemeStyle::Boolean), render(ThemeStyle::Number));
        assert_eq!(render(ThemeStyle::Scalar), render(ThemeStyle::Number));
    }

    #[test]
    fn test_from_yaml_alias_cycle() {
        let err = ConsoleTheme::from_yaml("number: boolean\nboolean: number\n").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidDefinition { .. }));
    }

    #[test]
    fn test_from_yaml_unknown_role() {
        let err = ConsoleTheme::from_yaml("sparkle: red\n").unwrap_err();
        assert_eq!(err, ThemeError::UnknownRole("sparkle".into()));
    }

    #[test]
    fn test_from_yaml_not_a_mapping() {
        assert!(matches!(
            ConsoleTheme::from_yaml("- red\n- blue\n"),
            Err(ThemeError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_yaml_empty_document() {
        assert!(ConsoleTheme::from_yaml("").unwrap().is_empty());
    }

    #[test]
    fn test_from_file_uses_stem_as_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("midnight.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "text: white\nnull: blue").unwrap();

        let theme = ConsoleTheme::from_file(&path).unwrap();
        assert_eq!(theme.name(), Some("midnight"));
        assert_eq!(theme.len(), 2);
    }

    #[test]
    fn test_from_file_missing() {
        let err = ConsoleTheme::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ThemeError::Load { .. }));
    }
}
