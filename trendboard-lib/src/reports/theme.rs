use super::lookup::{LookupError, check_name, is_valid_name};
use core::fmt::{self, Write};
use std::collections::BTreeMap;

/// Token that sets the page's `color-scheme` property rather than a custom property.
pub const COLOR_SCHEME: &str = "color-scheme";

/// Themes every report can select without configuration.
pub const BUILTIN_THEMES: [(&str, &[(&str, &str)]); 3] = [
    ("default", &[]),
    (
        "dark",
        &[
            (COLOR_SCHEME, "dark"),
            ("bg", "#0f1115"),
            ("bg-panel", "#171a21"),
            ("bg-card", "#1a1f2b"),
            ("ink", "#e6e9ef"),
            ("muted", "#a3acc2"),
            ("grid", "#2a2f3a"),
            ("axis", "#4b5263"),
            ("border", "rgba(255, 255, 255, 0.08)"),
        ],
    ),
    (
        "light",
        &[
            (COLOR_SCHEME, "light"),
            ("bg", "#ffffff"),
            ("bg-panel", "#f8fafc"),
            ("bg-card", "#ffffff"),
            ("ink", "#111827"),
            ("muted", "#6b7280"),
            ("grid", "#e5e7eb"),
            ("axis", "#9ca3af"),
            ("border", "rgba(17, 24, 39, 0.12)"),
        ],
    ),
];

/// Ordered CSS tokens; later assignments replace earlier ones in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<(String, String)>,
}

impl TokenSet {
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut set = Self::default();
        set.extend(pairs.iter().copied());
        set
    }

    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.tokens.iter_mut().find(|(existing, _)| existing == name) {
            value.clone_into(&mut slot.1);
        } else {
            self.tokens.push((name.to_string(), value.to_string()));
        }
    }

    pub fn extend<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (name, value) in pairs {
            self.set(name, value);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.iter().find(|(existing, _)| existing == name).map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Writes the tokens as a `:root` rule.
    pub fn write_root<W: Write>(&self, writer: &mut W) -> fmt::Result {
        writeln!(writer, ":root {{")?;
        for (name, value) in self.iter() {
            if name == COLOR_SCHEME {
                writeln!(writer, "  color-scheme: {value};")?;
            } else {
                writeln!(writer, "  --{name}: {value};")?;
            }
        }
        writeln!(writer, "}}")
    }
}

/// Returns true when a token value cannot escape its declaration.
#[must_use]
pub fn is_safe_token_value(value: &str) -> bool {
    !value.contains(['<', '>', '{', '}', ';'])
}

/// Describes the first unusable token in a map, if any.
#[must_use]
pub fn token_problem(context: &str, tokens: &BTreeMap<String, String>) -> Option<String> {
    tokens.iter().find_map(|(name, value)| {
        if !is_valid_name(name) {
            Some(format!("{context}: invalid token name '{name}'"))
        } else if !is_safe_token_value(value) {
            Some(format!("{context}: token '{name}' has a value containing one of '<>{{}};'"))
        } else {
            None
        }
    })
}

/// Built-in themes plus the ones defined in configuration.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, TokenSet>,
}

impl ThemeRegistry {
    /// Registers the built-in themes, then `custom`; a custom theme replaces a built-in of the same name.
    ///
    /// # Errors
    ///
    /// Fails when a custom theme name is not a valid name.
    pub fn new(custom: &BTreeMap<String, BTreeMap<String, String>>) -> Result<Self, LookupError> {
        let mut themes: BTreeMap<String, TokenSet> = BUILTIN_THEMES
            .iter()
            .map(|(name, pairs)| ((*name).to_string(), TokenSet::from_pairs(pairs)))
            .collect();

        for (name, tokens) in custom {
            check_name("theme", name)?;

            let mut set = TokenSet::default();
            set.extend(tokens.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            let _ = themes.insert(name.clone(), set);
        }

        Ok(Self { themes })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Looks up a theme by name.
    ///
    /// # Errors
    ///
    /// Fails for malformed names and names with no registered theme.
    pub fn resolve(&self, name: &str) -> Result<&TokenSet, LookupError> {
        check_name("theme", name)?;

        self.themes.get(name).ok_or_else(|| LookupError::Unknown {
            kind: "theme",
            name: name.to_string(),
            available: self.names().map(str::to_string).collect(),
        })
    }
}

/// Layers layout defaults, then the theme, then individual overrides.
#[must_use]
pub fn resolve_tokens(layout_defaults: &[(&str, &str)], theme: &TokenSet, overrides: &BTreeMap<String, String>) -> TokenSet {
    let mut tokens = TokenSet::from_pairs(layout_defaults);
    tokens.extend(theme.iter());
    tokens.extend(overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    tokens
}
