//! Hives, container paths, and value name validation.
//!
//! Container paths follow registry conventions:
//! - `/` and `\` are both accepted as separators; the canonical form uses `\`
//! - Must be non-empty
//! - Components between separators must be non-empty (so no leading,
//!   trailing, or doubled separators)
//! - Components are at most [`MAX_COMPONENT_LEN`] characters
//! - Components must not contain control characters
//!
//! Paths are resolved against a [`Hive`], one of the predefined roots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Canonical separator between path components.
pub const SEPARATOR: char = '\\';

/// Longest allowed container name component, in characters.
pub const MAX_COMPONENT_LEN: usize = 255;

/// Longest allowed value name, in characters.
pub const MAX_VALUE_NAME_LEN: usize = 16_383;

/// A predefined root that container paths are resolved against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hive {
    ClassesRoot,
    #[default]
    CurrentUser,
    LocalMachine,
    Users,
    CurrentConfig,
}

impl Hive {
    /// The conventional root name, e.g. `HKEY_CURRENT_USER`.
    pub fn root_name(&self) -> &'static str {
        match self {
            Self::ClassesRoot => "HKEY_CLASSES_ROOT",
            Self::CurrentUser => "HKEY_CURRENT_USER",
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
            Self::Users => "HKEY_USERS",
            Self::CurrentConfig => "HKEY_CURRENT_CONFIG",
        }
    }
}

impl fmt::Display for Hive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_name())
    }
}

/// A validated, hive-relative container path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerPath {
    components: Vec<String>,
}

impl ContainerPath {
    /// Parse and validate a path such as `Software\MyApp` or `Software/MyApp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regkit_store::ContainerPath;
    ///
    /// let path = ContainerPath::parse("Software/MyApp").unwrap();
    /// assert_eq!(path.to_string(), "Software\\MyApp");
    /// assert!(ContainerPath::parse("").is_err());
    /// assert!(ContainerPath::parse("Software//MyApp").is_err());
    /// ```
    pub fn parse(path: &str) -> StoreResult<Self> {
        let invalid = |reason: String| StoreError::InvalidPath {
            path: path.to_string(),
            reason,
        };

        if path.is_empty() {
            return Err(invalid("path must not be empty".into()));
        }

        let mut components = Vec::new();
        for component in path.split(['/', '\\']) {
            if component.is_empty() {
                return Err(invalid(
                    "path components must not be empty (leading, trailing, or doubled separator)"
                        .into(),
                ));
            }
            if component.chars().count() > MAX_COMPONENT_LEN {
                return Err(invalid(format!(
                    "component exceeds {MAX_COMPONENT_LEN} characters"
                )));
            }
            if let Some(ch) = component.chars().find(|c| c.is_control()) {
                return Err(invalid(format!("contains control character {ch:?}")));
            }
            components.push(component.to_string());
        }

        Ok(Self { components })
    }

    /// The path components, outermost first.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Number of components.
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// Every prefix of this path, outermost first, ending with the path
    /// itself.
    pub fn ancestors(&self) -> impl Iterator<Item = ContainerPath> + '_ {
        (1..=self.components.len()).map(|n| Self {
            components: self.components[..n].to_vec(),
        })
    }

    /// The fully qualified key, e.g. `HKEY_CURRENT_USER\Software\MyApp`.
    pub fn qualified(&self, hive: Hive) -> String {
        format!("{hive}{SEPARATOR}{self}")
    }
}

impl fmt::Display for ContainerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(component)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ContainerPath {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        Self::parse(s)
    }
}

/// Validate a value name. The empty name is the container's default value.
pub fn validate_value_name(name: &str) -> StoreResult<()> {
    if name.chars().count() > MAX_VALUE_NAME_LEN {
        return Err(StoreError::InvalidValueName {
            name: name.chars().take(32).collect(),
            reason: format!("exceeds {MAX_VALUE_NAME_LEN} characters"),
        });
    }
    if name.contains('\0') {
        return Err(StoreError::InvalidValueName {
            name: name.to_string(),
            reason: "contains NUL".into(),
        });
    }
    Ok(())
}
