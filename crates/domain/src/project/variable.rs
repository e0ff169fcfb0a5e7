//! Variable types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved dimension value meaning "render nothing" for a conditional.
pub const HIDDEN: &str = "Hidden";

/// Stable, store-assigned identifier of a variable.
///
/// Opaque to the engine: it is only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(String);

impl VariableId {
    /// Wraps an existing id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariableId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for VariableId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// What a variable holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariableKind {
    /// Literal template text, possibly embedding `{{other}}` placeholders.
    Plain {
        /// Raw template text.
        content: String,
    },

    /// A container that renders whichever of its spawns is selected.
    Conditional {
        /// Advisory text shown to authors. Never rendered.
        #[serde(default, skip_serializing_if = "String::is_empty")]
        note: String,

        /// Whether the container offers the `Hidden` option.
        #[serde(default)]
        include_hidden: bool,
    },
}

/// A unit of text content in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Stable unique id.
    pub id: VariableId,

    /// Name used inside `{{...}}` to reference this variable.
    pub identifier: String,

    /// Kind-specific payload.
    #[serde(flatten)]
    pub kind: VariableKind,

    /// Spawn whose selection forces this spawn on in its own conditional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controlling_spawn_id: Option<VariableId>,

    /// Legacy names that still resolve to this variable.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Variable {
    /// Creates a plain variable.
    #[must_use]
    pub fn plain(
        id: impl Into<VariableId>,
        identifier: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            identifier: identifier.into(),
            kind: VariableKind::Plain {
                content: content.into(),
            },
            controlling_spawn_id: None,
            aliases: Vec::new(),
        }
    }

    /// Creates a conditional container without a hide option.
    #[must_use]
    pub fn conditional(id: impl Into<VariableId>, identifier: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            identifier: identifier.into(),
            kind: VariableKind::Conditional {
                note: String::new(),
                include_hidden: false,
            },
            controlling_spawn_id: None,
            aliases: Vec::new(),
        }
    }

    /// Sets the controlling spawn.
    #[must_use]
    pub fn controlled_by(mut self, controller: impl Into<VariableId>) -> Self {
        self.controlling_spawn_id = Some(controller.into());
        self
    }

    /// Adds a legacy alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Toggles the hide option. No effect on plain variables.
    #[must_use]
    pub fn with_hide_option(mut self, enabled: bool) -> Self {
        if let VariableKind::Conditional { include_hidden, .. } = &mut self.kind {
            *include_hidden = enabled;
        }
        self
    }

    /// Returns true for conditional containers.
    #[must_use]
    pub const fn is_conditional(&self) -> bool {
        matches!(self.kind, VariableKind::Conditional { .. })
    }

    /// Returns the template text of a plain variable.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        match &self.kind {
            VariableKind::Plain { content } => Some(content),
            VariableKind::Conditional { .. } => None,
        }
    }

    /// Returns the template text of a plain variable for editing.
    pub fn template_mut(&mut self) -> Option<&mut String> {
        match &mut self.kind {
            VariableKind::Plain { content } => Some(content),
            VariableKind::Conditional { .. } => None,
        }
    }

    /// Whether this container offers the `Hidden` option.
    #[must_use]
    pub const fn includes_hidden(&self) -> bool {
        matches!(
            self.kind,
            VariableKind::Conditional {
                include_hidden: true,
                ..
            }
        )
    }

    /// Iterates the identifier followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.identifier.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// The placeholder text that references this variable.
    #[must_use]
    pub fn placeholder(&self) -> String {
        placeholder_for(&self.identifier)
    }
}

/// Formats `name` as a `{{name}}` placeholder.
#[must_use]
pub fn placeholder_for(name: &str) -> String {
    format!("{{{{{name}}}}}")
}
