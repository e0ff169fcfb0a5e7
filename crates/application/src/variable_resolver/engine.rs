//! Variable resolution engine
//!
//! Expands `{{identifier}}` references recursively, rendering conditional
//! containers through their active spawn. Expansion is bounded: references
//! that would revisit a variable already being expanded are left as literal
//! text, and text nested deeper than the configured bound is returned as is.

use strand_domain::{Selection, SelectionState, Variable, VariableId, VariableKind};
use tracing::{debug, trace};

use super::parser::scan;
use super::selection::SelectionRules;
use super::store::VariableStore;
use crate::config::ResolverConfig;

/// Result of resolving a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The text with every resolvable placeholder substituted.
    pub resolved: String,

    /// Placeholder names that match no variable, in first-seen order.
    pub unresolved: Vec<String>,

    /// Names left literal because expanding them would loop.
    pub cycles: Vec<String>,

    /// Whether the depth bound stopped expansion somewhere.
    pub truncated: bool,

    /// True when nothing was left unexpanded.
    pub is_complete: bool,
}

impl ResolutionResult {
    /// Creates a result for input with no placeholders.
    #[must_use]
    pub fn no_placeholders(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            unresolved: Vec::new(),
            cycles: Vec::new(),
            truncated: false,
            is_complete: true,
        }
    }

    /// Returns the count of unresolved names.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

/// Bookkeeping for one top-level resolution.
struct Pass<'a, 'x> {
    exclude: Option<&'x VariableId>,
    chain: Vec<&'a VariableId>,
    unresolved: Vec<String>,
    cycles: Vec<String>,
    truncated: bool,
}

impl<'a, 'x> Pass<'a, 'x> {
    const fn new(exclude: Option<&'x VariableId>) -> Self {
        Self {
            exclude,
            chain: Vec::new(),
            unresolved: Vec::new(),
            cycles: Vec::new(),
            truncated: false,
        }
    }

    fn in_chain(&self, id: &VariableId) -> bool {
        self.chain.iter().any(|visited| *visited == id)
    }

    fn note_unresolved(&mut self, name: &str) {
        if !self.unresolved.iter().any(|n| n == name) {
            self.unresolved.push(name.to_string());
        }
    }

    fn note_cycle(&mut self, name: &str) {
        debug!(variable = name, "cyclic reference left literal");
        if !self.cycles.iter().any(|n| n == name) {
            self.cycles.push(name.to_string());
        }
    }

    fn finish(self, resolved: String) -> ResolutionResult {
        let is_complete = self.unresolved.is_empty() && self.cycles.is_empty() && !self.truncated;
        ResolutionResult {
            resolved,
            unresolved: self.unresolved,
            cycles: self.cycles,
            truncated: self.truncated,
            is_complete,
        }
    }
}

/// The variable resolution engine.
///
/// Holds only shared references, so one store can back many resolvers. The
/// sole write it performs is the lazy default selection of a conditional
/// that has none yet; use [`VariableResolver::preview`] to avoid even that.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    store: &'a VariableStore,
    rules: SelectionRules<'a>,
    config: ResolverConfig,
}

impl<'a> VariableResolver<'a> {
    /// Creates a resolver with the default configuration.
    #[must_use]
    pub const fn new(store: &'a VariableStore) -> Self {
        Self::with_config(store, ResolverConfig::new())
    }

    /// Creates a resolver with an explicit configuration.
    #[must_use]
    pub const fn with_config(store: &'a VariableStore, config: ResolverConfig) -> Self {
        Self {
            store,
            rules: SelectionRules::new(store),
            config,
        }
    }

    /// Returns the store being resolved against.
    #[must_use]
    pub const fn store(&self) -> &'a VariableStore {
        self.store
    }

    /// Returns the selection rules used for conditionals.
    #[must_use]
    pub const fn rules(&self) -> SelectionRules<'a> {
        self.rules
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> ResolverConfig {
        self.config
    }

    /// Resolves every placeholder in `input`.
    pub fn resolve(&self, input: &str, state: &mut SelectionState) -> ResolutionResult {
        self.run(input, state, None)
    }

    /// Resolves `input`, leaving references to the plain variable `exclude`
    /// literal. Used when rendering a variable's own content so it can never
    /// embed itself through an alias.
    pub fn resolve_excluding(
        &self,
        input: &str,
        state: &mut SelectionState,
        exclude: &VariableId,
    ) -> ResolutionResult {
        self.run(input, state, Some(exclude))
    }

    /// Renders a variable's display text.
    ///
    /// Plain variables resolve their own content; containers render their
    /// active spawn.
    pub fn resolve_variable(
        &self,
        variable: &'a Variable,
        state: &mut SelectionState,
    ) -> ResolutionResult {
        let mut pass = Pass::new(Some(&variable.id));
        let resolved = match &variable.kind {
            VariableKind::Plain { content } => {
                pass.chain.push(&variable.id);
                self.expand(content, 0, &mut pass, state)
            }
            VariableKind::Conditional { .. } => {
                self.render_conditional(variable, 0, &mut pass, state)
            }
        };
        pass.finish(resolved)
    }

    /// Resolves a variable by name and returns only its text.
    pub fn resolve_value(&self, name: &str, state: &mut SelectionState) -> Option<String> {
        let variable = self.store.find_by_identifier(name)?;
        Some(self.resolve_variable(variable, state).resolved)
    }

    /// Resolves against a scratch copy of `state`, leaving it untouched.
    #[must_use]
    pub fn preview(&self, input: &str, state: &SelectionState) -> ResolutionResult {
        let mut scratch = state.clone();
        self.resolve(input, &mut scratch)
    }

    /// Lists top-level placeholder names that match no variable.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        let mut unresolved: Vec<String> = Vec::new();
        for placeholder in scan(input) {
            let known = self.store.find_by_identifier(placeholder.name).is_some();
            if !known && !unresolved.iter().any(|n| n == placeholder.name) {
                unresolved.push(placeholder.name.to_string());
            }
        }
        unresolved
    }

    fn run(
        &self,
        input: &str,
        state: &mut SelectionState,
        exclude: Option<&VariableId>,
    ) -> ResolutionResult {
        if scan(input).next().is_none() {
            return ResolutionResult::no_placeholders(input);
        }
        let mut pass = Pass::new(exclude);
        let resolved = self.expand(input, 0, &mut pass, state);
        pass.finish(resolved)
    }

    fn expand(
        &self,
        text: &str,
        depth: usize,
        pass: &mut Pass<'a, '_>,
        state: &mut SelectionState,
    ) -> String {
        if depth > self.config.max_depth {
            debug!(depth, "depth bound reached, leaving text unexpanded");
            pass.truncated = true;
            return text.to_string();
        }

        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;

        for placeholder in scan(text) {
            result.push_str(&text[last_end..placeholder.span.start]);

            match self.substitute(placeholder.name, depth, pass, state) {
                Some(value) => result.push_str(&value),
                None => result.push_str(&text[placeholder.span.clone()]),
            }

            last_end = placeholder.span.end;
        }

        result.push_str(&text[last_end..]);
        result
    }

    /// Returns the replacement for one placeholder, or `None` to keep it.
    fn substitute(
        &self,
        name: &str,
        depth: usize,
        pass: &mut Pass<'a, '_>,
        state: &mut SelectionState,
    ) -> Option<String> {
        let Some(variable) = self.store.find_by_identifier(name) else {
            trace!(variable = name, "unknown placeholder left literal");
            pass.note_unresolved(name);
            return None;
        };

        if pass.in_chain(&variable.id) {
            pass.note_cycle(name);
            return None;
        }

        match &variable.kind {
            VariableKind::Plain { content } => {
                if pass.exclude == Some(&variable.id) {
                    trace!(variable = name, "excluded self reference left literal");
                    return None;
                }
                pass.chain.push(&variable.id);
                let value = self.expand(content, depth + 1, pass, state);
                pass.chain.pop();
                trace!(variable = name, depth, "substituted");
                Some(value)
            }
            VariableKind::Conditional { .. } => {
                Some(self.render_conditional(variable, depth, pass, state))
            }
        }
    }

    /// Renders the active spawn of a conditional referenced at `depth`.
    fn render_conditional(
        &self,
        conditional: &'a Variable,
        depth: usize,
        pass: &mut Pass<'a, '_>,
        state: &mut SelectionState,
    ) -> String {
        pass.chain.push(&conditional.id);
        let rendered = match self.rules.ensure_default(conditional, state) {
            Some(Selection::Spawn(name)) => self
                .rules
                .spawn_named(conditional, &name)
                .map(|spawn| self.render_spawn(spawn, depth + 1, pass, state))
                .unwrap_or_default(),
            Some(Selection::Hidden) | None => String::new(),
        };
        pass.chain.pop();
        rendered
    }

    /// Renders a spawn whose content sits at `depth`.
    fn render_spawn(
        &self,
        spawn: &'a Variable,
        depth: usize,
        pass: &mut Pass<'a, '_>,
        state: &mut SelectionState,
    ) -> String {
        if pass.in_chain(&spawn.id) {
            pass.note_cycle(&spawn.identifier);
            return spawn.placeholder();
        }

        match &spawn.kind {
            VariableKind::Plain { content } => {
                pass.chain.push(&spawn.id);
                let value = self.expand(content, depth, pass, state);
                pass.chain.pop();
                value
            }
            VariableKind::Conditional { .. } => {
                if depth > self.config.max_depth {
                    pass.truncated = true;
                    return spawn.placeholder();
                }
                self.render_conditional(spawn, depth, pass, state)
            }
        }
    }
}
