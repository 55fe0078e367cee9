//! Interception chain
//!
//! Handlers are registered per node kind. For one node the earliest
//! registered handler runs first; each receives a [`Next`] continuation that
//! runs the following handler, and the continuation of the last handler runs
//! the default rule.

use super::Emitter;
use crate::ast::{Node, NodeType};
use crate::error::Result;
use std::collections::HashMap;
use std::fmt;

/// Signature of an interceptor: `(emitter, node, preserve_formatting, next)`
pub type HookFn = dyn Fn(&mut Emitter, &Node, bool, Next<'_>) -> Result<String>;

/// Continuation handed to an interceptor
#[derive(Clone, Copy)]
pub struct Next<'h> {
    chain: &'h [Box<HookFn>],
}

impl<'h> Next<'h> {
    pub(crate) fn new(chain: &'h [Box<HookFn>]) -> Self {
        Self { chain }
    }

    /// Run the rest of the chain, ending in the default rule
    pub fn call(self, emitter: &mut Emitter, node: &Node, preserve_formatting: bool) -> Result<String> {
        match self.chain.split_first() {
            Some((hook, rest)) => hook(emitter, node, preserve_formatting, Next { chain: rest }),
            None => emitter.render_default(node),
        }
    }

    /// Number of interceptors still to run before the default rule
    pub fn remaining(&self) -> usize {
        self.chain.len()
    }
}

/// Registered interceptors, keyed by node kind
#[derive(Default)]
pub struct HookTable {
    hooks: HashMap<NodeType, Vec<Box<HookFn>>>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the chain for `kind`
    pub fn register<F>(&mut self, kind: NodeType, handler: F)
    where
        F: Fn(&mut Emitter, &Node, bool, Next<'_>) -> Result<String> + 'static,
    {
        log::debug!("registering hook for {}", kind);
        self.hooks.entry(kind).or_default().push(Box::new(handler));
    }

    /// Registered chain for `kind`, if any
    pub fn chain(&self, kind: NodeType) -> Option<&[Box<HookFn>]> {
        self.hooks
            .get(&kind)
            .map(Vec::as_slice)
            .filter(|chain| !chain.is_empty())
    }

    pub fn count(&self, kind: NodeType) -> usize {
        self.hooks.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.values().all(Vec::is_empty)
    }
}

impl fmt::Debug for HookTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self
            .hooks
            .iter()
            .map(|(kind, chain)| (kind.as_str(), chain.len()))
            .collect();
        kinds.sort();
        f.debug_struct("HookTable").field("hooks", &kinds).finish()
    }
}

/// A bundle of interceptors installed together
pub trait Hook {
    fn register(&self, hooks: &mut HookTable);
}
