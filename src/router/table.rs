//! The compiled routing table.

use std::collections::HashMap;
use std::sync::Arc;

use crate::http::request::{Method, Request};
use crate::http::response::Outcome;
use crate::router::pattern::{Params, Pattern, RouteCompileError, split_segments};

pub type RouteHandlerFn<S> =
    dyn Fn(&Request, &Params, &HashMap<String, String>, &S) -> Outcome + Send + Sync;

/// Which methods a route entry accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSet {
    Any,
    Only(Vec<Method>),
}

impl MethodSet {
    pub fn contains(&self, method: &Method) -> bool {
        match self {
            MethodSet::Any => true,
            MethodSet::Only(methods) => methods.contains(method),
        }
    }
}

impl From<Method> for MethodSet {
    fn from(method: Method) -> Self {
        MethodSet::Only(vec![method])
    }
}

impl From<Vec<Method>> for MethodSet {
    fn from(methods: Vec<Method>) -> Self {
        MethodSet::Only(methods)
    }
}

impl<const N: usize> From<[Method; N]> for MethodSet {
    fn from(methods: [Method; N]) -> Self {
        MethodSet::Only(methods.to_vec())
    }
}

/// What a matched entry does: run a handler, or delegate the remaining
/// segments to a mounted sub-table.
pub enum Action<S> {
    Handle(Arc<RouteHandlerFn<S>>),
    Mount(Router<S>),
}

struct RouteEntry<S> {
    methods: MethodSet,
    pattern: Pattern,
    action: Action<S>,
    options: HashMap<String, String>,
}

/// A successful lookup: the handler to run, the entry's options, and the
/// captured parameters (prefix captures first for mounted tables).
pub struct Matched<'a, S> {
    pub handler: &'a Arc<RouteHandlerFn<S>>,
    pub options: &'a HashMap<String, String>,
    pub params: Params,
}

/// An ordered routing table. Entries are tried in declaration order and
/// the first structural + method match wins; declaration order is the
/// only tie-break.
pub struct Router<S = ()> {
    entries: Vec<RouteEntry<S>>,
}

impl<S> Router<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a route with an empty options map.
    pub fn route<M, F>(
        &mut self,
        methods: M,
        pattern: &str,
        handler: F,
    ) -> Result<&mut Self, RouteCompileError>
    where
        M: Into<MethodSet>,
        F: Fn(&Request, &Params, &HashMap<String, String>, &S) -> Outcome + Send + Sync + 'static,
    {
        self.route_with_options(methods, pattern, HashMap::new(), handler)
    }

    /// Adds a route carrying an opaque options map, handed to the handler
    /// unchanged on every match.
    pub fn route_with_options<M, F>(
        &mut self,
        methods: M,
        pattern: &str,
        options: HashMap<String, String>,
        handler: F,
    ) -> Result<&mut Self, RouteCompileError>
    where
        M: Into<MethodSet>,
        F: Fn(&Request, &Params, &HashMap<String, String>, &S) -> Outcome + Send + Sync + 'static,
    {
        let pattern = Pattern::compile(pattern)?;
        self.entries.push(RouteEntry {
            methods: methods.into(),
            pattern,
            action: Action::Handle(Arc::new(handler)),
            options,
        });
        Ok(self)
    }

    /// Mounts a sub-table under a path prefix. The prefix is stripped
    /// before delegation; when the sub-table has no route for the tail,
    /// matching continues with this table's subsequent entries.
    pub fn mount(&mut self, prefix: &str, sub: Router<S>) -> Result<&mut Self, RouteCompileError> {
        let pattern = Pattern::compile(prefix)?.with_glob();
        self.entries.push(RouteEntry {
            methods: MethodSet::Any,
            pattern,
            action: Action::Mount(sub),
            options: HashMap::new(),
        });
        Ok(self)
    }

    /// Finds the first matching entry for `method` and `segments`.
    /// Returns `None` when no entry matches; that is a routing result,
    /// not an error.
    pub fn find(&self, method: &Method, segments: &[&str]) -> Option<Matched<'_, S>> {
        for entry in &self.entries {
            if !entry.methods.contains(method) {
                continue;
            }
            let Some(params) = entry.pattern.matches(segments) else {
                continue;
            };

            match &entry.action {
                Action::Handle(handler) => {
                    return Some(Matched {
                        handler,
                        options: &entry.options,
                        params,
                    });
                }
                Action::Mount(sub) => {
                    let tail = &segments[entry.pattern.len()..];
                    if let Some(mut matched) = sub.find(method, tail) {
                        matched.params = params.merged(matched.params);
                        return Some(matched);
                    }
                    // The sub-table had no route for the tail; keep
                    // trying this table's later entries.
                }
            }
        }
        None
    }

    /// Looks up and invokes the handler for a completed request.
    pub fn dispatch(&self, request: &Request, state: &S) -> Option<Outcome> {
        let segments = split_segments(&request.path);
        let matched = self.find(&request.method, &segments)?;
        Some((matched.handler)(
            request,
            &matched.params,
            matched.options,
            state,
        ))
    }
}

impl<S> Default for Router<S> {
    fn default() -> Self {
        Self::new()
    }
}
