//! The dispatch table: category + pattern → component.

use std::fmt;

use crate::element::Component;
use crate::event::EventKind;
use crate::registry::pattern::{Matcher, Pattern};

/// Event category a route listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Action,
    Message,
    Shortcut,
    Command,
    Option,
    Event,
    Submission,
    ViewClosed,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Action => "action",
            Category::Message => "message",
            Category::Shortcut => "shortcut",
            Category::Command => "command",
            Category::Option => "option",
            Category::Event => "event",
            Category::Submission => "submission",
            Category::ViewClosed => "view_closed",
        }
    }

    /// The category an inbound event is dispatched on.
    pub fn of(kind: &EventKind) -> Category {
        match kind {
            EventKind::BlockAction => Category::Action,
            EventKind::BlockSuggestion => Category::Option,
            EventKind::ViewSubmission => Category::Submission,
            EventKind::ViewClosed => Category::ViewClosed,
            EventKind::Command => Category::Command,
            EventKind::Shortcut => Category::Shortcut,
            EventKind::Message => Category::Message,
            EventKind::Event(_) => Category::Event,
        }
    }

    /// Categories where a component is also reachable through its own id.
    pub fn binds_own_id(self) -> bool {
        matches!(
            self,
            Category::Option | Category::Submission | Category::Action
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registered route.
#[derive(Debug, Clone)]
pub struct Route {
    category: Category,
    pattern: Pattern,
    matcher: Matcher,
    component: Component,
}

impl Route {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn matches(&self, subject: &str) -> bool {
        self.matcher.matches(subject)
    }
}

/// Routes in registration order.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    routes: Vec<Route>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        category: Category,
        pattern: Pattern,
        component: &Component,
    ) -> Result<(), regex::Error> {
        let matcher = Matcher::compile(category, &pattern)?;
        tracing::debug!(
            category = %category,
            pattern = %pattern,
            component = component.name(),
            "Route registered"
        );
        self.routes.push(Route {
            category,
            pattern,
            matcher,
            component: component.clone(),
        });
        Ok(())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn routes_for(&self, category: Category) -> impl Iterator<Item = &Route> {
        self.routes
            .iter()
            .filter(move |route| route.category == category)
    }

    /// Routes of `category` whose pattern matches `subject`.
    pub fn matching<'a>(
        &'a self,
        category: Category,
        subject: &'a str,
    ) -> impl Iterator<Item = &'a Route> {
        self.routes_for(category)
            .filter(move |route| route.matches(subject))
    }

    pub fn contains(&self, category: Category, pattern: &Pattern) -> bool {
        self.routes_for(category)
            .any(|route| route.pattern == *pattern)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
