//! Per-namespace handler declarations.

use crate::element::Component;
use crate::registry::pattern::Pattern;
use crate::registry::table::Category;
use crate::state::StateDescriptor;

/// One declared handler.
///
/// Without a pattern the route is keyed by the component's own id.
#[derive(Debug, Clone)]
pub struct Entry {
    pub component: Component,
    pub pattern: Option<Pattern>,
    /// Submissions only: also route the matching "view closed" event.
    pub handle_close: bool,
}

impl Entry {
    pub fn new(component: &Component) -> Self {
        Self {
            component: component.clone(),
            pattern: None,
            handle_close: false,
        }
    }

    pub fn pattern(mut self, pattern: impl Into<Pattern>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn handle_close(mut self, handle_close: bool) -> Self {
        self.handle_close = handle_close;
        self
    }
}

impl From<&Component> for Entry {
    fn from(component: &Component) -> Self {
        Entry::new(component)
    }
}

impl From<Component> for Entry {
    fn from(component: Component) -> Self {
        Entry::new(&component)
    }
}

/// Handlers one namespace contributes, grouped by category.
///
/// ```ignore
/// let config = HandlersConfig::new()
///     .command(Entry::new(&LIST).pattern("/todos"))
///     .action(&ADD)
///     .submission(Entry::new(&SAVE).handle_close(true))
///     .event("app_home_opened", &HOME_TAB)
///     .state(StateDescriptor::new(&ADD).field("title", ControlKind::PlainTextInput));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HandlersConfig {
    actions: Vec<Entry>,
    messages: Vec<Entry>,
    shortcuts: Vec<Entry>,
    commands: Vec<Entry>,
    options: Vec<Entry>,
    events: Vec<Entry>,
    submissions: Vec<Entry>,
    states: Vec<StateDescriptor>,
}

impl HandlersConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(mut self, entry: impl Into<Entry>) -> Self {
        self.actions.push(entry.into());
        self
    }

    pub fn message(mut self, entry: impl Into<Entry>) -> Self {
        self.messages.push(entry.into());
        self
    }

    pub fn shortcut(mut self, entry: impl Into<Entry>) -> Self {
        self.shortcuts.push(entry.into());
        self
    }

    pub fn command(mut self, entry: impl Into<Entry>) -> Self {
        self.commands.push(entry.into());
        self
    }

    pub fn option(mut self, entry: impl Into<Entry>) -> Self {
        self.options.push(entry.into());
        self
    }

    pub fn submission(mut self, entry: impl Into<Entry>) -> Self {
        self.submissions.push(entry.into());
        self
    }

    /// Events always name the event type they listen for.
    pub fn event(mut self, event_type: impl Into<String>, component: &Component) -> Self {
        self.events
            .push(Entry::new(component).pattern(Pattern::Exact(event_type.into())));
        self
    }

    /// Declare a stateful host. Its controls route back to it.
    pub fn state(mut self, descriptor: StateDescriptor) -> Self {
        self.states.push(descriptor);
        self
    }

    pub fn states(&self) -> &[StateDescriptor] {
        &self.states
    }

    /// Entries in registration order: actions, messages, shortcuts,
    /// commands, options, events, submissions.
    pub fn sections(&self) -> [(Category, &[Entry]); 7] {
        [
            (Category::Action, self.actions.as_slice()),
            (Category::Message, self.messages.as_slice()),
            (Category::Shortcut, self.shortcuts.as_slice()),
            (Category::Command, self.commands.as_slice()),
            (Category::Option, self.options.as_slice()),
            (Category::Event, self.events.as_slice()),
            (Category::Submission, self.submissions.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.sections().iter().all(|(_, entries)| entries.is_empty()) && self.states.is_empty()
    }
}
