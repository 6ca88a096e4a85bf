//! Stateful control kinds and where each keeps its value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::Component;
use crate::state::StateError;

/// Interactive controls whose value can be read back from view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Timepicker,
    Button,
    StaticSelect,
    MultiStaticSelect,
    UsersSelect,
    MultiUsersSelect,
    ConversationsSelect,
    MultiConversationsSelect,
    ChannelsSelect,
    MultiChannelsSelect,
    ExternalSelect,
    MultiExternalSelect,
    Overflow,
    Datepicker,
    RadioButtons,
    Checkboxes,
    PlainTextInput,
}

const ALL: [ControlKind; 17] = [
    ControlKind::Timepicker,
    ControlKind::Button,
    ControlKind::StaticSelect,
    ControlKind::MultiStaticSelect,
    ControlKind::UsersSelect,
    ControlKind::MultiUsersSelect,
    ControlKind::ConversationsSelect,
    ControlKind::MultiConversationsSelect,
    ControlKind::ChannelsSelect,
    ControlKind::MultiChannelsSelect,
    ControlKind::ExternalSelect,
    ControlKind::MultiExternalSelect,
    ControlKind::Overflow,
    ControlKind::Datepicker,
    ControlKind::RadioButtons,
    ControlKind::Checkboxes,
    ControlKind::PlainTextInput,
];

impl ControlKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlKind::Timepicker => "timepicker",
            ControlKind::Button => "button",
            ControlKind::StaticSelect => "static_select",
            ControlKind::MultiStaticSelect => "multi_static_select",
            ControlKind::UsersSelect => "users_select",
            ControlKind::MultiUsersSelect => "multi_users_select",
            ControlKind::ConversationsSelect => "conversations_select",
            ControlKind::MultiConversationsSelect => "multi_conversations_select",
            ControlKind::ChannelsSelect => "channels_select",
            ControlKind::MultiChannelsSelect => "multi_channels_select",
            ControlKind::ExternalSelect => "external_select",
            ControlKind::MultiExternalSelect => "multi_external_select",
            ControlKind::Overflow => "overflow",
            ControlKind::Datepicker => "datepicker",
            ControlKind::RadioButtons => "radio_buttons",
            ControlKind::Checkboxes => "checkboxes",
            ControlKind::PlainTextInput => "plain_text_input",
        }
    }

    /// Key of the control's value inside a view-state entry.
    pub fn value_field(self) -> &'static str {
        match self {
            ControlKind::Timepicker => "selected_time",
            ControlKind::Button | ControlKind::PlainTextInput => "value",
            ControlKind::StaticSelect
            | ControlKind::ExternalSelect
            | ControlKind::Overflow
            | ControlKind::RadioButtons => "selected_option",
            ControlKind::MultiStaticSelect
            | ControlKind::MultiExternalSelect
            | ControlKind::Checkboxes => "selected_options",
            ControlKind::UsersSelect => "selected_user",
            ControlKind::MultiUsersSelect => "selected_users",
            ControlKind::ConversationsSelect => "selected_conversation",
            ControlKind::MultiConversationsSelect => "selected_conversations",
            ControlKind::ChannelsSelect => "selected_channel",
            ControlKind::MultiChannelsSelect => "selected_channels",
            ControlKind::Datepicker => "selected_date",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlKind {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| StateError::UnknownControl(s.to_string()))
    }
}

/// One field of a state descriptor.
///
/// A control may take its options from another component (external
/// selects); that component's id then becomes part of the action id.
#[derive(Debug, Clone)]
pub struct Control {
    kind: ControlKind,
    options: Option<Component>,
}

impl Control {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            options: None,
        }
    }

    pub fn with_options(kind: ControlKind, options: &Component) -> Self {
        Self {
            kind,
            options: Some(options.clone()),
        }
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn options(&self) -> Option<&Component> {
        self.options.as_ref()
    }
}

impl From<ControlKind> for Control {
    fn from(kind: ControlKind) -> Self {
        Control::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_fields_follow_control_shape() {
        assert_eq!(ControlKind::StaticSelect.value_field(), "selected_option");
        assert_eq!(ControlKind::Checkboxes.value_field(), "selected_options");
        assert_eq!(ControlKind::PlainTextInput.value_field(), "value");
        assert_eq!(ControlKind::Datepicker.value_field(), "selected_date");
        assert_eq!(ControlKind::MultiUsersSelect.value_field(), "selected_users");
    }

    #[test]
    fn parses_wire_names() {
        for kind in ALL {
            assert_eq!(kind.as_str().parse::<ControlKind>().unwrap(), kind);
        }
        assert!(matches!(
            "slider".parse::<ControlKind>(),
            Err(StateError::UnknownControl(name)) if name == "slider"
        ));
    }

    #[test]
    fn deserializes_snake_case() {
        let kind: ControlKind = serde_json::from_str("\"multi_channels_select\"").unwrap();
        assert_eq!(kind, ControlKind::MultiChannelsSelect);
    }
}
