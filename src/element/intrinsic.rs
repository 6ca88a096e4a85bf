//! Platform-defined UI primitives and their prop-shaping tables.

use std::fmt;
use std::str::FromStr;

/// Every block, element, composition object and surface the evaluator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    Confirm,
    Option,
    OptionGroup,
    Button,
    Checkboxes,
    Datepicker,
    Datetimepicker,
    EmailTextInput,
    Image,
    MultiStaticSelect,
    MultiExternalSelect,
    MultiUsersSelect,
    MultiConversationsSelect,
    MultiChannelsSelect,
    NumberInput,
    Overflow,
    PlainTextInput,
    RadioButtons,
    StaticSelect,
    ExternalSelect,
    UsersSelect,
    ConversationsSelect,
    ChannelsSelect,
    Timepicker,
    UrlTextInput,
    WorkflowButton,
    PlainText,
    Mrkdwn,
    Modal,
    Home,
    Header,
    Actions,
    Context,
    Divider,
    Input,
    Section,
    Video,
    /// Escape hatch: the `value` prop is emitted verbatim.
    Raw,
}

const ALL: [Intrinsic; 38] = [
    Intrinsic::Confirm,
    Intrinsic::Option,
    Intrinsic::OptionGroup,
    Intrinsic::Button,
    Intrinsic::Checkboxes,
    Intrinsic::Datepicker,
    Intrinsic::Datetimepicker,
    Intrinsic::EmailTextInput,
    Intrinsic::Image,
    Intrinsic::MultiStaticSelect,
    Intrinsic::MultiExternalSelect,
    Intrinsic::MultiUsersSelect,
    Intrinsic::MultiConversationsSelect,
    Intrinsic::MultiChannelsSelect,
    Intrinsic::NumberInput,
    Intrinsic::Overflow,
    Intrinsic::PlainTextInput,
    Intrinsic::RadioButtons,
    Intrinsic::StaticSelect,
    Intrinsic::ExternalSelect,
    Intrinsic::UsersSelect,
    Intrinsic::ConversationsSelect,
    Intrinsic::ChannelsSelect,
    Intrinsic::Timepicker,
    Intrinsic::UrlTextInput,
    Intrinsic::WorkflowButton,
    Intrinsic::PlainText,
    Intrinsic::Mrkdwn,
    Intrinsic::Modal,
    Intrinsic::Home,
    Intrinsic::Header,
    Intrinsic::Actions,
    Intrinsic::Context,
    Intrinsic::Divider,
    Intrinsic::Input,
    Intrinsic::Section,
    Intrinsic::Video,
    Intrinsic::Raw,
];

/// Props holding exactly one renderable child.
const SINGLE_CHILD_PROPS: [&str; 13] = [
    "title",
    "text",
    "confirm",
    "deny",
    "description",
    "label",
    "placeholder",
    "initial_option",
    "close",
    "submit",
    "element",
    "hint",
    "accessory",
];

/// Props holding a sequence of renderable children.
const MULTI_CHILD_PROPS: [&str; 7] = [
    "children",
    "options",
    "initial_options",
    "option_groups",
    "elements",
    "fields",
    "blocks",
];

impl Intrinsic {
    /// Wire tag, as emitted under the `type` key.
    pub fn as_str(self) -> &'static str {
        match self {
            Intrinsic::Confirm => "confirm",
            Intrinsic::Option => "option",
            Intrinsic::OptionGroup => "option_group",
            Intrinsic::Button => "button",
            Intrinsic::Checkboxes => "checkboxes",
            Intrinsic::Datepicker => "datepicker",
            Intrinsic::Datetimepicker => "datetimepicker",
            Intrinsic::EmailTextInput => "email_text_input",
            Intrinsic::Image => "image",
            Intrinsic::MultiStaticSelect => "multi_static_select",
            Intrinsic::MultiExternalSelect => "multi_external_select",
            Intrinsic::MultiUsersSelect => "multi_users_select",
            Intrinsic::MultiConversationsSelect => "multi_conversations_select",
            Intrinsic::MultiChannelsSelect => "multi_channels_select",
            Intrinsic::NumberInput => "number_input",
            Intrinsic::Overflow => "overflow",
            Intrinsic::PlainTextInput => "plain_text_input",
            Intrinsic::RadioButtons => "radio_buttons",
            Intrinsic::StaticSelect => "static_select",
            Intrinsic::ExternalSelect => "external_select",
            Intrinsic::UsersSelect => "users_select",
            Intrinsic::ConversationsSelect => "conversations_select",
            Intrinsic::ChannelsSelect => "channels_select",
            Intrinsic::Timepicker => "timepicker",
            Intrinsic::UrlTextInput => "url_text_input",
            Intrinsic::WorkflowButton => "workflow_button",
            Intrinsic::PlainText => "plain_text",
            Intrinsic::Mrkdwn => "mrkdwn",
            Intrinsic::Modal => "modal",
            Intrinsic::Home => "home",
            Intrinsic::Header => "header",
            Intrinsic::Actions => "actions",
            Intrinsic::Context => "context",
            Intrinsic::Divider => "divider",
            Intrinsic::Input => "input",
            Intrinsic::Section => "section",
            Intrinsic::Video => "video",
            Intrinsic::Raw => "raw",
        }
    }

    /// Destination field for the conventional `children` prop.
    pub fn children_field(self) -> Option<&'static str> {
        match self {
            Intrinsic::Confirm
            | Intrinsic::Option
            | Intrinsic::Button
            | Intrinsic::WorkflowButton
            | Intrinsic::Header
            | Intrinsic::Section
            | Intrinsic::Mrkdwn
            | Intrinsic::PlainText => Some("text"),
            Intrinsic::OptionGroup
            | Intrinsic::Checkboxes
            | Intrinsic::Overflow
            | Intrinsic::RadioButtons => Some("options"),
            Intrinsic::Modal | Intrinsic::Home => Some("blocks"),
            Intrinsic::Actions | Intrinsic::Context => Some("elements"),
            Intrinsic::Input => Some("element"),
            Intrinsic::Video => Some("title"),
            _ => None,
        }
    }

    /// Composition objects emitted without a `type` tag.
    pub fn is_typeless(self) -> bool {
        matches!(
            self,
            Intrinsic::Confirm | Intrinsic::Option | Intrinsic::OptionGroup
        )
    }

    /// Text leaves whose children fold into a single string.
    pub fn is_text(self) -> bool {
        matches!(self, Intrinsic::PlainText | Intrinsic::Mrkdwn)
    }

    pub fn all() -> &'static [Intrinsic] {
        &ALL
    }
}

/// Whether a prop carries renderable children at all.
pub fn is_child_prop(name: &str) -> bool {
    SINGLE_CHILD_PROPS.contains(&name) || MULTI_CHILD_PROPS.contains(&name)
}

/// Whether a (destination) prop holds a sequence of children.
pub fn is_multi_child_prop(name: &str) -> bool {
    MULTI_CHILD_PROPS.contains(&name)
}

impl fmt::Display for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a tag that names no known primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element kind '{0}'")]
pub struct UnknownIntrinsic(pub String);

impl FromStr for Intrinsic {
    type Err = UnknownIntrinsic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownIntrinsic(s.to_string()))
    }
}
