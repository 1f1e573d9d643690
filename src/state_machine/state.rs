//! Conversation state types

use std::fmt;

/// Consultation format chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultFormat {
    Online,
    InPerson,
}

impl ConsultFormat {
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::Online),
            "2" => Some(Self::InPerson),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Онлайн",
            Self::InPerson => "Оффлайн",
        }
    }
}

/// Main financial goal of the consultation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Savings,
    Investment,
    Protection,
    Credit,
}

/// Label used when a goal code is outside the fixed set
pub const UNKNOWN_GOAL_LABEL: &str = "Неизвестно";

impl Goal {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Savings),
            "2" => Some(Self::Investment),
            "3" => Some(Self::Protection),
            "4" => Some(Self::Credit),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Savings => "1",
            Self::Investment => "2",
            Self::Protection => "3",
            Self::Credit => "4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Savings => "Накопления",
            Self::Investment => "Инвестиции",
            Self::Protection => "Защита",
            Self::Credit => "Кредиты",
        }
    }

    /// Label for a raw goal code; unrecognized codes are not an error.
    pub fn label_for_code(code: &str) -> &'static str {
        Self::from_code(code).map_or(UNKNOWN_GOAL_LABEL, Self::label)
    }
}

/// Position in the questionnaire, carrying exactly the answers collected so far
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConvState {
    /// Resting state; shows the main menu
    #[default]
    Menu,
    AwaitName,
    AwaitCity {
        name: String,
    },
    AwaitFormat {
        name: String,
        city: String,
    },
    AwaitGoal {
        name: String,
        city: String,
        format: ConsultFormat,
    },
}

/// Fieldless view of [`ConvState`], used for logging and assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Menu,
    AwaitName,
    AwaitCity,
    AwaitFormat,
    AwaitGoal,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Menu => "menu",
            Stage::AwaitName => "await_name",
            Stage::AwaitCity => "await_city",
            Stage::AwaitFormat => "await_format",
            Stage::AwaitGoal => "await_goal",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers collected so far, flattened out of the state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    pub name: Option<String>,
    pub city: Option<String>,
    pub format: Option<ConsultFormat>,
}

impl SessionData {
    #[allow(dead_code)] // Used by tests
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.city.is_none() && self.format.is_none()
    }
}

impl ConvState {
    pub fn stage(&self) -> Stage {
        match self {
            ConvState::Menu => Stage::Menu,
            ConvState::AwaitName => Stage::AwaitName,
            ConvState::AwaitCity { .. } => Stage::AwaitCity,
            ConvState::AwaitFormat { .. } => Stage::AwaitFormat,
            ConvState::AwaitGoal { .. } => Stage::AwaitGoal,
        }
    }

    pub fn data(&self) -> SessionData {
        match self {
            ConvState::Menu | ConvState::AwaitName => SessionData::default(),
            ConvState::AwaitCity { name } => SessionData {
                name: Some(name.clone()),
                ..SessionData::default()
            },
            ConvState::AwaitFormat { name, city } => SessionData {
                name: Some(name.clone()),
                city: Some(city.clone()),
                format: None,
            },
            ConvState::AwaitGoal { name, city, format } => SessionData {
                name: Some(name.clone()),
                city: Some(city.clone()),
                format: Some(*format),
            },
        }
    }
}

/// Per-user session record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub state: ConvState,
}

impl Session {
    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    #[allow(dead_code)] // Inspection API, used by tests
    pub fn data(&self) -> SessionData {
        self.state.data()
    }
}

/// Context for a single dispatch: who the conversation is with
#[derive(Debug, Clone)]
pub struct ConvContext {
    /// Bare user identifier (phone number without transport prefix)
    pub phone: String,
}

impl ConvContext {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
        }
    }
}
