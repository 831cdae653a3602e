//! The five ordered stages of the porting intake flow

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the intake flow, numbered 1 through 5
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Phone number entry and verification method
    #[default]
    Number,
    /// Tariff plan selection
    Tariff,
    /// Physical SIM or eSIM
    Sim,
    /// Delivery of the physical SIM (skipped for eSIM)
    Delivery,
    /// Read-only summary of the collected request
    Status,
}

impl Stage {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [Stage] {
        &[
            Stage::Number,
            Stage::Tariff,
            Stage::Sim,
            Stage::Delivery,
            Stage::Status,
        ]
    }

    /// 1-based position in the flow
    pub fn index(self) -> u8 {
        match self {
            Stage::Number => 1,
            Stage::Tariff => 2,
            Stage::Sim => 3,
            Stage::Delivery => 4,
            Stage::Status => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Stage> {
        match index {
            1 => Some(Stage::Number),
            2 => Some(Stage::Tariff),
            3 => Some(Stage::Sim),
            4 => Some(Stage::Delivery),
            5 => Some(Stage::Status),
            _ => None,
        }
    }

    /// Caption shown under the stepper bubble
    pub fn label(self) -> &'static str {
        match self {
            Stage::Number => "Номер",
            Stage::Tariff => "Тариф",
            Stage::Sim => "SIM-карта",
            Stage::Delivery => "Доставка",
            Stage::Status => "Статус",
        }
    }

    /// Title of the stage panel
    pub fn title(self) -> &'static str {
        match self {
            Stage::Number => "Phone Number",
            Stage::Tariff => "Tariff",
            Stage::Sim => "SIM Type",
            Stage::Delivery => "Delivery",
            Stage::Status => "Request Status",
        }
    }

    /// Linear successor, ignoring any branch rules
    pub fn next(self) -> Option<Stage> {
        Stage::from_index(self.index() + 1)
    }

    /// Linear predecessor
    pub fn prev(self) -> Option<Stage> {
        self.index().checked_sub(1).and_then(Stage::from_index)
    }

    pub fn is_initial(self) -> bool {
        self == Stage::Number
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Status
    }

    /// Zero-based slot for table lookups
    pub(crate) fn slot(self) -> usize {
        usize::from(self.index() - 1)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.title())
    }
}
