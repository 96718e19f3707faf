//! Categorical transaction attributes not tied to any scenario logic.
//! Each is drawn fresh per row from its fixed table.

use crate::weighted::Weighted;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Weighted for Gender {
    const TABLE: &'static [(Self, f64)] = &[(Gender::Male, 0.5), (Gender::Female, 0.5)];
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
        }
    }
}

/// Brazilian retail account kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Corrente,
    Poupanca,
    Salario,
    Pagamento,
}

impl Weighted for AccountType {
    const TABLE: &'static [(Self, f64)] = &[
        (AccountType::Corrente, 0.4),
        (AccountType::Poupanca, 0.2),
        (AccountType::Salario, 0.2),
        (AccountType::Pagamento, 0.2),
    ];
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Corrente => "corrente",
            Self::Poupanca => "poupanca",
            Self::Salario => "salario",
            Self::Pagamento => "pagamento",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Cellphone,
    Desktop,
}

impl Weighted for DeviceClass {
    const TABLE: &'static [(Self, f64)] =
        &[(DeviceClass::Cellphone, 0.8), (DeviceClass::Desktop, 0.2)];
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cellphone => "cellphone",
            Self::Desktop => "desktop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceOs {
    Myos,
    Bot,
    Bluescreen,
    Cheeseos,
    Penguin,
}

impl Weighted for DeviceOs {
    const TABLE: &'static [(Self, f64)] = &[
        (DeviceOs::Myos, 0.2),
        (DeviceOs::Bot, 0.5),
        (DeviceOs::Bluescreen, 0.1),
        (DeviceOs::Cheeseos, 0.1),
        (DeviceOs::Penguin, 0.1),
    ];
}

impl DeviceOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Myos => "myos",
            Self::Bot => "bot",
            Self::Bluescreen => "bluescreen",
            Self::Cheeseos => "cheeseos",
            Self::Penguin => "penguin",
        }
    }
}

/// Payment rail. Always chosen by the scenario, never drawn per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxnType {
    Pix,
    Ted,
    Boleto,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pix => "pix",
            Self::Ted => "ted",
            Self::Boleto => "boleto",
        }
    }
}
