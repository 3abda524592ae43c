//! The three UEN formats and their reference definitions.

use serde::{Deserialize, Serialize};

/// UEN format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UenFormat {
    /// Businesses registered with ACRA: `nnnnnnnnX`.
    A,
    /// Local companies registered with ACRA: `yyyynnnnnX`.
    B,
    /// All other entities: `TyyPQnnnnX`.
    C,
}

impl UenFormat {
    pub const ALL: [UenFormat; 3] = [UenFormat::A, UenFormat::B, UenFormat::C];

    /// Human-readable description of who is issued this format.
    pub fn description(&self) -> &'static str {
        match self {
            Self::A => "Businesses registered with ACRA",
            Self::B => "Local companies registered with ACRA",
            Self::C => "All other entities that will be issued new UEN",
        }
    }

    /// Regular expression the cleaned UEN must match.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::A => r"^[0-9]{8}[A-Z]$",
            Self::B => r"^(19|20)[0-9]{2}[0-9]{5}[A-Z]$",
            Self::C => r"^[A-Z][0-9]{2}[A-Z][A-Z0-9][0-9]{4}[A-Z]$",
        }
    }

    /// Short layout used in help text.
    pub fn layout(&self) -> &'static str {
        match self {
            Self::A => "nnnnnnnnX",
            Self::B => "yyyynnnnnX",
            Self::C => "TyyPQnnnnX",
        }
    }

    pub fn length(&self) -> usize {
        match self {
            Self::A => 9,
            Self::B | Self::C => 10,
        }
    }

    pub fn example(&self) -> &'static str {
        match self {
            Self::A => "12345678A",
            Self::B => "200912345A",
            Self::C => "T09LL0001B",
        }
    }

    pub fn definition(&self) -> FormatDefinition {
        FormatDefinition {
            format: *self,
            description: self.description(),
            layout: self.layout(),
            pattern: self.pattern(),
            length: self.length(),
            example: self.example(),
        }
    }
}

impl std::fmt::Display for UenFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
        }
    }
}

/// Reference data for one format, suitable for rendering help text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatDefinition {
    pub format: UenFormat,
    pub description: &'static str,
    pub layout: &'static str,
    pub pattern: &'static str,
    pub length: usize,
    pub example: &'static str,
}

/// Examples for every format plus the entity type table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatExamples {
    pub formats: Vec<FormatDefinition>,
    pub entity_types: Vec<EntityTypeEntry>,
    pub notes: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityTypeEntry {
    pub code: &'static str,
    pub description: &'static str,
}

/// All format definitions in evaluation order.
pub fn format_definitions() -> Vec<FormatDefinition> {
    UenFormat::ALL.iter().map(UenFormat::definition).collect()
}

/// Static reference data for the three formats.
pub fn format_examples() -> FormatExamples {
    FormatExamples {
        formats: format_definitions(),
        entity_types: crate::entity_types::ENTITY_TYPES
            .iter()
            .map(|&(code, description)| EntityTypeEntry { code, description })
            .collect(),
        notes: vec![
            "Input is trimmed and converted to uppercase before validation",
            "Format B years must fall between 1900 and 2099",
            "Format C must start with a valid entity type initial",
            "Check letters are not verified",
        ],
    }
}
