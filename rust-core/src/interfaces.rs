// Definitions that are used throughout all modules

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

// Enumeration of the lattice sums a request can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum CalculationType {
    Sum,
    Rotate,
    Incommensurate,
}

impl CalculationType {
    pub fn name(&self) -> &'static str {
        match self {
            CalculationType::Sum => "sum",
            CalculationType::Rotate => "rotate",
            CalculationType::Incommensurate => "incommensurate",
        }
    }

    /// Whether the calculation produces one result per angle.
    pub fn is_sweep(&self) -> bool {
        !matches!(self, CalculationType::Sum)
    }
}

impl FromStr for CalculationType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "sum" => Ok(CalculationType::Sum),
            "r" | "rotate" => Ok(CalculationType::Rotate),
            "i" | "incommensurate" => Ok(CalculationType::Incommensurate),
            _ => Err(FieldError::UnknownCalculation(s.to_string())),
        }
    }
}

impl TryFrom<String> for CalculationType {
    type Error = FieldError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CalculationType> for &'static str {
    fn from(calculation: CalculationType) -> Self {
        calculation.name()
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
