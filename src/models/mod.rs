use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::TallyError;

// Sentinel accepted wherever a department filter is optional
pub const ALL_DEPARTMENTS: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "La_Paz")]
    LaPaz,
    Cochabamba,
    #[serde(rename = "Santa_Cruz")]
    SantaCruz,
    Oruro,
    #[serde(rename = "Potosí")]
    Potosi,
    Chuquisaca,
    Tarija,
    Pando,
    Beni,
}

impl Department {
    // Enumeration order is also the output order of the winners query
    pub const ALL: [Department; 9] = [
        Department::LaPaz,
        Department::Cochabamba,
        Department::SantaCruz,
        Department::Oruro,
        Department::Potosi,
        Department::Chuquisaca,
        Department::Tarija,
        Department::Pando,
        Department::Beni,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::LaPaz => "La_Paz",
            Department::Cochabamba => "Cochabamba",
            Department::SantaCruz => "Santa_Cruz",
            Department::Oruro => "Oruro",
            Department::Potosi => "Potosí",
            Department::Chuquisaca => "Chuquisaca",
            Department::Tarija => "Tarija",
            Department::Pando => "Pando",
            Department::Beni => "Beni",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .iter()
            .find(|department| department.as_str() == s)
            .copied()
            .ok_or_else(|| TallyError::UnknownDepartment(s.to_string()))
    }
}

/// Which departments a totals query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentScope {
    All,
    Single(Department),
}

impl DepartmentScope {
    /// Parses an optional filter; `None` and `"all"` both mean every department.
    pub fn parse(filter: Option<&str>) -> Result<Self, TallyError> {
        match filter {
            None => Ok(DepartmentScope::All),
            Some(name) if name.eq_ignore_ascii_case(ALL_DEPARTMENTS) => Ok(DepartmentScope::All),
            Some(name) => Ok(DepartmentScope::Single(name.parse()?)),
        }
    }

    pub fn departments(&self) -> &[Department] {
        match self {
            DepartmentScope::All => &Department::ALL,
            DepartmentScope::Single(department) => std::slice::from_ref(department),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyStatus {
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "inactivo")]
    Inactive,
}

impl PartyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyStatus::Active => "activo",
            PartyStatus::Inactive => "inactivo",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub status: PartyStatus,
}

impl Party {
    pub fn is_active(&self) -> bool {
        self.status == PartyStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyInfo {
    pub name: String,
    pub abbreviation: String,
}

/// Active parties keyed by id. Ordered so that ties resolve the same way on every call.
pub type PartyDirectoryMap = BTreeMap<String, PartyInfo>;

/// Vote counts keyed by party id, in directory order.
pub type VoteCounts = BTreeMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResult {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "sigla")]
    pub abbreviation: String,
    #[serde(rename = "votos")]
    pub votes: i64,
    #[serde(rename = "porcentaje")]
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentWinner {
    pub department: Department,
    pub partido_ganador: String,
    pub sigla: String,
    pub porcentaje: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub user_id: String,
    pub accion: String,
    pub id_mesa: String,
    pub fecha_hora: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partido_afectado: Option<String>,
}
