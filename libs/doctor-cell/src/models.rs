use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==============================================================================
// CATALOG MODELS
// ==============================================================================

/// A department and its doctors, in the order front ends should list them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub doctors: Vec<String>,
}

impl Department {
    pub fn new<I, S>(name: impl Into<String>, doctors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            doctors: doctors.into_iter().map(Into::into).collect(),
        }
    }
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentListResponse {
    pub departments: Vec<Department>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDoctorsResponse {
    pub department: String,
    pub doctors: Vec<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read department catalog {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Invalid department catalog {}: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("Department name must not be empty")]
    EmptyDepartmentName,

    #[error("Department '{0}' appears more than once")]
    DuplicateDepartment(String),

    #[error("Department '{0}' has no doctors")]
    EmptyRoster(String),
}
