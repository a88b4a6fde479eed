use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::{CatalogError, Department};

const SEED_DEPARTMENTS: &[(&str, &[&str])] = &[
    ("Терапія", &["Іванов І.І.", "Петрова А.С.", "Сидоров М.В."]),
    ("Кардіологія", &["Сердечна В.П.", "Пульсов Д.К."]),
    ("Неврологія", &["Нейронов А.Б.", "Мозгова О.Л."]),
    ("Офтальмологія", &["Глазова О.О.", "Зрачков І.І."]),
    ("Хірургія", &["Скальпелев Р.Р.", "Шовна Н.Н."]),
    ("Педіатрія", &["Дитяча А.А.", "Малишев О.П."]),
    ("Стоматологія", &["Зубов З.З.", "Щетинкіна Д.Д."]),
];

/// Immutable department → doctor roster lookup.
///
/// Built once at startup and shared behind an `Arc`; the default value is the
/// clinic's seven-department seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentCatalog {
    departments: Vec<Department>,
}

impl Default for DepartmentCatalog {
    fn default() -> Self {
        Self {
            departments: SEED_DEPARTMENTS
                .iter()
                .map(|(name, doctors)| Department::new(*name, doctors.iter().copied()))
                .collect(),
        }
    }
}

impl DepartmentCatalog {
    /// Department names are stored trimmed, so lookups match the bare name.
    pub fn new(mut departments: Vec<Department>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();

        for department in &mut departments {
            let name = department.name.trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::EmptyDepartmentName);
            }
            if !seen.insert(name.clone()) {
                return Err(CatalogError::DuplicateDepartment(name));
            }
            if department.doctors.is_empty() {
                return Err(CatalogError::EmptyRoster(name));
            }
            department.name = name;
        }

        Ok(Self { departments })
    }

    /// Read a catalog from a JSON array of `{"name": ..., "doctors": [...]}`.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let departments: Vec<Department> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Parsed {} departments from {}", departments.len(), path.display());
        Self::new(departments)
    }

    pub fn load(config: &AppConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.department_catalog_path {
            Some(path) => {
                info!("Loading department catalog from {}", path.display());
                Self::from_json_file(path)?
            }
            None => Self::default(),
        };

        info!("Department catalog ready with {} departments", catalog.len());
        Ok(catalog)
    }

    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.departments.iter().map(|department| department.name.as_str())
    }

    pub fn entries(&self) -> &[Department] {
        &self.departments
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Doctors of `department` in roster order; empty for an unknown department.
    pub fn doctors_for(&self, department: &str) -> &[String] {
        self.find(department)
            .map(|entry| entry.doctors.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_department(&self, department: &str) -> bool {
        self.find(department).is_some()
    }

    pub fn has_doctor(&self, department: &str, doctor: &str) -> bool {
        self.doctors_for(department).iter().any(|name| name == doctor)
    }

    fn find(&self, department: &str) -> Option<&Department> {
        self.departments.iter().find(|entry| entry.name == department)
    }
}
