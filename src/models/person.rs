use serde::Serialize;

/// Closed set of attendance populations.
///
/// Scan tags carry a one-letter prefix ('s' = student, 'p' = employee);
/// the employee role comes from the directory. Matching on this enum is
/// exhaustive, so there is no "unknown role" fallthrough at runtime.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Population {
    Student,
    Teacher,
    Staff,
    Security,
}

impl Population {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Population::Student => "student",
            Population::Teacher => "teacher",
            Population::Staff => "staff",
            Population::Security => "security",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Population::Student),
            "teacher" => Some(Population::Teacher),
            "staff" => Some(Population::Staff),
            "security" => Some(Population::Security),
            _ => None,
        }
    }

    /// Display label used in report columns (Role / Kelas).
    pub fn label(&self) -> &'static str {
        match self {
            Population::Student => "Siswa",
            Population::Teacher => "Guru",
            Population::Staff => "Staf",
            Population::Security => "Keamanan",
        }
    }

    pub fn is_student(&self) -> bool {
        matches!(self, Population::Student)
    }

    pub fn is_security(&self) -> bool {
        matches!(self, Population::Security)
    }

    /// Employees share one attendance ledger scope; students another.
    pub fn is_employee(&self) -> bool {
        !self.is_student()
    }
}

/// Read-only reference data from the person directory.
#[derive(Debug, Clone, Serialize)]
pub struct Person {
    pub id: i64,
    pub key: String, // natural key: NIS (students) or staff ID
    pub name: String,
    pub population: Population,
    pub class_name: Option<String>,     // students only
    pub guardian_phone: Option<String>, // scan notification target, students only
}

impl Person {
    /// Value of the report "group" column: class for students, role label
    /// for employees.
    pub fn group_label(&self) -> String {
        if self.population.is_student() {
            self.class_name.clone().unwrap_or_else(|| "N/A".to_string())
        } else {
            self.population.label().to_string()
        }
    }
}
