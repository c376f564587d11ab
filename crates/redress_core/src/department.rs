//! Category-to-department routing.
//!
//! Total lookup: every known category has a fixed department and anything
//! else routes to General Administration. No partial matching and no case
//! normalization beyond what the classifier already emits.

use crate::types::Category;

/// Fallback for categories outside the routing table.
pub const FALLBACK_DEPARTMENT: &str = "General Administration";

/// Contact details for a department, shown on submissions and reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentContact {
    pub phone: &'static str,
    pub email: &'static str,
    pub office_hours: &'static str,
}

/// Resolve the responsible department for a category.
pub fn department_for(category: &Category) -> &'static str {
    match category {
        Category::Sanitation => "Municipal Sanitation Department",
        Category::Utilities => "Electricity & Water Department",
        Category::Healthcare => "Health & Medical Services",
        Category::PublicSafety => "Police & Security Department",
        Category::Infrastructure => "Public Works Department",
        Category::Administration => "District Administration Office",
        Category::Other(_) => FALLBACK_DEPARTMENT,
    }
}

/// Contact information for a resolved department, with a generic
/// grievance-cell fallback for departments outside the directory.
pub fn contact_for(department: &str) -> DepartmentContact {
    match department {
        "Municipal Sanitation Department" => DepartmentContact {
            phone: "+91-1234-567890",
            email: "sanitation@municipality.gov.in",
            office_hours: "9:00 AM - 6:00 PM",
        },
        "Electricity & Water Department" => DepartmentContact {
            phone: "+91-1234-567891",
            email: "utilities@municipality.gov.in",
            office_hours: "24/7 Emergency Hotline",
        },
        "Health & Medical Services" => DepartmentContact {
            phone: "+91-1234-567892",
            email: "health@municipality.gov.in",
            office_hours: "24/7 Emergency Services",
        },
        "Police & Security Department" => DepartmentContact {
            phone: "100 (Emergency)",
            email: "security@police.gov.in",
            office_hours: "24/7 Emergency Hotline",
        },
        "Public Works Department" => DepartmentContact {
            phone: "+91-1234-567893",
            email: "pwd@municipality.gov.in",
            office_hours: "9:00 AM - 6:00 PM",
        },
        "District Administration Office" => DepartmentContact {
            phone: "+91-1234-567894",
            email: "admin@district.gov.in",
            office_hours: "9:00 AM - 5:00 PM",
        },
        _ => DepartmentContact {
            phone: "+91-1234-567800",
            email: "grievance@municipality.gov.in",
            office_hours: "9:00 AM - 5:00 PM",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_resolve_to_table_entries() {
        assert_eq!(
            department_for(&Category::Sanitation),
            "Municipal Sanitation Department"
        );
        assert_eq!(
            department_for(&Category::Utilities),
            "Electricity & Water Department"
        );
        assert_eq!(
            department_for(&Category::Healthcare),
            "Health & Medical Services"
        );
        assert_eq!(
            department_for(&Category::PublicSafety),
            "Police & Security Department"
        );
        assert_eq!(
            department_for(&Category::Infrastructure),
            "Public Works Department"
        );
        assert_eq!(
            department_for(&Category::Administration),
            "District Administration Office"
        );
    }

    #[test]
    fn unknown_category_falls_back() {
        let category = Category::Other("General".to_string());
        assert_eq!(department_for(&category), FALLBACK_DEPARTMENT);
    }

    #[test]
    fn every_routed_department_has_a_contact() {
        for category in [
            Category::Sanitation,
            Category::Utilities,
            Category::Healthcare,
            Category::PublicSafety,
            Category::Infrastructure,
            Category::Administration,
        ] {
            let contact = contact_for(department_for(&category));
            assert!(contact.email.contains('@'));
            assert!(!contact.phone.is_empty());
        }
    }

    #[test]
    fn unknown_department_gets_generic_contact() {
        let contact = contact_for(FALLBACK_DEPARTMENT);
        assert_eq!(contact.email, "grievance@municipality.gov.in");
    }
}
