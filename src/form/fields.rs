//! Form fields and the type-driven visibility machine.

use crate::types::CheckType;

/// Every element of the check form, including the two action buttons.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FormField {
    Id,
    Name,
    Server,
    CheckType,
    CheckCategory,
    Service,
    Url,
    Program,
    InstanceCount,
    Database,
    Company,
    BusinessUnit,
    System,
    JobId,
    ObjectType,
    ObjectId,
    Save,
    Back,
}

/// Focus traversal order, top of the form to the action row.
pub const FOCUS_ORDER: &[FormField] = &[
    FormField::Id,
    FormField::Name,
    FormField::Server,
    FormField::CheckType,
    FormField::CheckCategory,
    FormField::Service,
    FormField::Url,
    FormField::Program,
    FormField::InstanceCount,
    FormField::Database,
    FormField::ObjectType,
    FormField::ObjectId,
    FormField::JobId,
    FormField::Company,
    FormField::BusinessUnit,
    FormField::System,
    FormField::Save,
    FormField::Back,
];

/// Fields shown or hidden depending on the selected check type.
pub const HIDABLE_FIELDS: &[FormField] = &[
    FormField::Service,
    FormField::Url,
    FormField::Program,
    FormField::InstanceCount,
    FormField::Database,
    FormField::ObjectType,
    FormField::ObjectId,
    FormField::JobId,
];

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Id => "ID",
            FormField::Name => "Name",
            FormField::Server => "Server",
            FormField::CheckType => "Check type",
            FormField::CheckCategory => "Check category",
            FormField::Service => "Service",
            FormField::Url => "URL",
            FormField::Program => "Program",
            FormField::InstanceCount => "Instance count",
            FormField::Database => "Database",
            FormField::Company => "Company",
            FormField::BusinessUnit => "Business unit",
            FormField::System => "System",
            FormField::JobId => "Job ID",
            FormField::ObjectType => "Object type",
            FormField::ObjectId => "Object ID",
            FormField::Save => "Save",
            FormField::Back => "Back",
        }
    }

    /// Selector fields cycle through known values instead of taking typed text.
    pub fn is_selector(self) -> bool {
        matches!(self, FormField::CheckType | FormField::ObjectType)
    }

    pub fn is_action(self) -> bool {
        matches!(self, FormField::Save | FormField::Back)
    }
}

/// The field groups revealed for a given check type. No type, or an
/// unrecognized one, reveals nothing.
pub fn visible_fields(check_type: Option<CheckType>) -> &'static [FormField] {
    match check_type {
        Some(CheckType::Job) => &[
            FormField::Database,
            FormField::ObjectType,
            FormField::ObjectId,
        ],
        Some(CheckType::Service) => &[FormField::Service],
        Some(CheckType::Program) => &[FormField::Program, FormField::InstanceCount],
        Some(CheckType::Ssis) => &[FormField::JobId],
        Some(CheckType::Url) => &[FormField::Url],
        None => &[],
    }
}

/// Which hidable fields are currently hidden.
///
/// Starts with everything hidden; `apply` runs the same transition for every
/// state: hide all hidables, then reveal exactly the groups mapped to the
/// selector's current text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FieldVisibility {
    hidden: Vec<FormField>,
}

impl Default for FieldVisibility {
    fn default() -> Self {
        Self {
            hidden: HIDABLE_FIELDS.to_vec(),
        }
    }
}

impl FieldVisibility {
    pub fn apply(&mut self, selector_text: &str) {
        let revealed = visible_fields(CheckType::from_wire(selector_text));
        self.hidden = HIDABLE_FIELDS
            .iter()
            .copied()
            .filter(|field| !revealed.contains(field))
            .collect();
    }

    pub fn is_hidden(&self, field: FormField) -> bool {
        self.hidden.contains(&field)
    }

    pub fn is_visible(&self, field: FormField) -> bool {
        !self.is_hidden(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visibility_after(selector: &str) -> FieldVisibility {
        let mut visibility = FieldVisibility::default();
        visibility.apply(selector);
        visibility
    }

    fn assert_exactly_visible(selector: &str, expected: &[FormField]) {
        let visibility = visibility_after(selector);
        for field in HIDABLE_FIELDS {
            assert_eq!(
                visibility.is_visible(*field),
                expected.contains(field),
                "selector {selector:?}: unexpected visibility for {field:?}"
            );
        }
    }

    #[test]
    fn each_type_reveals_exactly_its_groups() {
        assert_exactly_visible(
            "JOB",
            &[
                FormField::Database,
                FormField::ObjectType,
                FormField::ObjectId,
            ],
        );
        assert_exactly_visible("SERVICE", &[FormField::Service]);
        assert_exactly_visible("PROGRAM", &[FormField::Program, FormField::InstanceCount]);
        assert_exactly_visible("SSIS", &[FormField::JobId]);
        assert_exactly_visible("URL", &[FormField::Url]);
    }

    #[test]
    fn unrecognized_selector_hides_every_group() {
        assert_exactly_visible("", &[]);
        assert_exactly_visible("DISK", &[]);
        assert_exactly_visible("job", &[]);
    }

    #[test]
    fn transitions_replace_previous_reveals() {
        let mut visibility = FieldVisibility::default();
        visibility.apply("PROGRAM");
        assert!(visibility.is_visible(FormField::Program));

        visibility.apply("URL");
        assert!(visibility.is_hidden(FormField::Program));
        assert!(visibility.is_hidden(FormField::InstanceCount));
        assert!(visibility.is_visible(FormField::Url));
    }

    #[test]
    fn default_state_hides_all_hidables() {
        let visibility = FieldVisibility::default();
        for field in HIDABLE_FIELDS {
            assert!(visibility.is_hidden(*field));
        }
    }

    #[test]
    fn non_hidable_fields_are_always_visible() {
        let visibility = visibility_after("");
        assert!(visibility.is_visible(FormField::Name));
        assert!(visibility.is_visible(FormField::CheckCategory));
        assert!(visibility.is_visible(FormField::Save));
    }
}
