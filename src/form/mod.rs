//! The check form page, shared by the add and edit flows.
//!
//! Both flows are the same controller parameterized by a [`SubmitStrategy`]:
//! creating posts to the add endpoint and writes the returned id back into
//! the form, updating posts to the save endpoint and discards the response.

pub mod fields;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, warn};

use crate::api::CheckApi;
use crate::app::Nav;
use crate::types::{CheckDraft, CheckId, CheckType, ObjectType};

pub use fields::{FOCUS_ORDER, FieldVisibility, FormField, HIDABLE_FIELDS, visible_fields};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FormMode {
    Add,
    Edit,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SubmitOutcome {
    Created(CheckId),
    Updated,
    /// The add flow refused to re-create an already persisted check.
    Skipped,
}

pub trait SubmitStrategy {
    fn mode(&self) -> FormMode;
    fn submit(&self, api: &dyn CheckApi, draft: &CheckDraft) -> Result<SubmitOutcome>;
}

/// Add flow: refuse to save a record that already has a nonzero id, otherwise
/// post to the creation endpoint.
pub struct CreateCheck;

impl SubmitStrategy for CreateCheck {
    fn mode(&self) -> FormMode {
        FormMode::Add
    }

    fn submit(&self, api: &dyn CheckApi, draft: &CheckDraft) -> Result<SubmitOutcome> {
        let id = draft.parsed_id()?;
        if id.is_persisted() {
            debug!(%id, "check already persisted, skipping create");
            return Ok(SubmitOutcome::Skipped);
        }
        api.create_check(draft).map(SubmitOutcome::Created)
    }
}

/// Edit flow: always post the current field values to the update endpoint.
pub struct UpdateCheck;

impl SubmitStrategy for UpdateCheck {
    fn mode(&self) -> FormMode {
        FormMode::Edit
    }

    fn submit(&self, api: &dyn CheckApi, draft: &CheckDraft) -> Result<SubmitOutcome> {
        api.update_check(draft)?;
        Ok(SubmitOutcome::Updated)
    }
}

pub struct FormPage {
    pub draft: CheckDraft,
    pub visibility: FieldVisibility,
    pub focused: FormField,
    pub saving: bool,
    pub status: Option<String>,
    strategy: Box<dyn SubmitStrategy>,
}

impl FormPage {
    pub fn add() -> Self {
        Self::with_strategy(CheckDraft::blank(), Box::new(CreateCheck))
    }

    /// Loads the addressed check into an edit form. A failed load still lands
    /// on the page, with the failure in the status line and the id preserved
    /// so the stepper keeps working.
    pub fn edit(api: &dyn CheckApi, id: CheckId) -> Self {
        match api.fetch_check(id) {
            Ok(draft) => Self::with_strategy(draft, Box::new(UpdateCheck)),
            Err(err) => {
                warn!(%id, error = %format!("{err:#}"), "failed to load check for editing");
                let mut draft = CheckDraft::blank();
                draft.id = id.to_string();
                let mut page = Self::with_strategy(draft, Box::new(UpdateCheck));
                page.status = Some(format!("failed to load check {id}: {err:#}"));
                page
            }
        }
    }

    fn with_strategy(draft: CheckDraft, strategy: Box<dyn SubmitStrategy>) -> Self {
        let mut visibility = FieldVisibility::default();
        // Entry transition: apply the selector's current value on page load.
        visibility.apply(&draft.check_type);
        Self {
            draft,
            visibility,
            focused: FormField::Id,
            saving: false,
            status: None,
            strategy,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.strategy.mode()
    }

    pub fn handle_key(&mut self, key: KeyEvent, api: &dyn CheckApi) -> Nav {
        match key.code {
            KeyCode::Esc => return Nav::ToList,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::PageDown if self.mode() == FormMode::Edit => return self.step(1),
            KeyCode::PageUp if self.mode() == FormMode::Edit => return self.step(-1),
            KeyCode::Left => match self.focused {
                FormField::Save => self.focused = FormField::Back,
                FormField::Back => self.focused = FormField::Save,
                field if field.is_selector() => self.cycle_selector(false),
                _ => {}
            },
            KeyCode::Right => match self.focused {
                FormField::Save => self.focused = FormField::Back,
                FormField::Back => self.focused = FormField::Save,
                field if field.is_selector() => self.cycle_selector(true),
                _ => {}
            },
            KeyCode::Enter => match self.focused {
                FormField::Save => self.save(api),
                FormField::Back => return Nav::ToList,
                field if field.is_selector() => self.cycle_selector(true),
                _ => self.focus_next(),
            },
            KeyCode::Backspace => {
                if let Some(value) = self.focused_text_mut() {
                    value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(value) = self.focused_text_mut() {
                    value.push(ch);
                }
            }
            _ => {}
        }
        Nav::None
    }

    /// Serialize everything, shown or hidden, and submit via the strategy.
    /// Refused while a save is already in flight.
    fn save(&mut self, api: &dyn CheckApi) {
        if self.saving {
            debug!("save ignored, request already in flight");
            return;
        }
        self.saving = true;
        self.status = None;

        match self.strategy.submit(api, &self.draft) {
            Ok(SubmitOutcome::Created(id)) => {
                debug!(%id, "check created, applying server-assigned id");
                self.draft.id = id.to_string();
            }
            Ok(SubmitOutcome::Updated) => {
                debug!(id = %self.draft.id, "check updated");
            }
            Ok(SubmitOutcome::Skipped) => {}
            Err(err) => {
                warn!(error = %format!("{err:#}"), "save failed");
                self.status = Some(format!("save failed: {err:#}"));
            }
        }

        self.saving = false;
    }

    /// Move to the numerically adjacent check. No bounds checking: ids past
    /// either end are the server's to resolve.
    fn step(&mut self, delta: i64) -> Nav {
        match self.draft.parsed_id() {
            Ok(id) => Nav::ToEdit(CheckId(id.0 + delta)),
            Err(err) => {
                self.status = Some(err.to_string());
                Nav::None
            }
        }
    }

    fn focus_next(&mut self) {
        self.focused = self.neighbor_field(1);
    }

    fn focus_previous(&mut self) {
        self.focused = self.neighbor_field(-1);
    }

    /// Nearest visible field in the focus order, wrapping around.
    fn neighbor_field(&self, direction: i64) -> FormField {
        let order_len = FOCUS_ORDER.len() as i64;
        let current = FOCUS_ORDER
            .iter()
            .position(|field| *field == self.focused)
            .unwrap_or(0) as i64;

        for offset in 1..=order_len {
            let index = (current + direction * offset).rem_euclid(order_len) as usize;
            let candidate = FOCUS_ORDER[index];
            if self.visibility.is_visible(candidate) {
                return candidate;
            }
        }
        self.focused
    }

    fn cycle_selector(&mut self, forward: bool) {
        match self.focused {
            FormField::CheckType => {
                self.draft.check_type = cycle_check_type(&self.draft.check_type, forward);
                self.visibility.apply(&self.draft.check_type);
            }
            FormField::ObjectType => {
                self.draft.object_type = cycle_object_type(&self.draft.object_type, forward);
            }
            _ => {}
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        if self.focused.is_selector() || self.focused.is_action() {
            return None;
        }
        draft_value_mut(&mut self.draft, self.focused)
    }
}

/// Cycle through "no type" plus the known check types. Unrecognized text
/// restarts the cycle from "no type".
fn cycle_check_type(current: &str, forward: bool) -> String {
    let mut values = vec![""];
    values.extend(CheckType::ALL.iter().map(|check_type| check_type.as_str()));
    cycle_values(&values, current, forward)
}

fn cycle_object_type(current: &str, forward: bool) -> String {
    let values: Vec<&str> = ObjectType::ALL
        .iter()
        .map(|object_type| object_type.as_str())
        .collect();
    cycle_values(&values, current, forward)
}

fn cycle_values(values: &[&str], current: &str, forward: bool) -> String {
    let len = values.len() as i64;
    let position = values.iter().position(|value| *value == current);
    let next = match (position, forward) {
        (Some(index), true) => (index as i64 + 1).rem_euclid(len),
        (Some(index), false) => (index as i64 - 1).rem_euclid(len),
        (None, _) => 0,
    };
    values[next as usize].to_string()
}

/// Read access to the draft text backing a form field, for rendering.
pub fn draft_value(draft: &CheckDraft, field: FormField) -> Option<&str> {
    Some(match field {
        FormField::Id => &draft.id,
        FormField::Name => &draft.name,
        FormField::Server => &draft.server,
        FormField::CheckType => &draft.check_type,
        FormField::CheckCategory => &draft.check_category,
        FormField::Service => &draft.service,
        FormField::Url => &draft.url,
        FormField::Program => &draft.program,
        FormField::InstanceCount => &draft.instance_count,
        FormField::Database => &draft.database,
        FormField::Company => &draft.company,
        FormField::BusinessUnit => &draft.business_unit,
        FormField::System => &draft.system,
        FormField::JobId => &draft.job_id,
        FormField::ObjectType => &draft.object_type,
        FormField::ObjectId => &draft.object_id,
        FormField::Save | FormField::Back => return None,
    })
}

fn draft_value_mut(draft: &mut CheckDraft, field: FormField) -> Option<&mut String> {
    Some(match field {
        FormField::Id => &mut draft.id,
        FormField::Name => &mut draft.name,
        FormField::Server => &mut draft.server,
        FormField::CheckType => &mut draft.check_type,
        FormField::CheckCategory => &mut draft.check_category,
        FormField::Service => &mut draft.service,
        FormField::Url => &mut draft.url,
        FormField::Program => &mut draft.program,
        FormField::InstanceCount => &mut draft.instance_count,
        FormField::Database => &mut draft.database,
        FormField::Company => &mut draft.company,
        FormField::BusinessUnit => &mut draft.business_unit,
        FormField::System => &mut draft.system,
        FormField::JobId => &mut draft.job_id,
        FormField::ObjectType => &mut draft.object_type,
        FormField::ObjectId => &mut draft.object_id,
        FormField::Save | FormField::Back => return None,
    })
}
