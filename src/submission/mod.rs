//! Tool submission intake.
//!
//! `SubmissionForm` holds the fields being composed. `SubmissionFlow` wraps
//! it with the submitting flag and the validate → hand off → reset cycle:
//! an incomplete form is rejected locally with a notification and never
//! reaches the sink; a failed hand-off leaves the form intact for a retry.

use crate::backend::ToolSink;
use crate::domain::{Category, NewTool, Tool};
use crate::error::{Result, ToolifyError};
use crate::notify::{Notification, Notifier};
use log::{debug, info, warn};

/// Fields of the submission form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormField {
    #[default]
    Name,
    Description,
    IconUrl,
    Link,
    Category,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Description,
        FormField::IconUrl,
        FormField::Link,
        FormField::Category,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Tool Name *",
            FormField::Description => "Description *",
            FormField::IconUrl => "Icon URL (optional)",
            FormField::Link => "Tool Link *",
            FormField::Category => "Category *",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Name => "e.g., My Awesome Tool",
            FormField::Description => "Describe what your tool does and why it's useful...",
            FormField::IconUrl => "https://example.com/icon.png",
            FormField::Link => "https://example.com/my-tool",
            FormField::Category => "Select tool category",
        }
    }

    /// Short machine name used in validation messages
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Description => "description",
            FormField::IconUrl => "icon",
            FormField::Link => "link",
            FormField::Category => "category",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, FormField::IconUrl)
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

/// A submission being composed. `category: None` is the transient unset state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub name: String,
    pub description: String,
    pub icon_url: String,
    pub link: String,
    pub category: Option<Category>,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a field; the category reads as its wire name or "".
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Description => self.description.clone(),
            FormField::IconUrl => self.icon_url.clone(),
            FormField::Link => self.link.clone(),
            FormField::Category => self.category.map(|c| c.as_str().to_string()).unwrap_or_default(),
        }
    }

    /// Set a field from text. A blank category unsets it.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<()> {
        match field {
            FormField::Name => self.name = value.to_string(),
            FormField::Description => self.description = value.to_string(),
            FormField::IconUrl => self.icon_url = value.to_string(),
            FormField::Link => self.link = value.to_string(),
            FormField::Category => {
                self.category = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
        }
        Ok(())
    }

    /// Step the category selector: unset → software → plugin → script → unset.
    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Some(Category::Software),
            Some(Category::Software) => Some(Category::Plugin),
            Some(Category::Plugin) => Some(Category::Script),
            Some(Category::Script) => None,
        };
    }

    /// Required fields that are blank, in tab order.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| f.is_required())
            .filter(|f| match f {
                FormField::Category => self.category.is_none(),
                other => self.value(*other).trim().is_empty(),
            })
            .collect()
    }

    /// Turn the form into a submission, or explain what is missing.
    pub fn validate(&self, owner: Option<&str>) -> Result<NewTool> {
        let missing = self.missing_fields();
        let category = match self.category {
            Some(category) if missing.is_empty() => category,
            _ => {
                let keys: Vec<_> = missing.iter().map(|f| f.key()).collect();
                return Err(ToolifyError::ValidationFailed(format!(
                    "missing required fields: {}",
                    keys.join(", ")
                )));
            }
        };

        let icon = self.icon_url.trim();
        Ok(NewTool {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            icon_url: (!icon.is_empty()).then(|| icon.to_string()),
            link: self.link.trim().to_string(),
            category,
            owner: owner.map(str::to_string),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Submission intake state.
#[derive(Debug, Default)]
pub struct SubmissionFlow {
    pub form: SubmissionForm,
    submitting: bool,
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and mark the flow as submitting.
    ///
    /// On a validation failure the notifier gets "Missing fields" and the
    /// flow stays idle.
    pub fn begin_submit<N: Notifier + ?Sized>(&mut self, owner: Option<&str>, notifier: &mut N) -> Result<NewTool> {
        if self.submitting {
            return Err(ToolifyError::SubmissionInProgress);
        }
        match self.form.validate(owner) {
            Ok(tool) => {
                self.submitting = true;
                debug!("Submitting tool {}", tool.name);
                Ok(tool)
            }
            Err(e) => {
                warn!("Submission rejected: {}", e);
                notifier.notify(Notification::missing_fields());
                Err(e)
            }
        }
    }

    /// Apply the sink's answer: clear the form on success, keep it on failure.
    pub fn complete_submit<N: Notifier + ?Sized>(&mut self, result: Result<Tool>, notifier: &mut N) -> Result<Tool> {
        self.submitting = false;
        match result {
            Ok(tool) => {
                info!("Tool {} submitted as {}", tool.name, tool.id);
                self.form.clear();
                notifier.notify(Notification::submitted());
                Ok(tool)
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                notifier.notify(Notification::submission_failed());
                Err(e)
            }
        }
    }

    /// Validate, hand off to `sink`, and apply the result.
    pub async fn submit<K, N>(&mut self, sink: &K, owner: Option<&str>, notifier: &mut N) -> Result<Tool>
    where
        K: ToolSink + ?Sized,
        N: Notifier + ?Sized,
    {
        let tool = self.begin_submit(owner, notifier)?;
        let result = sink.create_tool(tool).await;
        self.complete_submit(result, notifier)
    }
}
