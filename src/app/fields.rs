//! Form field layout per resource and the conversion from raw field text to drafts.

use crate::api::{Entity, Product, ProductDraft, User, UserDraft};

/// How a field is edited and shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Rendered masked.
    Secret,
    /// Checkbox, flipped with Space.
    Toggle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Requirement {
    Always,
    OnCreate,
    Optional,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    pub fn verb(self) -> &'static str {
        match self {
            FormMode::Create => "create",
            FormMode::Edit => "update",
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct FieldSpec {
    pub label: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
    pub hint: Hint,
}

/// Extra text shown after a field label.
#[derive(Copy, Clone, Debug)]
pub enum Hint {
    None,
    Always(&'static str),
    In(FormMode, &'static str),
}

impl FieldSpec {
    const fn text(label: &'static str, requirement: Requirement) -> Self {
        Self { label, kind: FieldKind::Text, requirement, hint: Hint::None }
    }

    pub fn hint(&self, mode: FormMode) -> Option<&'static str> {
        match self.hint {
            Hint::Always(h) => Some(h),
            Hint::In(m, h) if m == mode => Some(h),
            _ => None,
        }
    }

    pub fn is_required(&self, mode: FormMode) -> bool {
        match self.requirement {
            Requirement::Always => true,
            Requirement::OnCreate => mode == FormMode::Create,
            Requirement::Optional => false,
        }
    }
}

/// Raw state of one field: text for text/secret fields, a flag for toggles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }

    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }
}

/// An entity that can be edited through a form.
pub trait Editable: Entity {
    const FIELDS: &'static [FieldSpec];

    fn blank_values() -> Vec<FieldValue>;

    /// Field values shown when `self` becomes the edit target.
    fn fill_values(&self) -> Vec<FieldValue>;

    /// Build a draft from field values that already passed the required-field check.
    fn draft_from(values: &[FieldValue], mode: FormMode) -> Result<Self::Draft, String>;
}

/// Split comma separated tags, trimming each and dropping empty segments. Order is kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_tags`] for pre-filling.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Parse a price typed by the user; must be a finite, non-negative number.
pub fn parse_price(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err("Price must be a non-negative number".to_string()),
    }
}

fn text(v: &str) -> FieldValue {
    FieldValue::Text(v.to_string())
}

const P_NAME: usize = 0;
const P_DESCRIPTION: usize = 1;
const P_PRICE: usize = 2;
const P_CATEGORY: usize = 3;
const P_TAGS: usize = 4;
const P_IN_STOCK: usize = 5;

impl Editable for Product {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("Product Name", Requirement::Always),
        FieldSpec::text("Description", Requirement::Always),
        FieldSpec::text("Price", Requirement::Always),
        FieldSpec::text("Category", Requirement::Always),
        FieldSpec {
            label: "Tags",
            kind: FieldKind::Text,
            requirement: Requirement::Optional,
            hint: Hint::Always("(comma-separated)"),
        },
        FieldSpec {
            label: "In Stock",
            kind: FieldKind::Toggle,
            requirement: Requirement::Optional,
            hint: Hint::None,
        },
    ];

    fn blank_values() -> Vec<FieldValue> {
        vec![text(""), text(""), text(""), text(""), text(""), FieldValue::Flag(true)]
    }

    fn fill_values(&self) -> Vec<FieldValue> {
        vec![
            text(&self.name),
            text(&self.description),
            text(&self.price.to_string()),
            text(&self.category),
            text(&join_tags(&self.tags)),
            FieldValue::Flag(self.in_stock),
        ]
    }

    fn draft_from(values: &[FieldValue], _mode: FormMode) -> Result<ProductDraft, String> {
        Ok(ProductDraft {
            name: values[P_NAME].as_text().to_string(),
            description: values[P_DESCRIPTION].as_text().to_string(),
            price: parse_price(values[P_PRICE].as_text())?,
            category: values[P_CATEGORY].as_text().to_string(),
            tags: parse_tags(values[P_TAGS].as_text()),
            in_stock: values[P_IN_STOCK].as_flag(),
        })
    }
}

const U_NAME: usize = 0;
const U_EMAIL: usize = 1;
const U_PASSWORD: usize = 2;

impl Editable for User {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("Name", Requirement::Always),
        FieldSpec::text("Email", Requirement::Always),
        FieldSpec {
            label: "Password",
            kind: FieldKind::Secret,
            requirement: Requirement::OnCreate,
            hint: Hint::In(FormMode::Edit, "(leave blank to keep current)"),
        },
    ];

    fn blank_values() -> Vec<FieldValue> {
        vec![text(""), text(""), text("")]
    }

    fn fill_values(&self) -> Vec<FieldValue> {
        vec![text(&self.name), text(&self.email), text("")]
    }

    fn draft_from(values: &[FieldValue], mode: FormMode) -> Result<UserDraft, String> {
        let email = values[U_EMAIL].as_text().trim();
        if !looks_like_email(email) {
            return Err("Email must look like name@domain".to_string());
        }
        // whitespace-only counts as blank, as in the required-field check
        let password = values[U_PASSWORD].as_text();
        let password = match mode {
            FormMode::Edit if password.trim().is_empty() => None,
            _ => Some(password.to_string()),
        };
        Ok(UserDraft {
            name: values[U_NAME].as_text().to_string(),
            email: email.to_string(),
            password,
        })
    }
}

/// Same shape check an `<input type="email">` applies: one `@` with text on both sides.
fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !s.contains(char::is_whitespace)
        }
        None => false,
    }
}
