//! Input validation: search term trimming and the create-item rule set.
//!
//! Each form field has a static, ordered list of rules. Evaluation stops at
//! the first failing rule and that rule's message is what the user sees.

use std::collections::BTreeMap;

use bazar_api::types::Category;

use crate::error::BazarError;
use crate::form::SelectedFile;

pub const MAX_IMAGES: usize = 5;
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

pub const REQUIRED: &str = "Campo requerido";

/// Trims a search term. Blank terms are rejected; everything else is kept
/// exactly as typed.
pub fn validate_search(input: &str) -> Result<String, BazarError> {
    let term = input.trim();
    if term.is_empty() {
        return Err(BazarError::InvalidInput("search term is empty".to_string()));
    }
    Ok(term.to_string())
}

/// Form fields of the create-item form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Description,
    Price,
    Brand,
    Category,
    Stock,
    Images,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Title,
        Field::Description,
        Field::Price,
        Field::Brand,
        Field::Category,
        Field::Stock,
        Field::Images,
    ];

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Título",
            Field::Description => "Descripción",
            Field::Price => "Precio",
            Field::Brand => "Marca",
            Field::Category => "Categoría",
            Field::Stock => "Stock",
            Field::Images => "Imágenes",
        }
    }
}

/// 2^53. Below it every integer has an exact `f64` form.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Parses a whole number as the user typed it. Plain digits go through `i64`
/// directly; forms like `4.0` or `1e3` are accepted only while the float is
/// exact, so the value sent is always the value entered.
pub fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let n = value.parse::<f64>().ok()?;
    if !n.is_finite() || n.fract() != 0.0 || n.abs() >= MAX_EXACT_FLOAT {
        return None;
    }
    Some(n as i64)
}

/// A single check on a text input. Each carries the message shown when it fails.
#[derive(Clone, Copy, Debug)]
pub enum Rule {
    Required(&'static str),
    MinChars(usize, &'static str),
    Number(&'static str),
    Positive(&'static str),
    Integer(&'static str),
    NonNegative(&'static str),
    Category(&'static str),
}

impl Rule {
    fn passes(&self, value: &str) -> bool {
        let number = || value.trim().parse::<f64>().ok().filter(|n| n.is_finite());
        match self {
            Rule::Required(_) => !value.is_empty(),
            Rule::MinChars(min, _) => value.chars().count() >= *min,
            Rule::Number(_) => number().is_some(),
            Rule::Positive(_) => number().is_some_and(|n| n > 0.0),
            Rule::Integer(_) => parse_integer(value).is_some(),
            Rule::NonNegative(_) => number().is_some_and(|n| n >= 0.0),
            Rule::Category(_) => value.parse::<Category>().is_ok(),
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::Required(m)
            | Rule::MinChars(_, m)
            | Rule::Number(m)
            | Rule::Positive(m)
            | Rule::Integer(m)
            | Rule::NonNegative(m)
            | Rule::Category(m) => m,
        }
    }
}

/// A check on the selected image files.
#[derive(Clone, Copy, Debug)]
pub enum FileRule {
    MinCount(usize, &'static str),
    MaxCount(usize, &'static str),
    MaxSize(u64, &'static str),
    AllowedTypes(&'static [&'static str], &'static str),
}

impl FileRule {
    fn passes(&self, files: &[SelectedFile]) -> bool {
        match self {
            FileRule::MinCount(min, _) => files.len() >= *min,
            FileRule::MaxCount(max, _) => files.len() <= *max,
            FileRule::MaxSize(max, _) => files.iter().all(|f| f.size() <= *max),
            FileRule::AllowedTypes(types, _) => {
                files.iter().all(|f| types.contains(&f.content_type()))
            }
        }
    }

    fn message(&self) -> &'static str {
        match self {
            FileRule::MinCount(_, m)
            | FileRule::MaxCount(_, m)
            | FileRule::MaxSize(_, m)
            | FileRule::AllowedTypes(_, m) => m,
        }
    }
}

pub const TITLE_RULES: &[Rule] = &[
    Rule::Required(REQUIRED),
    Rule::MinChars(3, "El título debe tener al menos 3 caracteres."),
];

pub const DESCRIPTION_RULES: &[Rule] = &[
    Rule::Required(REQUIRED),
    Rule::MinChars(10, "La descripción debe tener al menos 10 caracteres."),
];

pub const PRICE_RULES: &[Rule] = &[
    Rule::Required(REQUIRED),
    Rule::Number("El precio debe ser un número."),
    Rule::Positive("El precio debe ser un número positivo."),
];

pub const BRAND_RULES: &[Rule] = &[
    Rule::Required(REQUIRED),
    Rule::MinChars(2, "La marca debe tener al menos 2 caracteres."),
];

pub const CATEGORY_RULES: &[Rule] = &[
    Rule::Required("Selecciona una categoría."),
    Rule::Category("Selecciona una categoría."),
];

// Stock may be zero: an item can be listed before it is restocked.
pub const STOCK_RULES: &[Rule] = &[
    Rule::Required(REQUIRED),
    Rule::Number("El stock debe ser un número."),
    Rule::Integer("El stock debe ser un número entero."),
    Rule::NonNegative("El stock no puede ser negativo."),
];

pub const IMAGE_RULES: &[FileRule] = &[
    FileRule::MinCount(1, "Debes seleccionar al menos una imagen."),
    FileRule::MaxCount(MAX_IMAGES, "Puedes subir un máximo de 5 imágenes."),
    FileRule::MaxSize(MAX_IMAGE_BYTES, "Cada imagen debe pesar como máximo 5 MB."),
    FileRule::AllowedTypes(
        ALLOWED_IMAGE_TYPES,
        "Solo se permiten imágenes JPEG, PNG o WEBP.",
    ),
];

/// Rules for a text field. `Field::Images` has none; see [`IMAGE_RULES`].
pub fn rules_for(field: Field) -> &'static [Rule] {
    match field {
        Field::Title => TITLE_RULES,
        Field::Description => DESCRIPTION_RULES,
        Field::Price => PRICE_RULES,
        Field::Brand => BRAND_RULES,
        Field::Category => CATEGORY_RULES,
        Field::Stock => STOCK_RULES,
        Field::Images => &[],
    }
}

/// Runs `rules` in order; the first failure's message is the error.
pub fn check(rules: &[Rule], value: &str) -> Result<(), &'static str> {
    match rules.iter().find(|r| !r.passes(value)) {
        Some(rule) => Err(rule.message()),
        None => Ok(()),
    }
}

/// Runs the image rules in order; the first failure's message is the error.
pub fn check_files(files: &[SelectedFile]) -> Result<(), &'static str> {
    match IMAGE_RULES.iter().find(|r| !r.passes(files)) {
        Some(rule) => Err(rule.message()),
        None => Ok(()),
    }
}

/// One message per failing field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn set(&mut self, field: Field, result: Result<(), &'static str>) {
        match result {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(message) => {
                self.errors.insert(field, message);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, *m))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field.label(), message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
