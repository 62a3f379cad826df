//! Category request and response schemas.

use super::fields::{self, FieldReader, Input};
use super::{ValidateInput, WireSchema};
use crate::entities::category;
use serde::Serialize;
use validator::ValidationErrors;

const ID_MAX: u64 = 32;
const NAME_MAX: u64 = 50;
const ICON_MAX: u64 = 64;

/// Payload for creating a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCreate {
    pub id: String,
    pub name: String,
    pub name_en: String,
    pub icon: String,
    pub color: String,
}

impl WireSchema for CategoryCreate {
    const NAME: &'static str = "CategoryCreate";
    const FIELDS: &'static [&'static str] = &["id", "name", "name_en", "icon", "color"];
}

impl ValidateInput for CategoryCreate {
    fn validate(input: &Input) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input, Self::FIELDS);
        let id = reader.required("id", |v| fields::slug(v, ID_MAX));
        let name = reader.required("name", |v| fields::text(v, NAME_MAX));
        let name_en = reader.required("name_en", |v| fields::text(v, NAME_MAX));
        let icon = reader.required("icon", |v| fields::text(v, ICON_MAX));
        let color = reader.required("color", fields::hex_color);

        match (id, name, name_en, icon, color) {
            (Some(id), Some(name), Some(name_en), Some(icon), Some(color)) if reader.is_clean() => {
                Ok(Self {
                    id,
                    name,
                    name_en,
                    icon,
                    color,
                })
            }
            _ => Err(reader.into_errors()),
        }
    }
}

/// Partial update of a category; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl WireSchema for CategoryUpdate {
    const NAME: &'static str = "CategoryUpdate";
    const FIELDS: &'static [&'static str] = &["name", "name_en", "icon", "color"];
}

impl ValidateInput for CategoryUpdate {
    fn validate(input: &Input) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input, Self::FIELDS);
        let update = Self {
            name: reader.patch("name", |v| fields::text(v, NAME_MAX)),
            name_en: reader.patch("name_en", |v| fields::text(v, NAME_MAX)),
            icon: reader.patch("icon", |v| fields::text(v, ICON_MAX)),
            color: reader.patch("color", fields::hex_color),
        };
        if reader.is_clean() {
            Ok(update)
        } else {
            Err(reader.into_errors())
        }
    }
}

impl CategoryUpdate {
    /// Returns the updated category; `current` is left as is.
    #[must_use]
    pub fn apply(&self, current: &category::Model) -> category::Model {
        category::Model {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            name_en: self
                .name_en
                .clone()
                .unwrap_or_else(|| current.name_en.clone()),
            icon: self.icon.clone().unwrap_or_else(|| current.icon.clone()),
            color: self.color.clone().unwrap_or_else(|| current.color.clone()),
            ..current.clone()
        }
    }
}

/// Public view of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub name_en: String,
    pub icon: String,
    pub color: String,
}

impl WireSchema for CategoryResponse {
    const NAME: &'static str = "CategoryResponse";
    const FIELDS: &'static [&'static str] = &["id", "name", "name_en", "icon", "color"];
}

impl From<&category::Model> for CategoryResponse {
    fn from(model: &category::Model) -> Self {
        Self {
            id: model.id.clone(),
            name: model.name.clone(),
            name_en: model.name_en.clone(),
            icon: model.icon.clone(),
            color: model.color.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{error_fields, sample_category};
    use serde_json::json;

    #[test]
    fn test_category_create_keeps_fields_unchanged() {
        let input = json!({
            "id": "c1",
            "name": "餐饮",
            "name_en": "Dining",
            "icon": "food",
            "color": "#FF0000"
        });

        let category = CategoryCreate::validate_value(&input).unwrap();
        assert_eq!(category.id, "c1");
        assert_eq!(category.name, "餐饮");
        assert_eq!(category.name_en, "Dining");
        assert_eq!(category.icon, "food");
        assert_eq!(category.color, "#FF0000");
    }

    #[test]
    fn test_category_create_missing_name_en() {
        let input = json!({
            "id": "c1",
            "name": "餐饮",
            "icon": "food",
            "color": "#FF0000"
        });

        let errors = CategoryCreate::validate_value(&input).unwrap_err();
        assert_eq!(error_fields(&errors), ["name_en"]);
    }

    #[test]
    fn test_category_create_reports_every_violation() {
        let input = json!({
            "id": "c 1",
            "name": "",
            "name_en": 42,
            "color": "red"
        });

        let errors = CategoryCreate::validate_value(&input).unwrap_err();
        assert_eq!(
            error_fields(&errors),
            ["color", "icon", "id", "name", "name_en"]
        );
    }

    #[test]
    fn test_category_create_rejects_non_object_body() {
        let errors = CategoryCreate::validate_value(&json!(["c1"])).unwrap_err();
        assert_eq!(error_fields(&errors), [fields::BODY_KEY]);
    }

    #[test]
    fn test_category_update_apply_returns_new_model() {
        let current = sample_category("c1");
        let update = CategoryUpdate::validate_value(&json!({ "color": "#00FF00" })).unwrap();

        let updated = update.apply(&current);
        assert_eq!(updated.color, "#00FF00");
        assert_eq!(updated.name, current.name);
        assert_eq!(updated.sort_order, current.sort_order);
        assert_eq!(current.color, "#FF0000");
    }

    #[test]
    fn test_category_update_rejects_null() {
        let errors = CategoryUpdate::validate_value(&json!({ "name": null })).unwrap_err();
        assert_eq!(error_fields(&errors), ["name"]);
    }

    #[test]
    fn test_category_response_projection() {
        let model = sample_category("c1");
        let first = CategoryResponse::from(&model);
        let second = CategoryResponse::from(&model);
        assert_eq!(first, second);

        let json = serde_json::to_value(&first).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        let mut declared = CategoryResponse::FIELDS.to_vec();
        declared.sort_unstable();
        assert_eq!(keys, declared);
        assert!(json.get("sort_order").is_none());
        assert!(json.get("created_at").is_none());
    }
}
