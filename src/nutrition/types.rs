use serde::{Deserialize, Serialize};

/// Nutrition facts for some quantity of food.
///
/// The four macro fields are always reported. The rest are `None` when the
/// menu source did not report them, which is different from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein_g: f64,
    pub carb_g: f64,
    pub fat_g: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iron_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_c_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_a_iu: Option<f64>,
}

impl NutritionInfo {
    pub fn macros(calories: f64, protein_g: f64, carb_g: f64, fat_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carb_g,
            fat_g,
            ..Self::default()
        }
    }

    /// Applies `f` to every reported field, leaving absent fields absent.
    pub(crate) fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein_g: f(self.protein_g),
            carb_g: f(self.carb_g),
            fat_g: f(self.fat_g),
            saturated_fat_g: self.saturated_fat_g.map(&f),
            sodium_mg: self.sodium_mg.map(&f),
            cholesterol_mg: self.cholesterol_mg.map(&f),
            iron_mg: self.iron_mg.map(&f),
            calcium_mg: self.calcium_mg.map(&f),
            vitamin_c_mg: self.vitamin_c_mg.map(&f),
            vitamin_a_iu: self.vitamin_a_iu.map(&f),
        }
    }

    fn reported(&self) -> [(&'static str, Option<f64>); 11] {
        [
            ("calories", Some(self.calories)),
            ("protein_g", Some(self.protein_g)),
            ("carb_g", Some(self.carb_g)),
            ("fat_g", Some(self.fat_g)),
            ("saturated_fat_g", self.saturated_fat_g),
            ("sodium_mg", self.sodium_mg),
            ("cholesterol_mg", self.cholesterol_mg),
            ("iron_mg", self.iron_mg),
            ("calcium_mg", self.calcium_mg),
            ("vitamin_c_mg", self.vitamin_c_mg),
            ("vitamin_a_iu", self.vitamin_a_iu),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.reported()
            .iter()
            .all(|(_, v)| v.map_or(true, f64::is_finite))
    }

    /// First reported field that is negative or not finite, by name.
    pub fn first_invalid(&self) -> Option<(&'static str, f64)> {
        self.reported().into_iter().find_map(|(name, v)| {
            v.filter(|v| !(v.is_finite() && *v >= 0.0))
                .map(|v| (name, v))
        })
    }
}

/// Serving size as published, e.g. `"1"` `"cup"`. Display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServingSizeInfo {
    pub amount: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub nutrition_per_serving: NutritionInfo,
    #[serde(default)]
    pub serving_size: ServingSizeInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergen_icons: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_invalid_names_the_bad_field() {
        assert_eq!(NutritionInfo::macros(120.0, 4.0, 20.0, 0.0).first_invalid(), None);

        let negative = NutritionInfo::macros(-500.0, 4.0, 20.0, 2.5);
        assert_eq!(negative.first_invalid(), Some(("calories", -500.0)));

        let overflowed = NutritionInfo {
            sodium_mg: Some(f64::INFINITY),
            ..NutritionInfo::macros(120.0, 4.0, 20.0, 2.5)
        };
        assert_eq!(overflowed.first_invalid(), Some(("sodium_mg", f64::INFINITY)));
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let info = NutritionInfo::macros(120.0, 4.0, 20.0, 2.5);
        let json = serde_json::to_value(info).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert!(!obj.contains_key("sodium_mg"));
    }

    #[test]
    fn food_item_parses_with_only_required_fields() {
        let raw = r#"{
            "id": "991",
            "name": "Grilled Chicken",
            "nutrition_per_serving": {"calories": 180, "protein_g": 31, "carb_g": 0, "fat_g": 6, "sodium_mg": 410}
        }"#;
        let food: FoodItem = serde_json::from_str(raw).unwrap();
        assert_eq!(food.name, "Grilled Chicken");
        assert_eq!(food.nutrition_per_serving.sodium_mg, Some(410.0));
        assert_eq!(food.nutrition_per_serving.iron_mg, None);
        assert_eq!(food.serving_size, ServingSizeInfo::default());
        assert!(food.allergen_icons.is_none());
    }
}
