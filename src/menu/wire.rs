use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::meals::MealDate;
use crate::menu::types::{MenuDay, MenuItem, MenuWeek};
use crate::nutrition::{FoodItem, NutritionInfo, ServingSizeInfo};

// Source documents are loosely shaped: every field is optional and
// numbers may be null.

#[derive(Debug, Deserialize)]
struct WireDay {
    date: Option<String>,
    menu_items: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct WireMenuItem {
    #[serde(default)]
    is_section_title: bool,
    text: Option<String>,
    food: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct WireFood {
    id: Option<Value>,
    name: Option<String>,
    rounded_nutrition_info: Option<WireNutrition>,
    serving_size_info: Option<WireServing>,
    ingredients: Option<String>,
    icons: Option<WireIcons>,
}

#[derive(Debug, Default, Deserialize)]
struct WireNutrition {
    calories: Option<f64>,
    g_protein: Option<f64>,
    g_carbs: Option<f64>,
    g_fat: Option<f64>,
    g_saturated_fat: Option<f64>,
    mg_sodium: Option<f64>,
    mg_cholesterol: Option<f64>,
    mg_iron: Option<f64>,
    mg_calcium: Option<f64>,
    mg_vitamin_c: Option<f64>,
    iu_vitamin_a: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireServing {
    serving_size_amount: Option<Value>,
    serving_size_unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireIcons {
    food_icons: Option<Vec<WireIcon>>,
}

#[derive(Debug, Deserialize)]
struct WireIcon {
    name: Option<String>,
}

/// Reads a week document. A missing or malformed `days` field is an empty
/// week, and days without a usable date are skipped.
pub fn parse_week(doc: &Value) -> MenuWeek {
    let Some(days) = doc.get("days").and_then(Value::as_array) else {
        debug!("menu document has no days array");
        return MenuWeek::default();
    };

    let days = days
        .iter()
        .filter_map(|raw| {
            let day: WireDay = serde_json::from_value(raw.clone()).ok()?;
            let date: MealDate = day.date.as_deref()?.parse().ok()?;
            Some(MenuDay {
                date,
                items: day
                    .menu_items
                    .unwrap_or_default()
                    .iter()
                    .map(parse_item)
                    .collect(),
            })
        })
        .collect();
    MenuWeek { days }
}

fn parse_item(raw: &Value) -> MenuItem {
    let item: WireMenuItem = serde_json::from_value(raw.clone()).unwrap_or_default();
    if item.is_section_title {
        return MenuItem::SectionTitle {
            text: item.text.unwrap_or_default(),
        };
    }
    let food = item
        .food
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value::<WireFood>(v).ok())
        .and_then(into_food);
    MenuItem::Food { food }
}

fn into_food(wire: WireFood) -> Option<FoodItem> {
    let name = wire.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())?;
    let n = wire.rounded_nutrition_info.unwrap_or_default();
    let serving = wire.serving_size_info;
    let icons: Vec<String> = wire
        .icons
        .and_then(|i| i.food_icons)
        .map(|icons| icons.into_iter().filter_map(|icon| icon.name).collect())
        .unwrap_or_default();

    Some(FoodItem {
        id: wire.id.as_ref().map(value_text).unwrap_or_default(),
        name,
        nutrition_per_serving: NutritionInfo {
            calories: n.calories.unwrap_or(0.0),
            protein_g: n.g_protein.unwrap_or(0.0),
            carb_g: n.g_carbs.unwrap_or(0.0),
            fat_g: n.g_fat.unwrap_or(0.0),
            saturated_fat_g: n.g_saturated_fat,
            sodium_mg: n.mg_sodium,
            cholesterol_mg: n.mg_cholesterol,
            iron_mg: n.mg_iron,
            calcium_mg: n.mg_calcium,
            vitamin_c_mg: n.mg_vitamin_c,
            vitamin_a_iu: n.iu_vitamin_a,
        },
        serving_size: ServingSizeInfo {
            amount: serving
                .as_ref()
                .and_then(|s| s.serving_size_amount.as_ref())
                .map(value_text)
                .unwrap_or_default(),
            unit: serving
                .and_then(|s| s.serving_size_unit)
                .unwrap_or_default(),
        },
        ingredients: wire.ingredients.filter(|i| !i.trim().is_empty()),
        allergen_icons: (!icons.is_empty()).then_some(icons),
    })
}

/// Ids and amounts come as either numbers or strings.
fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
