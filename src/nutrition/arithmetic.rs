use crate::error::{AppError, AppResult};
use crate::nutrition::types::NutritionInfo;

/// Multiplies every reported field by `factor`.
///
/// A factor large enough to push a field past `f64::MAX` is rejected like a
/// non-positive one, so a scaled result is always finite.
pub fn scale(info: &NutritionInfo, factor: f64) -> AppResult<NutritionInfo> {
    if !(factor.is_finite() && factor > 0.0) {
        return Err(AppError::InvalidScaleFactor(factor));
    }
    let scaled = info.map(|v| v * factor);
    if !scaled.is_finite() {
        return Err(AppError::InvalidScaleFactor(factor));
    }
    Ok(scaled)
}

/// Element-wise total. An optional field stays absent only if every input
/// lacks it; otherwise missing values count as zero.
pub fn sum<'a, I>(items: I) -> NutritionInfo
where
    I: IntoIterator<Item = &'a NutritionInfo>,
{
    items
        .into_iter()
        .fold(NutritionInfo::default(), |acc, n| NutritionInfo {
            calories: acc.calories + n.calories,
            protein_g: acc.protein_g + n.protein_g,
            carb_g: acc.carb_g + n.carb_g,
            fat_g: acc.fat_g + n.fat_g,
            saturated_fat_g: add_reported(acc.saturated_fat_g, n.saturated_fat_g),
            sodium_mg: add_reported(acc.sodium_mg, n.sodium_mg),
            cholesterol_mg: add_reported(acc.cholesterol_mg, n.cholesterol_mg),
            iron_mg: add_reported(acc.iron_mg, n.iron_mg),
            calcium_mg: add_reported(acc.calcium_mg, n.calcium_mg),
            vitamin_c_mg: add_reported(acc.vitamin_c_mg, n.vitamin_c_mg),
            vitamin_a_iu: add_reported(acc.vitamin_a_iu, n.vitamin_a_iu),
        })
}

fn add_reported(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Progress towards a goal, clamped to `[0, 100]`. Zero when there is no
/// usable goal.
pub fn percent_of_goal(value: f64, goal: f64) -> f64 {
    if !(goal > 0.0) {
        return 0.0;
    }
    (100.0 * value / goal).max(0.0).min(100.0)
}
