pub mod arithmetic;
pub mod types;

pub use arithmetic::{percent_of_goal, scale, sum};
pub use types::{FoodItem, NutritionInfo, ServingSizeInfo};
