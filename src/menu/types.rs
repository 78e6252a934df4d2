use serde::{Deserialize, Serialize};

use crate::meals::MealDate;
use crate::nutrition::FoodItem;

/// One slot of a published menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuItem {
    SectionTitle { text: String },
    /// `food` is `None` for a listing the source left unnamed; it still
    /// occupies its slot and is shown as unavailable.
    Food { food: Option<FoodItem> },
}

impl MenuItem {
    pub fn is_available(&self) -> bool {
        matches!(self, MenuItem::Food { food: Some(_) })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuDay {
    pub date: MealDate,
    pub items: Vec<MenuItem>,
}

/// A week of menus as returned by the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MenuWeek {
    pub days: Vec<MenuDay>,
}

impl MenuWeek {
    pub fn day(&self, date: &MealDate) -> Option<&MenuDay> {
        self.days.iter().find(|d| &d.date == date)
    }

    pub fn dates(&self) -> Vec<MealDate> {
        self.days.iter().map(|d| d.date).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuSection {
    pub name: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MenuStatus {
    Available,
    /// The source answered but has nothing for this date.
    Empty,
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub date: MealDate,
    pub status: MenuStatus,
    pub sections: Vec<MenuSection>,
    pub available_dates: Vec<MealDate>,
}
