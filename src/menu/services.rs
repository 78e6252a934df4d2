use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::menu::client::{MenuQuery, MenuSource};
use crate::menu::grouping::group;
use crate::menu::types::{MenuStatus, MenuView};

/// Fetches and groups the menu for one day.
///
/// Source failures become an `Unavailable` view; only a bad query is an
/// error.
pub async fn menu_for_date(source: &dyn MenuSource, query: &MenuQuery) -> AppResult<MenuView> {
    query.validate()?;

    let week = match source.fetch_week(query).await {
        Ok(week) => week,
        Err(e @ AppError::InvalidQuery(_)) => return Err(e),
        Err(e) => {
            warn!(error = %e, location = %query.location, meal = %query.meal, "menu unavailable");
            return Ok(MenuView {
                date: query.date,
                status: MenuStatus::Unavailable {
                    reason: e.to_string(),
                },
                sections: Vec::new(),
                available_dates: Vec::new(),
            });
        }
    };

    let available_dates = week.dates();
    let sections = week
        .day(&query.date)
        .map(|day| group(&day.items))
        .unwrap_or_default();
    let status = if sections.is_empty() {
        MenuStatus::Empty
    } else {
        MenuStatus::Available
    };
    info!(
        date = %query.date,
        sections = sections.len(),
        "menu loaded"
    );

    Ok(MenuView {
        date: query.date,
        status,
        sections,
        available_dates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::MealDate;
    use crate::menu::client::{MealType, MockMenuSource};
    use crate::menu::types::{MenuDay, MenuItem, MenuWeek};

    fn query(date: &str) -> MenuQuery {
        MenuQuery {
            location: "west-village".into(),
            meal: MealType::Dinner,
            date: date.parse().unwrap(),
        }
    }

    fn week() -> MenuWeek {
        let d = |s: &str| s.parse::<MealDate>().unwrap();
        MenuWeek {
            days: vec![
                MenuDay {
                    date: d("2025-10-20"),
                    items: vec![
                        MenuItem::SectionTitle { text: "Grill".into() },
                        MenuItem::Food { food: None },
                    ],
                },
                MenuDay {
                    date: d("2025-10-21"),
                    items: vec![],
                },
            ],
        }
    }

    #[tokio::test]
    async fn groups_the_requested_day() {
        let mut source = MockMenuSource::new();
        source.expect_fetch_week().times(1).returning(|_| Ok(week()));

        let view = menu_for_date(&source, &query("2025-10-20")).await.unwrap();
        assert_eq!(view.status, MenuStatus::Available);
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].name, "Grill");
        assert_eq!(view.available_dates.len(), 2);
    }

    #[tokio::test]
    async fn day_without_items_is_empty_but_lists_dates() {
        let mut source = MockMenuSource::new();
        source.expect_fetch_week().returning(|_| Ok(week()));

        let view = menu_for_date(&source, &query("2025-10-21")).await.unwrap();
        assert_eq!(view.status, MenuStatus::Empty);
        assert!(view.sections.is_empty());

        let view = menu_for_date(&source, &query("2025-10-25")).await.unwrap();
        assert_eq!(view.status, MenuStatus::Empty);
        assert_eq!(
            view.available_dates
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>(),
            vec!["2025-10-20", "2025-10-21"]
        );
    }

    #[tokio::test]
    async fn source_failure_is_unavailable_not_error() {
        let mut source = MockMenuSource::new();
        source
            .expect_fetch_week()
            .returning(|_| Err(AppError::SourceUnreachable(anyhow::anyhow!("timed out"))));

        let view = menu_for_date(&source, &query("2025-10-20")).await.unwrap();
        match view.status {
            MenuStatus::Unavailable { reason } => assert!(reason.contains("timed out")),
            other => panic!("unexpected status {other:?}"),
        }
        assert!(view.sections.is_empty());
    }

    #[tokio::test]
    async fn bad_location_never_reaches_source() {
        let mut source = MockMenuSource::new();
        source.expect_fetch_week().times(0);
        let mut q = query("2025-10-20");
        q.location = "North Ave".into();
        assert!(matches!(
            menu_for_date(&source, &q).await,
            Err(AppError::InvalidQuery(_))
        ));
    }
}
