use std::fmt;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{AppError, AppResult};
use crate::meals::MealDate;
use crate::menu::{types::MenuWeek, wire};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        })
    }
}

/// Which published menu to read: a dining location, a meal and a day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuQuery {
    pub location: String,
    pub meal: MealType,
    pub date: MealDate,
}

pub(crate) fn is_valid_location(location: &str) -> bool {
    lazy_static! {
        static ref LOCATION_RE: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
    }
    LOCATION_RE.is_match(location)
}

impl MenuQuery {
    pub fn validate(&self) -> AppResult<()> {
        if !is_valid_location(&self.location) {
            return Err(AppError::InvalidQuery(format!(
                "location {:?} is not a lowercase slug",
                self.location
            )));
        }
        Ok(())
    }
}

/// Read-only source of published menus.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// The week containing `query.date`.
    async fn fetch_week(&self, query: &MenuQuery) -> AppResult<MenuWeek>;
}

#[derive(Debug, Clone)]
pub struct NutrisliceClient {
    base_url: String,
    client: Client,
}

impl NutrisliceClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("build menu http client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn week_url(&self, query: &MenuQuery) -> String {
        let d = query.date.date();
        format!(
            "{}/menu/api/weeks/school/{}/menu-type/{}/{:04}/{:02}/{:02}/?format=json",
            self.base_url,
            query.location,
            query.meal,
            d.year(),
            u8::from(d.month()),
            d.day()
        )
    }
}

#[async_trait]
impl MenuSource for NutrisliceClient {
    async fn fetch_week(&self, query: &MenuQuery) -> AppResult<MenuWeek> {
        query.validate()?;
        let url = self.week_url(query);
        debug!(%url, "fetching menu week");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = %e, %url, "menu request failed");
            AppError::SourceUnreachable(e.into())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, %url, "menu source returned error status");
            return Err(AppError::SourceUnreachable(anyhow::anyhow!(
                "menu source returned {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::SourceUnreachable(e.into()))?;
        let doc: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, %url, "menu source returned non-JSON body");
            AppError::MalformedSource(e.to_string())
        })?;

        Ok(wire::parse_week(&doc))
    }
}
