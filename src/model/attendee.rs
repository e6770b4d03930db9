
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{store::Row, Error, ModelManager, Result};

pub const CHECKED_IN: &str = "✔ CHECKED IN";

const NAME: usize = 0;
const PHONE: usize = 1;
const EMAIL: usize = 2;
const COMPANY: usize = 3;
const STATUS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendee {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub checkin: String,
}

impl From<&Row> for Attendee {
    fn from(row: &Row) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        Attendee {
            name: cell(NAME),
            phone: cell(PHONE),
            email: cell(EMAIL),
            company: cell(COMPANY),
            checkin: cell(STATUS),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AttendeeForRegister {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AttendeeForCheckIn {
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub found: bool,
    pub users: Vec<Attendee>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CheckIn {
    /// Zero based index of the row that was rewritten.
    Updated { row: usize },
    NotFound,
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

pub struct AttendeeBmc;

impl AttendeeBmc {
    /// Appends a new attendee row. Registration marks the attendee as checked in.
    pub async fn register(mm: &ModelManager, attendee_r: AttendeeForRegister) -> Result<()> {
        let (Some(name), Some(phone), Some(email), Some(company)) = (
            required(attendee_r.name),
            required(attendee_r.phone),
            required(attendee_r.email),
            required(attendee_r.company),
        ) else {
            return Err(Error::MissingFields);
        };

        let row = vec![name, phone, email, company, CHECKED_IN.to_string()];

        let _writes = mm.lock_writes().await;
        mm.store().append_row(mm.range(), row).await?;

        Ok(())
    }

    /// Case-insensitive substring search over name, email and company, raw
    /// substring search over phone. Rows come back in sheet order.
    pub async fn search(mm: &ModelManager, query: &str) -> Result<SearchResult> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(SearchResult::default());
        }

        let rows = mm.store().fetch_rows(mm.range()).await?;

        let users: Vec<Attendee> = rows
            .iter()
            .skip(1)
            .map(Attendee::from)
            .filter(|a| {
                a.name.to_lowercase().contains(&query)
                    || a.phone.contains(&query)
                    || a.email.to_lowercase().contains(&query)
                    || a.company.to_lowercase().contains(&query)
            })
            .collect();

        debug!("{:<12} - search {query:?} matched {}", "MODEL", users.len());

        Ok(SearchResult {
            found: !users.is_empty(),
            users,
        })
    }

    /// Marks the first row whose phone equals `phone` exactly as checked in,
    /// rewriting the whole row.
    pub async fn check_in(mm: &ModelManager, attendee_c: AttendeeForCheckIn) -> Result<CheckIn> {
        let phone = required(attendee_c.phone).ok_or(Error::PhoneRequired)?;

        let _writes = mm.lock_writes().await;
        let rows = mm.store().fetch_rows(mm.range()).await?;

        let Some((index, found)) = rows
            .into_iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.get(PHONE).is_some_and(|p| *p == phone))
        else {
            return Ok(CheckIn::NotFound);
        };

        let mut row = found;
        let width = mm.range().width().max(STATUS + 1);
        if row.len() < width {
            row.resize(width, String::new());
        }
        row[STATUS] = CHECKED_IN.to_string();

        mm.store().update_row(mm.range(), index, row).await?;

        Ok(CheckIn::Updated { row: index })
    }
}
