use rusqlite::{Connection, OptionalExtension, Row};
use crate::models::{Offer, OfferStatus};
use crate::repo::enum_column;
use anyhow::{Context, Result};

/// Offer repository
pub struct OfferRepo;

const SELECT_OFFER: &str =
    "SELECT o.id, o.candidate_name, o.email, o.phone, o.job_id, COALESCE(j.title, 'Unknown Role'),
            o.status, o.sent_ts, o.joining_ts, o.salary, o.feedback, o.onboarded
     FROM offers o LEFT JOIN jobs j ON j.id = o.job_id";

fn offer_from_row(row: &Row) -> rusqlite::Result<Offer> {
    Ok(Offer {
        id: row.get(0)?,
        candidate_name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        job_id: row.get(4)?,
        job_title: row.get(5)?,
        status: enum_column(row, 6, "offer status", OfferStatus::from_str)?,
        sent_ts: row.get(7)?,
        joining_ts: row.get(8)?,
        salary: row.get(9)?,
        feedback: row.get(10)?,
        onboarded: row.get(11)?,
    })
}

impl OfferRepo {
    pub fn list_all(conn: &Connection) -> Result<Vec<Offer>> {
        let mut stmt = conn.prepare(&format!("{} ORDER BY o.id", SELECT_OFFER))?;
        let rows = stmt.query_map([], offer_from_row)?;

        let mut offers = Vec::new();
        for row in rows {
            offers.push(row.context("Failed to load offers")?);
        }
        Ok(offers)
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Offer>> {
        let mut stmt = conn.prepare(&format!("{} WHERE o.id = ?1", SELECT_OFFER))?;
        let offer = stmt.query_row([id], offer_from_row).optional()
            .with_context(|| format!("Failed to load offer {}", id))?;
        Ok(offer)
    }

    /// Write back status and onboarding flag
    pub fn save(conn: &Connection, offer: &Offer) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let updated = conn.execute(
            "UPDATE offers SET status = ?1, onboarded = ?2, modified_ts = ?3 WHERE id = ?4",
            rusqlite::params![offer.status.as_str(), offer.onboarded, now, offer.id],
        )
        .with_context(|| format!("Failed to update offer {}", offer.id))?;

        if updated == 0 {
            anyhow::bail!("No offer found with id={}", offer.id);
        }
        log::info!("Offer {} saved (status '{}', onboarded={})", offer.id, offer.status.as_str(), offer.onboarded);
        Ok(())
    }
}
