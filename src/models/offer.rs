use serde::{Deserialize, Serialize};

/// Offer status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Sent,
    Accepted,
    Declined,
}

impl OfferStatus {
    pub const ALL: [OfferStatus; 4] = [
        OfferStatus::Pending,
        OfferStatus::Sent,
        OfferStatus::Accepted,
        OfferStatus::Declined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Sent => "sent",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Declined => "declined",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "Pending",
            OfferStatus::Sent => "Offer Sent",
            OfferStatus::Accepted => "Accepted",
            OfferStatus::Declined => "Declined",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        OfferStatus::ALL.iter().copied().find(|st| st.as_str() == s)
    }
}

/// Why an offer cannot be handed over to onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingBlocked {
    #[error("offer status is '{}', only accepted offers move to onboarding", .0.label())]
    NotAccepted(OfferStatus),
    #[error("already moved to onboarding")]
    AlreadyOnboarded,
}

/// An offer extended to a candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    pub candidate_name: String,
    pub email: String,
    pub phone: String,
    pub job_id: i64,
    pub job_title: String,
    pub status: OfferStatus,
    pub sent_ts: Option<i64>,
    pub joining_ts: Option<i64>,
    pub salary: String,
    pub feedback: String,
    pub onboarded: bool,
}

impl Offer {
    /// Returns true if the status actually changed
    pub fn set_status(&mut self, status: OfferStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        true
    }

    pub fn move_to_onboarding(&mut self) -> Result<(), OnboardingBlocked> {
        if self.status != OfferStatus::Accepted {
            return Err(OnboardingBlocked::NotAccepted(self.status));
        }
        if self.onboarded {
            return Err(OnboardingBlocked::AlreadyOnboarded);
        }
        self.onboarded = true;
        Ok(())
    }

    pub fn awaiting_onboarding(&self) -> bool {
        self.status == OfferStatus::Accepted && !self.onboarded
    }
}

/// Whole days until joining, rounded up. Negative once the date has passed.
pub fn days_until_joining(joining_ts: Option<i64>, now: i64) -> Option<i64> {
    let diff = joining_ts? - now;
    let days = diff / 86400;
    // Integer division truncates toward zero, which already rounds negatives up
    if diff > 0 && diff % 86400 != 0 {
        Some(days + 1)
    } else {
        Some(days)
    }
}

/// Criteria for the offers list. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct OfferFilter {
    pub search: Option<String>,
    pub status: Option<OfferStatus>,
    pub job_id: Option<i64>,
}

impl OfferFilter {
    pub fn matches(&self, offer: &Offer) -> bool {
        let matches_search = self.search.as_deref()
            .map(|term| {
                let term = term.to_lowercase();
                offer.candidate_name.to_lowercase().contains(&term)
                    || offer.email.to_lowercase().contains(&term)
            })
            .unwrap_or(true);
        let matches_status = self.status.map(|s| offer.status == s).unwrap_or(true);
        let matches_job = self.job_id.map(|j| offer.job_id == j).unwrap_or(true);
        matches_search && matches_status && matches_job
    }
}
