use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Applicant screening status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicantStatus {
    New,
    Shortlisted,
    Rejected,
}

impl ApplicantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicantStatus::New => "new",
            ApplicantStatus::Shortlisted => "shortlisted",
            ApplicantStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Some(ApplicantStatus::New),
            "shortlisted" => Some(ApplicantStatus::Shortlisted),
            "rejected" => Some(ApplicantStatus::Rejected),
            _ => None,
        }
    }
}

/// Where an applicant's profile stands in the hiring workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    New,
    Screening,
    Interview,
    Offer,
    Rejected,
}

impl ProfileStatus {
    pub const ALL: [ProfileStatus; 5] = [
        ProfileStatus::New,
        ProfileStatus::Screening,
        ProfileStatus::Interview,
        ProfileStatus::Offer,
        ProfileStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::New => "new",
            ProfileStatus::Screening => "screening",
            ProfileStatus::Interview => "interview",
            ProfileStatus::Offer => "offer",
            ProfileStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileStatus::New => "New Application",
            ProfileStatus::Screening => "In Screening",
            ProfileStatus::Interview => "Interview Scheduled",
            ProfileStatus::Offer => "Offer Extended",
            ProfileStatus::Rejected => "Rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        ProfileStatus::ALL.iter().copied().find(|st| st.as_str() == s)
    }

    /// The one step forward from here. Offer and Rejected have none.
    pub fn next(&self) -> Option<ProfileStatus> {
        match self {
            ProfileStatus::New => Some(ProfileStatus::Screening),
            ProfileStatus::Screening => Some(ProfileStatus::Interview),
            ProfileStatus::Interview => Some(ProfileStatus::Offer),
            ProfileStatus::Offer | ProfileStatus::Rejected => None,
        }
    }
}

/// Why a profile cannot advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AdvanceBlocked {
    #[error("rejected applicants cannot be progressed further")]
    Rejected,
    #[error("the offer has already been extended")]
    Complete,
    #[error("already '{}'", .0.label())]
    AlreadyAt(ProfileStatus),
    #[error("cannot go from '{}' to '{}', the next step is '{}'", .from.label(), .to.label(), .next.label())]
    Skip {
        from: ProfileStatus,
        to: ProfileStatus,
        next: ProfileStatus,
    },
}

/// Years-of-experience bucket used by the applicants filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceBucket {
    /// 0-2 years (inclusive)
    Junior,
    /// more than 2, up to 5 years
    Mid,
    /// more than 5 years
    Senior,
}

impl ExperienceBucket {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "0-2" => Some(ExperienceBucket::Junior),
            "2-5" => Some(ExperienceBucket::Mid),
            "5+" => Some(ExperienceBucket::Senior),
            _ => None,
        }
    }

    pub fn contains(&self, years: u32) -> bool {
        match self {
            ExperienceBucket::Junior => years <= 2,
            ExperienceBucket::Mid => years > 2 && years <= 5,
            ExperienceBucket::Senior => years > 5,
        }
    }
}

/// Documents collected for verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    IdProof,
    EducationCertificates,
    ExperienceLetter,
    Photo,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::IdProof,
        DocumentKind::EducationCertificates,
        DocumentKind::ExperienceLetter,
        DocumentKind::Photo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::IdProof => "id-proof",
            DocumentKind::EducationCertificates => "education-certificates",
            DocumentKind::ExperienceLetter => "experience-letter",
            DocumentKind::Photo => "photo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::IdProof => "ID Proof",
            DocumentKind::EducationCertificates => "Education Certificates",
            DocumentKind::ExperienceLetter => "Experience Letter",
            DocumentKind::Photo => "Photo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        DocumentKind::ALL.iter().copied().find(|k| k.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub submitted: bool,
    pub verified: bool,
}

/// An application to a job opening
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
    pub id: i64,
    pub job_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience_years: u32,
    pub applied_ts: i64,
    pub status: ApplicantStatus,
    pub skills: Vec<String>,
    pub documents: BTreeMap<DocumentKind, DocumentStatus>,
    pub profile_status: ProfileStatus,
    /// Internal screening notes
    pub notes: String,
}

impl Applicant {
    /// Shortlist a new applicant. Rejected applicants have no further actions.
    pub fn shortlist(&mut self) -> bool {
        if self.status == ApplicantStatus::New {
            self.status = ApplicantStatus::Shortlisted;
            true
        } else {
            false
        }
    }

    /// Reject the application. The profile workflow ends with it.
    pub fn reject(&mut self) -> bool {
        if self.status == ApplicantStatus::Rejected {
            false
        } else {
            self.status = ApplicantStatus::Rejected;
            self.profile_status = ProfileStatus::Rejected;
            true
        }
    }

    /// Move the profile one step along new, screening, interview, offer.
    ///
    /// `to` names the expected step; skipping ahead is refused. Returns the
    /// status the profile left.
    pub fn advance(&mut self, to: Option<ProfileStatus>) -> Result<ProfileStatus, AdvanceBlocked> {
        let from = self.profile_status;
        if from == ProfileStatus::Rejected || self.status == ApplicantStatus::Rejected {
            return Err(AdvanceBlocked::Rejected);
        }
        if to == Some(from) {
            return Err(AdvanceBlocked::AlreadyAt(from));
        }
        let next = from.next().ok_or(AdvanceBlocked::Complete)?;
        if let Some(to) = to {
            if to != next {
                return Err(AdvanceBlocked::Skip { from, to, next });
            }
        }
        self.profile_status = next;
        Ok(from)
    }

    /// Flip the verified flag on a document and return the new value
    pub fn toggle_verified(&mut self, kind: DocumentKind) -> bool {
        let doc = self.documents.entry(kind).or_default();
        doc.verified = !doc.verified;
        doc.verified
    }

    pub fn verified_count(&self) -> usize {
        self.documents.values().filter(|d| d.verified).count()
    }
}

/// Criteria for the applicants list. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct ApplicantFilter {
    pub search: Option<String>,
    pub status: Option<ApplicantStatus>,
    pub experience: Option<ExperienceBucket>,
    pub skill: Option<String>,
}

impl ApplicantFilter {
    pub fn matches(&self, applicant: &Applicant) -> bool {
        let matches_search = self.search.as_deref()
            .map(|term| {
                let term = term.to_lowercase();
                applicant.name.to_lowercase().contains(&term)
                    || applicant.email.to_lowercase().contains(&term)
            })
            .unwrap_or(true);
        let matches_status = self.status.map(|s| applicant.status == s).unwrap_or(true);
        let matches_experience = self.experience
            .map(|b| b.contains(applicant.experience_years))
            .unwrap_or(true);
        let matches_skill = self.skill.as_deref()
            .map(|term| {
                let term = term.to_lowercase();
                applicant.skills.iter().any(|s| s.to_lowercase().contains(&term))
            })
            .unwrap_or(true);
        matches_search && matches_status && matches_experience && matches_skill
    }
}
