use crate::catalog::{
    self, CastMember, CatalogGateway, Credits, CrewMember, MovieDetails, MovieId, Video,
};
use chrono::Datelike;
use tracing::{debug, error};

pub const DETAILS_FAILED: &str = "Failed to load movie details. Please try again later.";

/// Cast members shown on the details screen
pub const TOP_BILLED: usize = 10;

/// Everything the details screen renders for one movie
#[derive(Debug, Clone, PartialEq)]
pub struct MovieView {
    pub details: MovieDetails,
    pub credits: Credits,
}

impl MovieView {
    /// Fetch details and credits concurrently. If either call fails the whole
    /// view fails and the other result is dropped.
    pub async fn load(gateway: &dyn CatalogGateway, id: MovieId) -> catalog::Result<Self> {
        debug!("Loading details view for {}", id);

        let (details, credits) = tokio::try_join!(gateway.get_details(id), gateway.get_credits(id))
            .inspect_err(|e| error!("Details view for {} failed: {}", id, e))?;

        Ok(Self { details, credits })
    }

    pub fn director(&self) -> Option<&CrewMember> {
        self.credits.director()
    }

    pub fn trailer(&self) -> Option<&Video> {
        self.details.trailer()
    }

    pub fn top_cast(&self) -> &[CastMember] {
        self.credits.top_billed(TOP_BILLED)
    }

    /// Runtime as "2h 28m", absent when unknown
    pub fn runtime_label(&self) -> Option<String> {
        match self.details.runtime {
            0 => None,
            minutes => Some(format!("{}h {}m", minutes / 60, minutes % 60)),
        }
    }

    /// Release date as "July 15, 2010"
    pub fn release_label(&self) -> Option<String> {
        self.details
            .released_on()
            .map(|d| d.format("%B %-d, %Y").to_string())
    }

    pub fn year(&self) -> Option<i32> {
        self.details.released_on().map(|d| d.year())
    }

    pub fn budget(&self) -> Option<u64> {
        (self.details.budget > 0).then_some(self.details.budget)
    }

    pub fn revenue(&self) -> Option<u64> {
        (self.details.revenue > 0).then_some(self.details.revenue)
    }
}

/// Group digits with commas, e.g. 160000000 -> "160,000,000"
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
