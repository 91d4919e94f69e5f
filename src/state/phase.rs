/// Phase definitions for a discovery run
///
/// This module defines the states the orchestrator moves through and the
/// transitions it may take between them.
use std::fmt;

/// Represents the current phase of a discovery run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryPhase {
    /// Base URL and seed list are known, nothing fetched yet
    Seeded,

    /// Sitemap discovery and parsing is underway
    SitemapAttempted,

    /// Sitemap produced URLs; they are the sole source
    SitemapSource,

    /// No usable sitemap; crawling, harvesting and the seed worklist run
    CrawlSource,

    /// Candidates are being normalized and merged
    Merging,

    /// Terminal: the endpoint set has been returned
    Done,
}

impl DiscoveryPhase {
    /// Returns true if `next` is a legal successor of this phase
    pub fn can_transition_to(&self, next: DiscoveryPhase) -> bool {
        matches!(
            (self, next),
            (Self::Seeded, Self::SitemapAttempted)
                | (Self::SitemapAttempted, Self::SitemapSource)
                | (Self::SitemapAttempted, Self::CrawlSource)
                | (Self::SitemapSource, Self::Merging)
                | (Self::CrawlSource, Self::Merging)
                | (Self::Merging, Self::Done)
        )
    }

    /// Returns the snake_case name of this phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seeded => "seeded",
            Self::SitemapAttempted => "sitemap_attempted",
            Self::SitemapSource => "sitemap_source",
            Self::CrawlSource => "crawl_source",
            Self::Merging => "merging",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for DiscoveryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sitemap_path() {
        use DiscoveryPhase::*;
        assert!(Seeded.can_transition_to(SitemapAttempted));
        assert!(SitemapAttempted.can_transition_to(SitemapSource));
        assert!(SitemapSource.can_transition_to(Merging));
        assert!(Merging.can_transition_to(Done));
    }

    #[test]
    fn test_crawl_path() {
        use DiscoveryPhase::*;
        assert!(SitemapAttempted.can_transition_to(CrawlSource));
        assert!(CrawlSource.can_transition_to(Merging));
    }

    #[test]
    fn test_illegal_transitions() {
        use DiscoveryPhase::*;
        assert!(!Seeded.can_transition_to(CrawlSource));
        assert!(!Seeded.can_transition_to(Done));
        assert!(!SitemapSource.can_transition_to(CrawlSource));
        assert!(!CrawlSource.can_transition_to(SitemapSource));
        assert!(!Merging.can_transition_to(Seeded));

        for phase in [
            Seeded,
            SitemapAttempted,
            SitemapSource,
            CrawlSource,
            Merging,
            Done,
        ] {
            assert!(!Done.can_transition_to(phase));
            assert!(!phase.can_transition_to(phase));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", DiscoveryPhase::Seeded), "seeded");
        assert_eq!(format!("{}", DiscoveryPhase::CrawlSource), "crawl_source");
        assert_eq!(format!("{}", DiscoveryPhase::Done), "done");
    }
}
