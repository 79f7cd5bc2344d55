#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendScrape(crate::ScrapeRequest),
    StoreResults(Vec<crate::ScrapeResult>),
    PresentResults,
}
