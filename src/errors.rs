use thiserror::Error;

#[derive(Error, Debug)]
pub enum StratError {
    #[error("missing required input: {0}")] Validation(String),
    #[error("failed to fetch the page ({0}); check that the URL is correct and publicly accessible")] Fetch(String),
    #[error("the site blocked the request with a cross-origin security policy ({0}); try the manual entry flags instead")] CrossOrigin(String),
    #[error("no readable text on the page at {0}")] EmptyContent(String),
    #[error("page summary missing or malformed: {0}")] MalformedSummary(String),
    #[error("image analysis returned incomplete details: {0}")] IncompleteExtraction(String),
    #[error("strategy generation failed: {0}")] Generation(String),
}
