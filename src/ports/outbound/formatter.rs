use crate::application::dto::ReviewResponse;
use crate::shared::Result;

/// ReviewFormatter port for rendering a review result
///
/// This port abstracts the output format (Markdown summary, JSON, ...).
/// Formatters only read the response; they never change the verdict.
pub trait ReviewFormatter {
    /// Formats the review response
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &ReviewResponse) -> Result<String>;
}
