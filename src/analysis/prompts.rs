/*!
 * Prompt construction for critical consensus requests.
 */

/// Placeholder replaced with the movie title
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// Default prompt sent to the model
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Provide a comprehensive critical consensus and review summary for the movie \"{title}\". \n\
Identify the general sentiment, key strengths (pros), and common criticisms (cons). \n\
Return the result in a clear structure. Include the release year if possible.";

/// Fill in a prompt template for one title
pub fn build_prompt(template: &str, title: &str) -> String {
    template.replace(TITLE_PLACEHOLDER, title)
}
