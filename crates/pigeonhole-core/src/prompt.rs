//! Prompt construction for classification requests
//!
//! A pure function of its inputs: the same (categories, destination,
//! description) triple always yields the same prompt string.

/// Build the classification prompt sent to the completion provider.
///
/// Lists the allowed categories joined by ", ", names the counterparty and
/// transaction subject, and instructs the model to answer with only the
/// category name.
pub fn build_prompt(categories: &[String], destination_name: &str, description: &str) -> String {
    format!(
        "Given i want to categorize transactions on my bank account into this categories: {}\n\
         In which category would a transaction from \"{}\" with the subject \"{}\" fall into?\n\
         Just output the name of the category. Does not have to be a complete sentence.",
        categories.join(", "),
        destination_name,
        description
    )
}
