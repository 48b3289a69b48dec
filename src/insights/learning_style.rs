/// What the adapted content leans on for a given style.
pub fn emphasis(style: &str) -> &'static str {
    match style {
        "visual" => "diagrams, videos, and visual representations",
        "auditory" => "discussions, audio elements, and verbal explanations",
        "kinesthetic" => "interactive exercises, hands-on activities, and practical applications",
        "reading/writing" => {
            "comprehensive text materials, note-taking opportunities, and written exercises"
        }
        _ => "a balanced mix of different content types",
    }
}

/// `"visual"` → `"Visual Learner"`.
pub fn display_name(style: &str) -> String {
    let mut chars = style.chars();
    match chars.next() {
        Some(first) => format!("{}{} Learner", first.to_uppercase(), chars.as_str()),
        None => "Unknown Learner".to_string(),
    }
}
