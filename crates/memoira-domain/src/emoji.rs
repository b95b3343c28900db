//! Keyword based emoji suggestions for tasks and checklist items.

const SUGGESTIONS: &[(&[&str], &str)] = &[
    (&["حليب"], "🥛"),
    (&["بيض"], "🥚"),
    (&["خبز"], "🍞"),
    (&["عمل"], "💼"),
    (&["دراسة", "كتاب"], "📚"),
    (&["شمس"], "☀️"),
    (&["قمر"], "🌙"),
    (&["تسوق", "سوق"], "🛒"),
    (&["فكرة"], "💡"),
    (&["طعام", "أكل"], "🍽️"),
];

/// First emoji whose keyword appears in `text`, checked in table order.
pub fn suggest(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    SUGGESTIONS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, emoji)| *emoji)
}
