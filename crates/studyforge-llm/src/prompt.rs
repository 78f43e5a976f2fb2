//! Prompt templates and per-operation sampling parameters for the study
//! endpoints. Each template carries a character budget so the document
//! excerpt fits within the model's context window.

use crate::provider::ChatOptions;

/// Fallback context budget when no chunks are available for a question.
pub const ASK_FALLBACK_CHARS: usize = 3000;
/// Document excerpt budget for summarization.
pub const SUMMARY_CHARS: usize = 4000;
/// Document excerpt budget for quiz, flashcard, mindmap and study plan generation.
pub const GENERATION_CHARS: usize = 3500;

pub const ASK_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.7,
    max_tokens: 1024,
};
pub const SUMMARY_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.7,
    max_tokens: 1024,
};
pub const QUIZ_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.8,
    max_tokens: 2048,
};
pub const FLASHCARDS_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.7,
    max_tokens: 2048,
};
pub const MINDMAP_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.7,
    max_tokens: 1536,
};
pub const STUDYPLAN_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.7,
    max_tokens: 2048,
};

/// Take the first `max_chars` characters of `text` without splitting a
/// character in the middle of its UTF-8 encoding.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[must_use]
pub fn ask(context: &str, query: &str) -> String {
    format!(
        "Based on the following context from a PDF document, answer the question.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question: {query}\n\
         \n\
         Please provide a clear and concise answer based only on the information in the context."
    )
}

#[must_use]
pub fn summary(text: &str) -> String {
    let excerpt = truncate_chars(text, SUMMARY_CHARS);
    format!(
        "Please provide a comprehensive summary of the following document. Include:\n\
         1. Main topic/theme\n\
         2. Key points (3-5 bullet points)\n\
         3. Brief overview (2-3 sentences)\n\
         \n\
         Document:\n\
         {excerpt}\n\
         \n\
         Format your response as:\n\
         **Main Topic:** [topic]\n\
         \n\
         **Key Points:**\n\
         - [point 1]\n\
         - [point 2]\n\
         - [point 3]\n\
         \n\
         **Overview:**\n\
         [overview text]"
    )
}

#[must_use]
pub fn quiz(text: &str, num_questions: u32, difficulty: &str) -> String {
    let excerpt = truncate_chars(text, GENERATION_CHARS);
    format!(
        "Generate {num_questions} {difficulty} multiple-choice quiz questions based on this document.\n\
         \n\
         Document:\n\
         {excerpt}\n\
         \n\
         For each question, provide:\n\
         1. Question text\n\
         2. Four options (A, B, C, D)\n\
         3. Correct answer (letter)\n\
         4. Brief explanation\n\
         \n\
         Format as JSON array:\n\
         [\n\
         \x20 {{\n\
         \x20   \"question\": \"Question text?\",\n\
         \x20   \"options\": {{\"A\": \"option1\", \"B\": \"option2\", \"C\": \"option3\", \"D\": \"option4\"}},\n\
         \x20   \"correct_answer\": \"A\",\n\
         \x20   \"explanation\": \"Why this is correct\"\n\
         \x20 }}\n\
         ]"
    )
}

#[must_use]
pub fn flashcards(text: &str, num_cards: u32) -> String {
    let excerpt = truncate_chars(text, GENERATION_CHARS);
    format!(
        "Create {num_cards} flashcards from this document. Each flashcard should have a clear \
         question/term on front and concise answer/definition on back.\n\
         \n\
         Document:\n\
         {excerpt}\n\
         \n\
         Format as JSON array:\n\
         [\n\
         \x20 {{\n\
         \x20   \"front\": \"Question or term\",\n\
         \x20   \"back\": \"Answer or definition\",\n\
         \x20   \"category\": \"Topic category\"\n\
         \x20 }}\n\
         ]"
    )
}

#[must_use]
pub fn mindmap(text: &str) -> String {
    let excerpt = truncate_chars(text, GENERATION_CHARS);
    format!(
        "Create a hierarchical mind map structure from this document.\n\
         \n\
         Document:\n\
         {excerpt}\n\
         \n\
         Format as JSON:\n\
         {{\n\
         \x20 \"central_topic\": \"Main topic\",\n\
         \x20 \"branches\": [\n\
         \x20   {{\n\
         \x20     \"name\": \"Branch 1\",\n\
         \x20     \"sub_branches\": [\"sub1\", \"sub2\", \"sub3\"]\n\
         \x20   }},\n\
         \x20   {{\n\
         \x20     \"name\": \"Branch 2\",\n\
         \x20     \"sub_branches\": [\"sub1\", \"sub2\"]\n\
         \x20   }}\n\
         \x20 ]\n\
         }}"
    )
}

#[must_use]
pub fn studyplan(text: &str, duration_days: u32) -> String {
    let excerpt = truncate_chars(text, GENERATION_CHARS);
    format!(
        "Create a {duration_days}-day study plan for this document. Break down the content into \
         manageable daily tasks.\n\
         \n\
         Document:\n\
         {excerpt}\n\
         \n\
         Format as JSON:\n\
         {{\n\
         \x20 \"total_days\": {duration_days},\n\
         \x20 \"daily_plan\": [\n\
         \x20   {{\n\
         \x20     \"day\": 1,\n\
         \x20     \"topics\": [\"Topic 1\", \"Topic 2\"],\n\
         \x20     \"tasks\": [\"Read section X\", \"Practice Y\"],\n\
         \x20     \"estimated_time\": \"2 hours\"\n\
         \x20   }}\n\
         \x20 ],\n\
         \x20 \"tips\": [\"Study tip 1\", \"Study tip 2\"]\n\
         }}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_shorter_than_budget_is_identity() {
        assert_eq!(truncate_chars("hello", 100), "hello");
    }

    #[test]
    fn truncate_cuts_at_char_count() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        // Four 3-byte characters; a byte-based cut at 5 would panic.
        let s = "日本語文字";
        assert_eq!(truncate_chars(s, 3), "日本語");
    }

    #[test]
    fn truncate_exact_length() {
        assert_eq!(truncate_chars("abc", 3), "abc");
    }

    #[test]
    fn truncate_empty() {
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn ask_embeds_context_and_question() {
        let p = ask("the sky is blue", "what color is the sky?");
        assert!(p.contains("Context:\nthe sky is blue"));
        assert!(p.contains("Question: what color is the sky?"));
    }

    #[test]
    fn summary_truncates_long_document() {
        let text = "word ".repeat(2000);
        let p = summary(&text);
        assert!(p.len() < text.len());
        assert!(p.contains("**Main Topic:**"));
    }

    #[test]
    fn quiz_embeds_parameters() {
        let p = quiz("some document text", 7, "hard");
        assert!(p.contains("Generate 7 hard multiple-choice quiz questions"));
        assert!(p.contains("some document text"));
        assert!(p.contains("\"correct_answer\": \"A\""));
    }

    #[test]
    fn flashcards_embeds_count() {
        let p = flashcards("doc", 12);
        assert!(p.contains("Create 12 flashcards"));
        assert!(p.contains("\"front\""));
        assert!(p.contains("\"back\""));
    }

    #[test]
    fn mindmap_requests_json_structure() {
        let p = mindmap("doc");
        assert!(p.contains("\"central_topic\""));
        assert!(p.contains("\"branches\""));
    }

    #[test]
    fn studyplan_embeds_duration() {
        let p = studyplan("doc", 14);
        assert!(p.contains("Create a 14-day study plan"));
        assert!(p.contains("\"total_days\": 14"));
    }

    #[test]
    fn generation_prompts_respect_budget() {
        let text = "x".repeat(10_000);
        for p in [
            quiz(&text, 5, "medium"),
            flashcards(&text, 10),
            mindmap(&text),
            studyplan(&text, 7),
        ] {
            assert!(!p.contains(&"x".repeat(GENERATION_CHARS + 1)));
            assert!(p.contains(&"x".repeat(GENERATION_CHARS)));
        }
    }

    #[test]
    fn options_match_operation_budgets() {
        assert_eq!(QUIZ_OPTIONS.max_tokens, 2048);
        assert!((QUIZ_OPTIONS.temperature - 0.8).abs() < f32::EPSILON);
        assert_eq!(MINDMAP_OPTIONS.max_tokens, 1536);
        assert_eq!(ASK_OPTIONS.max_tokens, 1024);
    }
}
