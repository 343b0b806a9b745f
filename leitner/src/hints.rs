use crate::models::Flashcard;
use crate::settings::Settings;

/// Build a hint for `card` from its base hint plus tag-driven guidance.
///
/// Math cards with a numeric answer get the operation, an answer range and a
/// difficulty level. Knowledge cards get the answer length, its first letter
/// and the topic. Everything else gets the base hint alone.
pub fn compose_hint(card: &Flashcard, settings: &Settings) -> String {
    let mut hint = card.hint.clone();

    if card.has_any_tag(&settings.math_tags) {
        if let Some(answer) = leading_integer(&card.back) {
            let operation = classify_operation(&card.front);
            let upper = answer.saturating_mul(2).max(10);
            hint.push_str(&format!("\nThis is a {} problem. ", operation));
            hint.push_str(&format!("The answer is between 0 and {}. ", upper));
            hint.push_str("This is a basic math problem.");
        }
    } else if card.has_any_tag(&settings.knowledge_tags) {
        hint.push_str(&format!("\nThe answer is {} letters long. ", card.back.chars().count()));
        if let Some(first) = card.back.chars().next() {
            hint.push_str(&format!("It starts with '{}'. ", first));
        }
        hint.push_str(&format!("This is a {} question.", card.tags.join(" or ")));
    }

    hint
}

fn classify_operation(prompt: &str) -> &'static str {
    let prompt = prompt.to_lowercase();
    if prompt.contains('+') {
        "addition"
    } else if prompt.contains('-') {
        "subtraction"
    } else if prompt.contains('×') || prompt.contains('*') {
        "multiplication"
    } else if prompt.contains('÷') || prompt.contains('/') {
        "division"
    } else if prompt.contains("square root") {
        "square root"
    } else {
        "arithmetic"
    }
}

/// Parses the integer prefix of `text`, e.g. `"42 apples"` gives 42.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign_len..].chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}
